use std::{ffi::OsString, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

use wofflet::{Options, ReferenceSource, Woff2Tools};

/// Validates WOFF2 encoder output against its TTF source.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Command used to produce reference WOFF2 encodings.
    #[arg(long, global = true, default_value = "woff2_compress")]
    reference_encoder: OsString,
    /// Command used to decompress WOFF2 files.
    #[arg(long, global = true, default_value = "woff2_decompress")]
    decompressor: OsString,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one WOFF2 file against its TTF source.
    Validate {
        /// Path to the original TTF.
        original: PathBuf,
        /// Path to the candidate WOFF2.
        candidate: PathBuf,
        /// Also compare against an existing reference WOFF2.
        #[arg(long, conflicts_with = "with_reference")]
        reference: Option<PathBuf>,
        /// Also compare against a reference encoding generated on the fly.
        #[arg(long)]
        with_reference: bool,
    },
    /// Compare file sizes against the reference encoder, without validating.
    CompareSize {
        /// Path to the original TTF.
        original: PathBuf,
        /// Path to the candidate WOFF2.
        candidate: PathBuf,
    },
    /// Validate every TTF/WOFF2 pair in a directory.
    ValidateBatch {
        /// Directory holding TTFs and their WOFF2 candidates.
        directory: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let tools = Woff2Tools {
        encoder: args.reference_encoder,
        decompressor: args.decompressor,
    };

    let result = match args.command {
        Command::Validate {
            original,
            candidate,
            reference,
            with_reference,
        } => {
            let reference = match reference {
                Some(path) => ReferenceSource::Path(path),
                None if with_reference => ReferenceSource::Generate,
                None => ReferenceSource::Off,
            };
            let options = Options { reference, tools };
            wofflet::validate(&original, &candidate, &options)
                .map(|report| {
                    print!("{report}");
                    report.passed()
                })
        }
        Command::CompareSize {
            original,
            candidate,
        } => {
            let options = Options {
                reference: ReferenceSource::Off,
                tools,
            };
            wofflet::compare_size(&original, &candidate, &options).map(|report| {
                print!("{report}");
                true
            })
        }
        Command::ValidateBatch { directory } => {
            let options = Options {
                reference: ReferenceSource::Off,
                tools,
            };
            wofflet::validate_batch(&directory, &options).map(|report| {
                print!("{report}");
                report.passed()
            })
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
