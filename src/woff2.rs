//! External WOFF2 codec tools, driven as subprocesses.
//!
//! Encoding and decoding WOFF2 is delegated to the Google woff2 command
//! line tools (or compatible replacements). Both tools take a single input
//! path and write their output next to it with the extension swapped, so
//! inputs are always staged into a private directory first; outputs from
//! different pipeline stages can then never collide.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::Error;

/// The subprocess commands used to encode and decode WOFF2.
#[derive(Clone, Debug)]
pub struct Woff2Tools {
    pub encoder: OsString,
    pub decompressor: OsString,
}

impl Default for Woff2Tools {
    fn default() -> Self {
        Self {
            encoder: "woff2_compress".into(),
            decompressor: "woff2_decompress".into(),
        }
    }
}

impl Woff2Tools {
    /// Encodes `original` with the reference encoder, returning the path of
    /// the produced WOFF2 inside `work`.
    pub fn encode_reference(&self, original: &Path, work: &Path) -> Result<PathBuf, Error> {
        let staged = stage(original, work, "encode", "font.ttf")
            .map_err(|err| Error::ReferenceEncodingFailed(err.to_string()))?;
        run(&self.encoder, &staged).map_err(Error::ReferenceEncodingFailed)?;
        let output = staged.with_extension("woff2");
        if !output.is_file() {
            return Err(Error::ReferenceEncodingFailed(format!(
                "{} produced no output for {}",
                Path::new(&self.encoder).display(),
                original.display()
            )));
        }
        Ok(output)
    }

    /// Decompresses `woff2` back to a TTF inside `work`, returning its path.
    ///
    /// `label` names the staging subdirectory so that multiple inputs can be
    /// decompressed into the same work directory.
    pub fn decompress(&self, woff2: &Path, work: &Path, label: &str) -> Result<PathBuf, Error> {
        let failed = |message: String| Error::DecompressionFailed {
            path: woff2.to_owned(),
            message,
        };
        let staged =
            stage(woff2, work, label, "font.woff2").map_err(|err| failed(err.to_string()))?;
        run(&self.decompressor, &staged).map_err(failed)?;
        let output = staged.with_extension("ttf");
        if !output.is_file() {
            return Err(failed(format!(
                "{} produced no output",
                Path::new(&self.decompressor).display()
            )));
        }
        Ok(output)
    }
}

/// Copies `input` to `<work>/<label>/<name>` and returns the staged path.
fn stage(input: &Path, work: &Path, label: &str, name: &str) -> std::io::Result<PathBuf> {
    let dir = work.join(label);
    std::fs::create_dir_all(&dir)?;
    let staged = dir.join(name);
    std::fs::copy(input, &staged)?;
    Ok(staged)
}

/// Runs `program <input>`, folding spawn failures and nonzero exits into a
/// single message that includes the child's stderr.
fn run(program: &OsString, input: &Path) -> Result<(), String> {
    let program_name = Path::new(program).display();
    let output = Command::new(program)
        .arg(input)
        .output()
        .map_err(|err| format!("failed to run {program_name}: {err}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "{program_name} exited with {}: {}",
            output.status,
            stderr.trim()
        ));
    }
    Ok(())
}
