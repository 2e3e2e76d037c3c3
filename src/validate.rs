//! The validation pipeline: load, decompress, snapshot, compare, report.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    compare::compare,
    error::Error,
    font::FontFile,
    header::Woff2Header,
    report::{
        BatchEntry, BatchOutcome, BatchReport, ReferenceSection, SizeReport, ValidationReport,
    },
    snapshot::FontSnapshot,
    woff2::Woff2Tools,
};

/// Where the optional reference comparison gets its WOFF2 from.
#[derive(Clone, Debug, Default)]
pub enum ReferenceSource {
    /// No reference comparison.
    #[default]
    Off,
    /// Use an existing WOFF2 file.
    Path(PathBuf),
    /// Encode the original with the reference encoder.
    Generate,
}

/// Pipeline configuration shared by all entry points.
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub reference: ReferenceSource,
    pub tools: Woff2Tools,
}

/// Validates `candidate` (a WOFF2 file) against `original` (its TTF source).
///
/// Stages run strictly in order; the first fatal error aborts the run.
/// Mismatches discovered by comparison are not errors and always produce a
/// report. A failing reference comparison degrades to a warning because the
/// candidate's verdict never depends on it.
pub fn validate(
    original: &Path,
    candidate: &Path,
    options: &Options,
) -> Result<ValidationReport, Error> {
    let original_file = FontFile::load(original)?;
    let candidate_file = FontFile::load(candidate)?;
    if let ReferenceSource::Path(reference) = &options.reference {
        if !reference.is_file() {
            return Err(Error::InputNotFound(reference.clone()));
        }
    }

    let header =
        Woff2Header::read(candidate_file.bytes()).map_err(|source| Error::MalformedHeader {
            path: candidate.to_owned(),
            source,
        })?;
    log::debug!("decoded WOFF2 header of {}", candidate.display());

    // Work directory for every decompressed or encoded intermediate.
    // Dropping it removes the intermediates on every exit path.
    let work = tempfile::tempdir()?;

    let decompressed = options
        .tools
        .decompress(candidate_file.path(), work.path(), "candidate")?;
    let decompressed_file = FontFile::load(&decompressed)?;

    let original_snapshot = FontSnapshot::capture(original, &original_file.font()?)?;
    let candidate_snapshot = FontSnapshot::capture(candidate, &decompressed_file.font()?)?;
    log::debug!(
        "captured snapshots: {} original glyphs, {} candidate glyphs",
        original_snapshot.num_glyphs,
        candidate_snapshot.num_glyphs
    );

    let comparison = compare(&original_snapshot, &candidate_snapshot);

    let reference = match reference_section(&original_snapshot, original, work.path(), options) {
        Ok(section) => section,
        Err(err) => {
            log::warn!("reference comparison skipped: {err}");
            None
        }
    };

    Ok(ValidationReport {
        original: original.to_owned(),
        candidate: candidate.to_owned(),
        ttf_size: original_file.size(),
        candidate_size: candidate_file.size(),
        header,
        metadata: comparison.fields,
        glyphs: comparison.glyphs,
        reference,
    })
}

fn reference_section(
    original_snapshot: &FontSnapshot,
    original: &Path,
    work: &Path,
    options: &Options,
) -> Result<Option<ReferenceSection>, Error> {
    let reference = match &options.reference {
        ReferenceSource::Off => return Ok(None),
        ReferenceSource::Path(path) => FontFile::load(path)?,
        ReferenceSource::Generate => {
            let encoded = options.tools.encode_reference(original, work)?;
            FontFile::load(&encoded)?
        }
    };
    let size = reference.size();
    let decompressed = options
        .tools
        .decompress(reference.path(), work, "reference")?;
    let decompressed_file = FontFile::load(&decompressed)?;
    let snapshot = FontSnapshot::capture(reference.path(), &decompressed_file.font()?)?;
    let comparison = compare(original_snapshot, &snapshot);
    Ok(Some(ReferenceSection {
        size,
        glyphs: comparison.glyphs,
    }))
}

/// Compares file sizes only; no decompression or shape comparison.
///
/// The reference size is produced by running the reference encoder on the
/// original; if that fails the report simply omits it.
pub fn compare_size(
    original: &Path,
    candidate: &Path,
    options: &Options,
) -> Result<SizeReport, Error> {
    let original_file = FontFile::load(original)?;
    let candidate_file = FontFile::load(candidate)?;

    let work = tempfile::tempdir()?;
    let reference_size = match options.tools.encode_reference(original, work.path()) {
        Ok(encoded) => Some(std::fs::metadata(&encoded)?.len()),
        Err(err) => {
            log::warn!("reference encoding skipped: {err}");
            None
        }
    };

    Ok(SizeReport {
        original: original.to_owned(),
        ttf_size: original_file.size(),
        candidate_size: candidate_file.size(),
        reference_size,
    })
}

/// Validates every TTF/WOFF2 pair found in `directory`.
///
/// TTFs are discovered by extension and processed in sorted order. A TTF
/// with no candidate next to it is recorded and skipped; a fatal error in
/// one pair is recorded without stopping the others.
pub fn validate_batch(directory: &Path, options: &Options) -> Result<BatchReport, Error> {
    if !directory.is_dir() {
        return Err(Error::InputNotFound(directory.to_owned()));
    }
    let mut ttfs: Vec<PathBuf> = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| has_extension(path, "ttf"))
        .collect();
    ttfs.sort();

    let entries: Vec<BatchEntry> = ttfs
        .par_iter()
        .map(|ttf| {
            let outcome = match candidate_for(ttf) {
                None => BatchOutcome::MissingCandidate,
                Some(candidate) => match validate(ttf, &candidate, options) {
                    Ok(report) => BatchOutcome::Validated(Box::new(report)),
                    Err(err) => BatchOutcome::Error(err.to_string()),
                },
            };
            BatchEntry {
                ttf: ttf.clone(),
                outcome,
            }
        })
        .collect();

    Ok(BatchReport {
        directory: directory.to_owned(),
        entries,
    })
}

/// Finds the WOFF2 file paired with `ttf`: `<stem>.woff2` preferred, then
/// `<stem>-pure.woff2`.
fn candidate_for(ttf: &Path) -> Option<PathBuf> {
    let stem = ttf.file_stem()?.to_str()?;
    let plain = ttf.with_file_name(format!("{stem}.woff2"));
    if plain.is_file() {
        return Some(plain);
    }
    let pure = ttf.with_file_name(format!("{stem}-pure.woff2"));
    pure.is_file().then_some(pure)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
