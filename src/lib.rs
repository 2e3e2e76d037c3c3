//! Validates that a WOFF2 encoding of a font is faithful to its TTF source.
//!
//! The pipeline decompresses the candidate WOFF2 with an external tool,
//! captures a snapshot of each side (metadata fields plus every glyph
//! outline in canonical form) and compares the snapshots. Mismatches are
//! findings in the report, not errors; only a broken input aborts a run.

mod compare;
mod error;
mod font;
mod header;
mod outline;
mod report;
mod snapshot;
mod validate;
mod woff2;

pub use compare::{
    compare, Comparison, FieldCheck, GlyphComparison, MismatchRecord, MISMATCH_PREVIEW,
};
pub use error::Error;
pub use font::{FontFile, SharedFontData};
pub use header::{HeaderError, Woff2Header, HEADER_SIZE, SIGNATURE};
pub use outline::{CanonicalOutline, PathCommand, RecordingPen};
pub use report::{
    compression_ratio, size_delta, BatchEntry, BatchOutcome, BatchReport, ReferenceSection,
    SizeReport, ValidationReport,
};
pub use snapshot::FontSnapshot;
pub use validate::{compare_size, validate, validate_batch, Options, ReferenceSource};
pub use woff2::Woff2Tools;
