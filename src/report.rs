//! Report value types and their human-readable rendering.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    compare::{FieldCheck, GlyphComparison, MISMATCH_PREVIEW},
    header::Woff2Header,
};

/// `1 - compressed/original`, the fraction of the original size saved.
///
/// Always in `(-inf, 1.0]`; a zero original size reports 0 rather than
/// dividing by zero.
pub fn compression_ratio(compressed: u64, original: u64) -> f64 {
    if original == 0 {
        0.0
    } else {
        1.0 - compressed as f64 / original as f64
    }
}

/// Signed byte delta `candidate - reference` and its percentage relative to
/// the reference size (0% when the reference size is 0).
pub fn size_delta(candidate: u64, reference: u64) -> (i64, f64) {
    let delta = candidate as i64 - reference as i64;
    let percent = if reference == 0 {
        0.0
    } else {
        delta as f64 / reference as f64 * 100.0
    };
    (delta, percent)
}

/// Results of comparing the original against the reference encoder's output.
#[derive(Clone, Debug)]
pub struct ReferenceSection {
    pub size: u64,
    pub glyphs: GlyphComparison,
}

/// The full outcome of one validation run.
///
/// A pure value object, constructed once at the end of a run. Derived
/// quantities (ratios, deltas) are computed on demand rather than stored.
#[derive(Clone, Debug)]
pub struct ValidationReport {
    pub original: PathBuf,
    pub candidate: PathBuf,
    pub ttf_size: u64,
    pub candidate_size: u64,
    pub header: Woff2Header,
    pub metadata: Vec<FieldCheck>,
    pub glyphs: GlyphComparison,
    pub reference: Option<ReferenceSection>,
}

impl ValidationReport {
    /// The verdict: all metadata fields equal and every glyph matched.
    ///
    /// The reference comparison is informational and never affects this.
    pub fn passed(&self) -> bool {
        self.metadata_passed() && self.glyphs.passed()
    }

    pub fn metadata_passed(&self) -> bool {
        self.metadata.iter().all(|check| check.passed)
    }

    pub fn compression_ratio(&self) -> f64 {
        compression_ratio(self.candidate_size, self.ttf_size)
    }

    /// Candidate-vs-reference size delta, when a reference was produced.
    pub fn size_delta(&self) -> Option<(i64, f64)> {
        self.reference
            .as_ref()
            .map(|reference| size_delta(self.candidate_size, reference.size))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validating: {}", self.candidate.display())?;
        writeln!(f, "Against:    {}", self.original.display())?;
        writeln!(f)?;

        section(f, "FILE SIZES")?;
        writeln!(
            f,
            "  Original TTF:  {:>12} bytes",
            group_digits(self.ttf_size)
        )?;
        writeln!(
            f,
            "  WOFF2:         {:>12} bytes ({:.1}% compression)",
            group_digits(self.candidate_size),
            self.compression_ratio() * 100.0
        )?;
        writeln!(f)?;

        section(f, "WOFF2 HEADER")?;
        write!(f, "{}", self.header)?;
        writeln!(f)?;

        section(f, "METADATA COMPARISON")?;
        for check in &self.metadata {
            writeln!(
                f,
                "  {} {}: orig={}, woff2={}",
                mark(check.passed),
                check.field,
                check.original,
                check.candidate
            )?;
        }
        writeln!(f)?;

        section(f, "GLYPH SHAPE COMPARISON")?;
        write_glyph_summary(f, &self.glyphs)?;
        writeln!(f)?;

        if let Some(reference) = &self.reference {
            section(f, "REFERENCE COMPARISON")?;
            writeln!(
                f,
                "  Reference size: {} bytes ({:.1}% compression)",
                group_digits(reference.size),
                compression_ratio(reference.size, self.ttf_size) * 100.0
            )?;
            let (delta, percent) = size_delta(self.candidate_size, reference.size);
            writeln!(
                f,
                "  Size difference: {} bytes ({percent:+.2}%)",
                group_signed(delta)
            )?;
            writeln!(
                f,
                "  Reference vs original: {}/{} glyphs match",
                reference.glyphs.matched, reference.glyphs.total
            )?;
            writeln!(f)?;
        }

        section(f, "RESULT")?;
        if self.passed() {
            writeln!(f, "✓ PASSED: All validations successful")
        } else {
            writeln!(f, "✗ FAILED: Some validations failed")?;
            if !self.metadata_passed() {
                writeln!(f, "  - Metadata mismatch")?;
            }
            if !self.glyphs.passed() {
                writeln!(f, "  - Glyph shape mismatch")?;
            }
            Ok(())
        }
    }
}

/// Output of the `compare-size` mode: sizes only, no equivalence checks.
#[derive(Clone, Debug)]
pub struct SizeReport {
    pub original: PathBuf,
    pub ttf_size: u64,
    pub candidate_size: u64,
    pub reference_size: Option<u64>,
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .original
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.original.display().to_string());
        writeln!(f, "File size comparison for {name}:")?;
        writeln!(f)?;
        writeln!(
            f,
            "  Original TTF:  {:>12} bytes",
            group_digits(self.ttf_size)
        )?;
        writeln!(
            f,
            "  Candidate:     {:>12} bytes ({:.1}% compression)",
            group_digits(self.candidate_size),
            compression_ratio(self.candidate_size, self.ttf_size) * 100.0
        )?;
        let Some(reference_size) = self.reference_size else {
            writeln!(f, "  Reference:     unavailable")?;
            return Ok(());
        };
        writeln!(
            f,
            "  Reference:     {:>12} bytes ({:.1}% compression)",
            group_digits(reference_size),
            compression_ratio(reference_size, self.ttf_size) * 100.0
        )?;
        writeln!(f)?;
        let (delta, percent) = size_delta(self.candidate_size, reference_size);
        writeln!(
            f,
            "  Difference:    {:>12} bytes ({percent:+.2}%)",
            group_signed(delta)
        )?;
        writeln!(f)?;
        if percent.abs() < 1.0 {
            writeln!(f, "✓ Sizes match (within 1%)")
        } else if delta < 0 {
            writeln!(f, "✓ Candidate is smaller")
        } else {
            writeln!(f, "⚠ Candidate is {percent:.1}% larger")
        }
    }
}

/// Outcome of one pair in a batch run.
#[derive(Debug)]
pub enum BatchOutcome {
    /// No candidate file was found next to the TTF.
    MissingCandidate,
    Validated(Box<ValidationReport>),
    /// The pipeline aborted with a fatal error.
    Error(String),
}

#[derive(Debug)]
pub struct BatchEntry {
    pub ttf: PathBuf,
    pub outcome: BatchOutcome,
}

/// Results for every discovered pair in a directory, in discovery order.
#[derive(Debug)]
pub struct BatchReport {
    pub directory: PathBuf,
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Passes only if at least one pair was found and every validated pair
    /// passed. Pairs with no candidate file are warnings, not failures.
    pub fn passed(&self) -> bool {
        !self.entries.is_empty()
            && self.entries.iter().all(|entry| match &entry.outcome {
                BatchOutcome::MissingCandidate => true,
                BatchOutcome::Validated(report) => report.passed(),
                BatchOutcome::Error(_) => false,
            })
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No TTF files found in {}", self.directory.display());
        }
        writeln!(f, "Validating WOFF2 files:")?;
        writeln!(f)?;
        for entry in &self.entries {
            let name = file_name(&entry.ttf);
            match &entry.outcome {
                BatchOutcome::MissingCandidate => {
                    writeln!(f, "  ⚠ {name}: no corresponding WOFF2 file")?;
                }
                BatchOutcome::Error(message) => {
                    writeln!(f, "  ✗ {name}: {message}")?;
                }
                BatchOutcome::Validated(report) => {
                    writeln!(f, "  {} {name}", mark(report.passed()))?;
                    writeln!(
                        f,
                        "      Glyphs: {}/{}, Size: {} bytes ({:.1}%)",
                        report.glyphs.matched,
                        report.glyphs.total,
                        group_digits(report.candidate_size),
                        report.compression_ratio() * 100.0
                    )?;
                }
            }
        }
        writeln!(f)?;
        if self.passed() {
            writeln!(f, "✓ All validations PASSED")
        } else {
            writeln!(f, "✗ Some validations FAILED")
        }
    }
}

fn write_glyph_summary(f: &mut fmt::Formatter<'_>, glyphs: &GlyphComparison) -> fmt::Result {
    writeln!(
        f,
        "  {} {}/{} glyphs match ({:.2}%)",
        mark(glyphs.passed()),
        glyphs.matched,
        glyphs.total,
        glyphs.match_percent()
    )?;
    if !glyphs.mismatches.is_empty() {
        let preview: Vec<&str> = glyphs.mismatch_names().take(MISMATCH_PREVIEW).collect();
        let truncated = if glyphs.mismatches.len() > MISMATCH_PREVIEW {
            "..."
        } else {
            ""
        };
        writeln!(f, "  Mismatches: {preview:?}{truncated}")?;
    }
    Ok(())
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let rule = "=".repeat(60);
    writeln!(f, "{rule}")?;
    writeln!(f, "{title}")?;
    writeln!(f, "{rule}")
}

fn mark(passed: bool) -> char {
    if passed {
        '✓'
    } else {
        '✗'
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (ix, digit) in digits.chars().enumerate() {
        if ix > 0 && (digits.len() - ix) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

fn group_signed(value: i64) -> String {
    let sign = if value < 0 { '-' } else { '+' };
    format!("{sign}{}", group_digits(value.unsigned_abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compare::MismatchRecord,
        header::{Woff2Header, HEADER_SIZE, SIGNATURE},
        outline::CanonicalOutline,
    };

    fn sample_header() -> Woff2Header {
        let mut bytes = vec![0; HEADER_SIZE];
        bytes[..4].copy_from_slice(&SIGNATURE.to_be_bytes());
        Woff2Header::read(&bytes).unwrap()
    }

    fn mismatch(name: &str) -> MismatchRecord {
        MismatchRecord {
            name: name.into(),
            original: CanonicalOutline::default(),
            candidate: None,
        }
    }

    #[test]
    fn ratio_is_exact() {
        assert_eq!(compression_ratio(40_000, 100_000), 0.6);
        assert_eq!(compression_ratio(100_000, 100_000), 0.0);
        assert!(compression_ratio(150_000, 100_000) < 0.0);
    }

    #[test]
    fn zero_original_size_is_guarded() {
        assert_eq!(compression_ratio(40_000, 0), 0.0);
    }

    #[test]
    fn zero_reference_size_reports_zero_percent() {
        let (delta, percent) = size_delta(40_000, 0);
        assert_eq!(delta, 40_000);
        assert_eq!(percent, 0.0);
    }

    #[test]
    fn delta_is_signed() {
        let (delta, percent) = size_delta(41_000, 40_000);
        assert_eq!(delta, 1_000);
        assert_eq!(percent, 2.5);
        let (delta, percent) = size_delta(39_000, 40_000);
        assert_eq!(delta, -1_000);
        assert_eq!(percent, -2.5);
    }

    #[test]
    fn verdict_requires_metadata_and_glyphs() {
        let mut report = ValidationReport {
            original: "a.ttf".into(),
            candidate: "a.woff2".into(),
            ttf_size: 100_000,
            candidate_size: 40_000,
            header: sample_header(),
            metadata: vec![FieldCheck {
                field: "unitsPerEm",
                passed: true,
                original: "1000".into(),
                candidate: "1000".into(),
            }],
            glyphs: GlyphComparison {
                matched: 3,
                total: 3,
                mismatches: vec![],
            },
            reference: None,
        };
        assert!(report.passed());

        report.glyphs.matched = 2;
        report.glyphs.mismatches.push(mismatch("B"));
        assert!(!report.passed());

        report.glyphs.matched = 3;
        report.glyphs.mismatches.clear();
        report.metadata[0].passed = false;
        assert!(!report.passed());
    }

    #[test]
    fn reference_section_does_not_affect_verdict() {
        let report = ValidationReport {
            original: "a.ttf".into(),
            candidate: "a.woff2".into(),
            ttf_size: 100_000,
            candidate_size: 40_000,
            header: sample_header(),
            metadata: vec![],
            glyphs: GlyphComparison::default(),
            reference: Some(ReferenceSection {
                size: 39_000,
                glyphs: GlyphComparison {
                    matched: 0,
                    total: 1,
                    mismatches: vec![mismatch("A")],
                },
            }),
        };
        assert!(report.passed());
        assert_eq!(report.size_delta(), Some((1_000, 1_000.0 / 39_000.0 * 100.0)));
    }

    #[test]
    fn mismatch_preview_is_capped_at_ten() {
        let names: Vec<String> = (0..12).map(|ix| format!("glyph{ix:02}")).collect();
        let glyphs = GlyphComparison {
            matched: 0,
            total: 12,
            mismatches: names.iter().map(|name| mismatch(name)).collect(),
        };
        let report = ValidationReport {
            original: "a.ttf".into(),
            candidate: "a.woff2".into(),
            ttf_size: 1,
            candidate_size: 1,
            header: sample_header(),
            metadata: vec![],
            glyphs,
            reference: None,
        };
        let rendered = report.to_string();
        assert!(rendered.contains("glyph09"));
        assert!(!rendered.contains("glyph10"));
        assert!(rendered.contains("..."));
        // The full list is still available programmatically.
        assert_eq!(report.glyphs.mismatches.len(), 12);
    }

    #[test]
    fn digit_grouping() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(1_234_567), "1,234,567");
        assert_eq!(group_signed(-12_345), "-12,345");
        assert_eq!(group_signed(12_345), "+12,345");
    }

    #[test]
    fn batch_report_verdict() {
        let passing = ValidationReport {
            original: "a.ttf".into(),
            candidate: "a.woff2".into(),
            ttf_size: 10,
            candidate_size: 4,
            header: sample_header(),
            metadata: vec![],
            glyphs: GlyphComparison::default(),
            reference: None,
        };
        let mut failing = passing.clone();
        failing.glyphs = GlyphComparison {
            matched: 0,
            total: 1,
            mismatches: vec![mismatch("A")],
        };

        let report = BatchReport {
            directory: "fonts".into(),
            entries: vec![
                BatchEntry {
                    ttf: "fonts/a.ttf".into(),
                    outcome: BatchOutcome::Validated(Box::new(passing.clone())),
                },
                BatchEntry {
                    ttf: "fonts/b.ttf".into(),
                    outcome: BatchOutcome::MissingCandidate,
                },
            ],
        };
        assert!(report.passed());

        let report = BatchReport {
            directory: "fonts".into(),
            entries: vec![
                BatchEntry {
                    ttf: "fonts/a.ttf".into(),
                    outcome: BatchOutcome::Validated(Box::new(passing)),
                },
                BatchEntry {
                    ttf: "fonts/b.ttf".into(),
                    outcome: BatchOutcome::Validated(Box::new(failing)),
                },
            ],
        };
        assert!(!report.passed());
        // Every entry is enumerated, not just failures.
        let rendered = report.to_string();
        assert!(rendered.contains("a.ttf"));
        assert!(rendered.contains("b.ttf"));

        let empty = BatchReport {
            directory: "fonts".into(),
            entries: vec![],
        };
        assert!(!empty.passed());
    }
}
