//! Pairwise equivalence comparison between two font snapshots.

use std::fmt::Display;

use rayon::prelude::*;

use crate::{outline::CanonicalOutline, snapshot::FontSnapshot};

/// How many mismatched glyph names to show in rendered reports. The full
/// list is always kept for programmatic consumers.
pub const MISMATCH_PREVIEW: usize = 10;

/// Result of checking one metadata field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldCheck {
    pub field: &'static str,
    pub passed: bool,
    pub original: String,
    pub candidate: String,
}

impl FieldCheck {
    fn new<T: PartialEq + Display>(field: &'static str, original: &T, candidate: &T) -> Self {
        Self {
            field,
            passed: original == candidate,
            original: original.to_string(),
            candidate: candidate.to_string(),
        }
    }
}

/// A glyph whose outlines disagree, kept with both outlines for reporting.
///
/// `candidate` is `None` when the glyph is absent from the candidate font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MismatchRecord {
    pub name: String,
    pub original: CanonicalOutline,
    pub candidate: Option<CanonicalOutline>,
}

/// Aggregated glyph comparison results, in the original font's glyph order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphComparison {
    pub matched: usize,
    pub total: usize,
    pub mismatches: Vec<MismatchRecord>,
}

impl GlyphComparison {
    /// Zero glyphs is vacuously a full match.
    pub fn passed(&self) -> bool {
        self.matched == self.total
    }

    pub fn match_percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.matched as f64 / self.total as f64 * 100.0
        }
    }

    pub fn mismatch_names(&self) -> impl Iterator<Item = &str> {
        self.mismatches.iter().map(|m| m.name.as_str())
    }
}

/// The full output of comparing two snapshots.
#[derive(Clone, Debug, Default)]
pub struct Comparison {
    pub fields: Vec<FieldCheck>,
    pub glyphs: GlyphComparison,
}

impl Comparison {
    pub fn passed(&self) -> bool {
        self.fields.iter().all(|check| check.passed) && self.glyphs.passed()
    }
}

/// Compares `candidate` against `original`.
///
/// Metadata fields are checked in a fixed order with exact equality. Glyphs
/// are enumerated in the original's glyph order and looked up in the
/// candidate by name; an absent glyph is a mismatch, not an error. Glyph
/// comparisons are independent, so they run on rayon workers; the indexed
/// collect keeps results in enumeration order regardless of completion
/// order.
pub fn compare(original: &FontSnapshot, candidate: &FontSnapshot) -> Comparison {
    let fields = vec![
        FieldCheck::new("numGlyphs", &original.num_glyphs, &candidate.num_glyphs),
        FieldCheck::new("unitsPerEm", &original.units_per_em, &candidate.units_per_em),
        FieldCheck::new(
            "fontRevision",
            &original.font_revision,
            &candidate.font_revision,
        ),
        FieldCheck::new("xMin", &original.x_min, &candidate.x_min),
        FieldCheck::new("yMin", &original.y_min, &candidate.y_min),
        FieldCheck::new("xMax", &original.x_max, &candidate.x_max),
        FieldCheck::new("yMax", &original.y_max, &candidate.y_max),
        FieldCheck::new(
            "sTypoAscender",
            &original.s_typo_ascender,
            &candidate.s_typo_ascender,
        ),
        FieldCheck::new(
            "sTypoDescender",
            &original.s_typo_descender,
            &candidate.s_typo_descender,
        ),
        family_name_check(original, candidate),
    ];

    let results: Vec<Option<MismatchRecord>> = original
        .glyphs()
        .par_iter()
        .map(|(name, outline)| match candidate.outline(name) {
            Some(other) if other == outline => None,
            other => Some(MismatchRecord {
                name: name.clone(),
                original: outline.clone(),
                candidate: other.cloned(),
            }),
        })
        .collect();
    let mismatches: Vec<MismatchRecord> = results.into_iter().flatten().collect();

    let total = original.glyphs().len();
    let glyphs = GlyphComparison {
        matched: total - mismatches.len(),
        total,
        mismatches,
    };

    Comparison { fields, glyphs }
}

fn family_name_check(original: &FontSnapshot, candidate: &FontSnapshot) -> FieldCheck {
    let render = |name: &Option<String>| name.clone().unwrap_or_else(|| "(none)".into());
    FieldCheck {
        field: "familyName",
        passed: original.family_name == candidate.family_name,
        original: render(&original.family_name),
        candidate: render(&candidate.family_name),
    }
}
