//! Immutable extraction of the comparison-relevant parts of a font.

use std::{collections::HashMap, path::Path};

use skrifa::{
    outline::DrawSettings,
    prelude::{LocationRef, Size},
    raw::{
        tables::post::Post,
        types::{Fixed, GlyphId, GlyphId16},
        FontRef, TableProvider,
    },
    string::StringId,
    MetadataProvider,
};

use crate::{
    error::Error,
    outline::{CanonicalOutline, RecordingPen},
};

/// The fixed set of metadata fields plus every glyph outline of a font,
/// captured once per loaded file and never mutated afterwards.
///
/// Glyphs are stored in the font's internal glyph order so that diffs are
/// deterministic.
pub struct FontSnapshot {
    pub num_glyphs: u16,
    pub units_per_em: u16,
    pub font_revision: Fixed,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub s_typo_ascender: i16,
    pub s_typo_descender: i16,
    pub family_name: Option<String>,
    glyphs: Vec<(String, CanonicalOutline)>,
    by_name: HashMap<String, usize>,
}

impl FontSnapshot {
    /// Captures a snapshot from a decoded font.
    ///
    /// `path` is only used to name the file in errors. Fails with
    /// [`Error::MissingTable`] if any of the required tables (`maxp`,
    /// `head`, `OS/2`, `name`, or a glyph source) is absent.
    pub fn capture(path: &Path, font: &FontRef) -> Result<Self, Error> {
        let missing = |table: &'static str| Error::MissingTable {
            path: path.to_owned(),
            table,
        };
        let maxp = font.maxp().map_err(|_| missing("maxp"))?;
        let head = font.head().map_err(|_| missing("head"))?;
        let os2 = font.os2().map_err(|_| missing("OS/2"))?;
        font.name().map_err(|_| missing("name"))?;
        if font.glyf().is_err() && font.cff().is_err() && font.cff2().is_err() {
            return Err(missing("glyf"));
        }

        let family_name = font
            .localized_strings(StringId::FAMILY_NAME)
            .english_or_first()
            .map(|name| name.to_string());

        let num_glyphs = maxp.num_glyphs();
        let post = font.post().ok();
        let outlines = font.outline_glyphs();
        let settings = || DrawSettings::unhinted(Size::unscaled(), LocationRef::default());

        let mut glyphs = Vec::with_capacity(num_glyphs as usize);
        let mut by_name = HashMap::with_capacity(num_glyphs as usize);
        for gid in 0..num_glyphs {
            let name = glyph_name(post.as_ref(), gid);
            let outline = match outlines.get(GlyphId::from(gid)) {
                Some(glyph) => {
                    let mut pen = RecordingPen::new();
                    glyph.draw(settings(), &mut pen).map_err(|source| Error::Glyph {
                        path: path.to_owned(),
                        name: name.clone(),
                        source,
                    })?;
                    pen.into_outline()
                }
                // A glyph with no outline data draws nothing.
                None => CanonicalOutline::default(),
            };
            by_name.entry(name.clone()).or_insert(glyphs.len());
            glyphs.push((name, outline));
        }

        Ok(Self {
            num_glyphs,
            units_per_em: head.units_per_em(),
            font_revision: head.font_revision(),
            x_min: head.x_min(),
            y_min: head.y_min(),
            x_max: head.x_max(),
            y_max: head.y_max(),
            s_typo_ascender: os2.s_typo_ascender(),
            s_typo_descender: os2.s_typo_descender(),
            family_name,
            glyphs,
            by_name,
        })
    }

    /// The (name, outline) pairs in the font's glyph order.
    pub fn glyphs(&self) -> &[(String, CanonicalOutline)] {
        &self.glyphs
    }

    /// Looks up an outline by glyph name.
    pub fn outline(&self, name: &str) -> Option<&CanonicalOutline> {
        self.by_name.get(name).map(|ix| &self.glyphs[*ix].1)
    }

    #[cfg(test)]
    pub(crate) fn for_tests(glyphs: Vec<(String, CanonicalOutline)>) -> Self {
        let by_name = glyphs
            .iter()
            .enumerate()
            .map(|(ix, (name, _))| (name.clone(), ix))
            .collect();
        Self {
            num_glyphs: glyphs.len() as u16,
            units_per_em: 1000,
            font_revision: Fixed::from_f64(1.0),
            x_min: 0,
            y_min: -200,
            x_max: 1000,
            y_max: 800,
            s_typo_ascender: 800,
            s_typo_descender: -200,
            family_name: Some("Test Family".into()),
            glyphs,
            by_name,
        }
    }
}

/// Resolves a glyph name from the `post` table, synthesizing `gidNNN` when
/// no name is available (the same fallback skrifa uses).
fn glyph_name(post: Option<&Post>, gid: u16) -> String {
    post.and_then(|post| post.glyph_name(GlyphId16::new(gid)))
        .map(str::to_owned)
        .unwrap_or_else(|| format!("gid{gid}"))
}

impl std::fmt::Debug for FontSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSnapshot")
            .field("num_glyphs", &self.num_glyphs)
            .field("units_per_em", &self.units_per_em)
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}
