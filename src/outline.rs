//! Canonical, order-preserving capture of glyph outlines.
//!
//! Encoders are free to pick different byte representations for the same
//! shape (point deltas, contour start points, transformed glyf data), but a
//! correct encoder must reproduce the same sequence of drawing commands when
//! the glyph is replayed. The recording pen captures that sequence verbatim:
//! no simplification, no curve fitting, no reordering.

use skrifa::outline::OutlinePen;

/// A single drawing command with coordinates in font units.
///
/// Unscaled TrueType outlines are integral except for implied on-curve
/// midpoints, which sit on half units and round identically on both sides
/// of a comparison.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PathCommand {
    MoveTo { x: i32, y: i32 },
    LineTo { x: i32, y: i32 },
    QuadTo { cx0: i32, cy0: i32, x: i32, y: i32 },
    CurveTo { cx0: i32, cy0: i32, cx1: i32, cy1: i32, x: i32, y: i32 },
    Close,
}

/// An ordered command sequence capturing a glyph's drawn shape.
///
/// Two outlines are equal iff their command sequences are equal element for
/// element. This is the canonical substitute for "same visual shape".
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct CanonicalOutline(Vec<PathCommand>);

impl CanonicalOutline {
    pub fn commands(&self) -> &[PathCommand] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PathCommand> for CanonicalOutline {
    fn from_iter<T: IntoIterator<Item = PathCommand>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Pen that records drawing commands in replay order.
#[derive(Default)]
pub struct RecordingPen {
    commands: Vec<PathCommand>,
}

impl RecordingPen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_outline(self) -> CanonicalOutline {
        CanonicalOutline(self.commands)
    }
}

fn units(value: f32) -> i32 {
    value.round() as i32
}

impl OutlinePen for RecordingPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::MoveTo {
            x: units(x),
            y: units(y),
        });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo {
            x: units(x),
            y: units(y),
        });
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::QuadTo {
            cx0: units(cx0),
            cy0: units(cy0),
            x: units(x),
            y: units(y),
        });
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::CurveTo {
            cx0: units(cx0),
            cy0: units(cy0),
            cx1: units(cx1),
            cy1: units(cy1),
            x: units(x),
            y: units(y),
        });
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PathCommand::*;

    fn draw_sample(pen: &mut RecordingPen) {
        pen.move_to(10.0, 20.0);
        pen.line_to(100.0, 20.0);
        pen.quad_to(120.0, 40.0, 100.0, 60.0);
        pen.curve_to(80.0, 70.0, 40.0, 70.0, 10.0, 60.0);
        pen.close();
    }

    #[test]
    fn records_commands_in_draw_order() {
        let mut pen = RecordingPen::new();
        draw_sample(&mut pen);
        assert_eq!(
            pen.into_outline().commands(),
            &[
                MoveTo { x: 10, y: 20 },
                LineTo { x: 100, y: 20 },
                QuadTo {
                    cx0: 120,
                    cy0: 40,
                    x: 100,
                    y: 60
                },
                CurveTo {
                    cx0: 80,
                    cy0: 70,
                    cx1: 40,
                    cy1: 70,
                    x: 10,
                    y: 60
                },
                Close,
            ]
        );
    }

    #[test]
    fn replay_is_deterministic() {
        let mut first = RecordingPen::new();
        let mut second = RecordingPen::new();
        draw_sample(&mut first);
        draw_sample(&mut second);
        assert_eq!(first.into_outline(), second.into_outline());
    }

    #[test]
    fn close_is_preserved_not_synthesized() {
        let mut pen = RecordingPen::new();
        pen.move_to(0.0, 0.0);
        pen.line_to(10.0, 0.0);
        // No close: an open subpath stays open.
        let outline = pen.into_outline();
        assert_eq!(
            outline.commands(),
            &[MoveTo { x: 0, y: 0 }, LineTo { x: 10, y: 0 }]
        );
    }

    #[test]
    fn half_unit_midpoints_round() {
        // Implied on-curve points between two off-curve points can land on
        // half units; a quad through (7.5, 9.5) records as (8, 10) on both
        // sides of any comparison.
        let mut pen = RecordingPen::new();
        pen.move_to(0.0, 0.0);
        pen.quad_to(4.0, 4.0, 7.5, 9.5);
        let outline = pen.into_outline();
        assert_eq!(
            outline.commands()[1],
            QuadTo {
                cx0: 4,
                cy0: 4,
                x: 8,
                y: 10
            }
        );
    }

    #[test]
    fn empty_outline_is_empty() {
        let outline = RecordingPen::new().into_outline();
        assert!(outline.is_empty());
        assert_eq!(outline.len(), 0);
    }
}
