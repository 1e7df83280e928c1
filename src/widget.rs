//! Star widget state machine.
//!
//! The rating input is the only store of the committed value. The widget keeps
//! nothing but whether a hover preview is currently painted; every render is
//! recomputed from scratch.

use crate::rating::{parse_rating_input, Rating};
use crate::stars::{render, StarGlyph};

/// The underlying form field holding the committed rating.
pub trait RatingField {
    fn read(&self) -> String;
    fn write(&mut self, value: &str);
}

/// Where the star glyphs are painted.
pub trait StarSurface {
    /// `glyphs[0]` is star 1.
    fn paint(&mut self, glyphs: &[StarGlyph]);
}

/// A pointer event that landed on a star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarHit {
    /// 1-based star position.
    pub position: u8,
    /// Pointer x relative to the star's left edge.
    pub offset_x: f64,
    /// Rendered width of the star.
    pub width: f64,
}

impl StarHit {
    pub fn candidate(&self) -> Rating {
        Rating::from_pointer(self.position, self.offset_x, self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetMode {
    #[default]
    Committed,
    Previewing(Rating),
}

pub struct StarWidget<F, S> {
    field: F,
    surface: S,
    max_stars: u8,
    mode: WidgetMode,
}

impl<F: RatingField, S: StarSurface> StarWidget<F, S> {
    pub fn new(field: F, surface: S, max_stars: u8) -> Self {
        Self {
            field,
            surface,
            max_stars,
            mode: WidgetMode::Committed,
        }
    }

    pub fn mode(&self) -> WidgetMode {
        self.mode
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Committed value as the input currently reads.
    pub fn committed_value(&self) -> f64 {
        parse_rating_input(&self.field.read())
    }

    /// Initial paint from whatever the server rendered into the input.
    pub fn mount(&mut self) {
        self.mode = WidgetMode::Committed;
        self.paint(self.committed_value());
    }

    /// Commit the clicked half/whole value. Clicking the value that is already
    /// committed clears the rating to 0.
    pub fn click(&mut self, hit: StarHit) -> Rating {
        let candidate = hit.candidate();
        let committed = if self.committed_value() == candidate.as_f64() {
            tracing::debug!(rating = %candidate, "rating cleared");
            self.field.write("0");
            Rating::ZERO
        } else {
            tracing::debug!(rating = %candidate, "rating committed");
            self.field.write(&candidate.to_input_string());
            candidate
        };
        self.mode = WidgetMode::Committed;
        self.paint(committed.as_f64());
        committed
    }

    /// Paint a preview without touching the input.
    pub fn hover(&mut self, hit: StarHit) {
        let candidate = hit.candidate();
        self.mode = WidgetMode::Previewing(candidate);
        self.paint(candidate.as_f64());
    }

    /// Drop any preview and repaint the committed value.
    pub fn leave(&mut self) {
        self.mode = WidgetMode::Committed;
        self.paint(self.committed_value());
    }

    fn paint(&mut self, value: f64) {
        let glyphs = render(value, self.max_stars);
        self.surface.paint(&glyphs);
    }
}
