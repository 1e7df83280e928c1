/// Rendered state of one star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarGlyph {
    Empty,
    Half,
    Full,
}

impl StarGlyph {
    /// Glyph for the 1-based star `position` at rating `value`.
    pub fn for_position(value: f64, position: u8) -> Self {
        let p = f64::from(position);
        if value >= p {
            StarGlyph::Full
        } else if value >= p - 0.5 {
            StarGlyph::Half
        } else {
            StarGlyph::Empty
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            StarGlyph::Empty => "☆",
            StarGlyph::Half => "🌗",
            StarGlyph::Full => "★",
        }
    }
}

/// Glyphs for positions `1..=max_stars`.
pub fn render(value: f64, max_stars: u8) -> Vec<StarGlyph> {
    (1..=max_stars)
        .map(|i| StarGlyph::for_position(value, i))
        .collect()
}

/// Star position from a `data-value` attribute.
///
/// Returns `None` unless the attribute holds an integer in `1..=max_stars`;
/// pointer events on anything else are ignored.
pub fn parse_star_position(raw: Option<&str>, max_stars: u8) -> Option<u8> {
    let p = raw?.trim().parse::<u8>().ok()?;
    (1..=max_stars).contains(&p).then_some(p)
}
