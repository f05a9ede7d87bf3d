//! Board text with optional per-character colours.

/// Default colour applied over a card's character texture.
pub const DEFAULT_COLOUR: char = 'y';

/// RGB for a palette key; unknown keys read as the default yellow.
pub fn palette(key: char) -> (f32, f32, f32) {
    match key {
        'g' => (0.0, 204.0 / 255.0, 0.0),
        'r' => (1.0, 40.0 / 255.0, 0.0),
        'w' => (1.0, 1.0, 1.0),
        _ => (1.0, 204.0 / 255.0, 0.0),
    }
}

/// One line of board text plus its colour string.
///
/// A colour string shorter than the text is padded by repeating its last
/// character, so `"gw"` over `"P1 -2.3"` colours the first card green and
/// the rest white.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardText {
    text: String,
    colours: String,
}

impl BoardText {
    /// Text in the default colour.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let colours = DEFAULT_COLOUR.to_string().repeat(text.chars().count());
        BoardText { text, colours }
    }

    /// Text with a per-character colour string.
    pub fn coloured(text: impl Into<String>, colours: impl Into<String>) -> Self {
        let text = text.into();
        let mut colours: String = colours.into();
        let text_len = text.chars().count();
        let colour_len = colours.chars().count();

        match colours.chars().last() {
            Some(last) if colour_len < text_len => {
                colours.extend(std::iter::repeat_n(last, text_len - colour_len));
            }
            None => colours = DEFAULT_COLOUR.to_string().repeat(text_len),
            _ => {}
        }

        BoardText { text, colours }
    }

    /// Blank line; clears a row.
    pub fn empty() -> Self {
        BoardText::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Characters paired with their palette colour, case-normalized to the
    /// card set's uppercase.
    pub fn chars(&self) -> impl Iterator<Item = (char, (f32, f32, f32))> + '_ {
        self.text
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .zip(self.colours.chars().map(palette))
    }
}
