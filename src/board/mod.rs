//! The pit board: fixed rows of glyph cards over a board texture.

mod card;
mod text;

pub use card::{Card, GlyphLibrary, glyph_stem};
pub use text::{BoardText, DEFAULT_COLOUR, palette};

use std::path::Path;

use tracing::debug;

use crate::Result;
use crate::host::{Gui, Quad, TextureId, Tint};
use crate::prefs::{OrientationX, OrientationY};

/// Board texture size at scale 1.0.
pub const BOARD_WIDTH: f32 = 260.0;
pub const BOARD_HEIGHT: f32 = 440.0;

/// Row geometry at scale 1.0: left margin, first row offset, row pitch.
const ROW_X: f32 = 10.0;
const ROW_FIRST_Y: f32 = 80.0;
const ROW_PITCH: f32 = 60.0;
const ROW_COUNT: usize = 6;
/// Pixel budget per row.
const ROW_MAX_WIDTH: f32 = 240.0;

/// One row of cards with a fixed position and width budget.
///
/// Rows are rebuilt from scratch on every text push; a character whose card
/// would overflow the budget stops the row (hard truncation, no wrapping).
#[derive(Debug, Clone)]
pub struct Row {
    x: f32,
    y: f32,
    max_width: f32,
    width: f32,
    cards: Vec<(Card, (f32, f32, f32))>,
}

impl Row {
    fn new(x: f32, y: f32, max_width: f32) -> Self {
        Row { x, y, max_width, width: 0.0, cards: Vec::new() }
    }

    /// Replace the row's content, resolving cards from the library and
    /// truncating at the width budget.
    pub fn set_text(&mut self, text: &BoardText, library: &GlyphLibrary) {
        self.cards.clear();
        self.width = 0.0;

        for (ch, colour) in text.chars() {
            let card = *library.card(ch);
            if self.width + card.width > self.max_width {
                break;
            }
            self.width += card.width;
            self.cards.push((card, colour));
        }
    }

    /// Accumulated unscaled width of the laid-out cards.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Laid-out cards with their colours.
    pub fn cards(&self) -> &[(Card, (f32, f32, f32))] {
        &self.cards
    }

    fn render(&self, gui: &mut dyn Gui, opacity: f32, scale: f32, board_x: f32, board_y: f32) {
        let mut x = board_x + self.x * scale;
        let y = board_y + self.y * scale;
        for (card, colour) in &self.cards {
            card.render(gui, x, y, opacity, scale, *colour);
            x += card.width * scale;
        }
    }
}

/// The board itself: six fixed rows, a frame texture and an optional logo.
#[derive(Debug)]
pub struct Board {
    visible: bool,
    rows: Vec<Row>,
    texture: TextureId,
    logo: Option<TextureId>,
}

impl Board {
    /// Load board textures and build the row grid.
    ///
    /// A per-driver board or logo (`board_<name>.png`, `logo_<name>.png`)
    /// takes precedence over the stock asset; the stock board texture is
    /// required, the logo is optional.
    pub fn new(gui: &mut dyn Gui, tex_dir: &Path, driver_name: Option<&str>) -> Result<Self> {
        let texture = gui.load_texture(&Self::personalized(tex_dir, "board", driver_name))?;

        let logo_path = Self::personalized(tex_dir, "logo", driver_name);
        let logo = if logo_path.exists() { Some(gui.load_texture(&logo_path)?) } else { None };

        let rows = (0..ROW_COUNT)
            .map(|i| Row::new(ROW_X, ROW_FIRST_Y + i as f32 * ROW_PITCH, ROW_MAX_WIDTH))
            .collect();

        Ok(Board { visible: false, rows, texture, logo })
    }

    fn personalized(tex_dir: &Path, stem: &str, driver_name: Option<&str>) -> std::path::PathBuf {
        if let Some(name) = driver_name {
            let custom = tex_dir.join(format!("{stem}_{name}.png"));
            if custom.exists() {
                return custom;
            }
        }
        tex_dir.join(format!("{stem}.png"))
    }

    /// Assign lines to rows in order; surplus lines are dropped and
    /// remaining rows blanked.
    pub fn set_lines(&mut self, lines: &[BoardText], library: &GlyphLibrary) {
        debug!(lines = lines.len(), "board text update");
        let blank = BoardText::empty();
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.set_text(lines.get(i).unwrap_or(&blank), library);
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Draw frame, logo and rows. `widget_size` anchors the board relative
    /// to the widget according to the orientation preferences.
    pub fn render(
        &self,
        gui: &mut dyn Gui,
        opacity: f32,
        scale: f32,
        orientation: (OrientationX, OrientationY),
        widget_size: (f32, f32),
    ) {
        if !self.visible {
            return;
        }

        let width = BOARD_WIDTH * scale;
        let height = BOARD_HEIGHT * scale;
        let x = match orientation.0 {
            OrientationX::Left => 0.0,
            OrientationX::Right => widget_size.0 - width,
        };
        let y = match orientation.1 {
            OrientationY::Up => widget_size.1,
            OrientationY::Down => -height,
        };

        gui.draw_quad(Quad { x, y, width, height }, self.texture, Tint::white(opacity));

        if let Some(logo) = self.logo {
            let quad = Quad {
                x: x + 10.0 * scale,
                y: y + 10.0 * scale,
                width: 240.0 * scale,
                height: 60.0 * scale,
            };
            gui.draw_quad(quad, logo, Tint::white(opacity));
        }

        for row in &self.rows {
            row.render(gui, opacity, scale, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::card::test_card;
    use super::*;
    use std::collections::HashMap;

    fn fixed_width_library(chars: &str, width: f32) -> GlyphLibrary {
        let mut cards = HashMap::new();
        for ch in chars.chars() {
            cards.insert(ch, test_card(ch, width));
        }
        GlyphLibrary::from_cards(cards)
    }

    #[test]
    fn row_truncates_at_width_budget() {
        let lib = fixed_width_library("AB?", 40.0);
        let mut row = Row::new(0.0, 0.0, 100.0);
        row.set_text(&BoardText::new("ABABAB"), &lib);
        // Two cards fit in 100px at 40px each; the third would overflow.
        assert_eq!(row.cards().len(), 2);
        assert_eq!(row.width(), 80.0);
    }

    #[test]
    fn row_packs_tightly() {
        // Packing is greedy in order: appending one more input character
        // must always overflow the budget.
        let lib = fixed_width_library("AB?", 30.0);
        let mut row = Row::new(0.0, 0.0, 95.0);
        row.set_text(&BoardText::new("AAAAAA"), &lib);
        assert_eq!(row.cards().len(), 3);
        assert!(row.width() + 30.0 > 95.0);
        assert!(row.width() <= 95.0);
    }

    #[test]
    fn row_layout_is_idempotent() {
        let lib = fixed_width_library("ABC?", 40.0);
        let mut row = Row::new(0.0, 0.0, 240.0);
        row.set_text(&BoardText::coloured("ABC", "gry"), &lib);
        let first: Vec<char> = row.cards().iter().map(|(c, _)| c.ch).collect();
        let first_width = row.width();

        row.set_text(&BoardText::coloured("ABC", "gry"), &lib);
        let second: Vec<char> = row.cards().iter().map(|(c, _)| c.ch).collect();
        assert_eq!(first, second);
        assert_eq!(first_width, row.width());
    }

    #[test]
    fn unknown_glyphs_map_to_placeholder() {
        let lib = fixed_width_library("ABC?", 40.0);
        let mut row = Row::new(0.0, 0.0, 1000.0);
        row.set_text(&BoardText::new("AXB"), &lib);
        let chars: Vec<char> = row.cards().iter().map(|(c, _)| c.ch).collect();
        assert_eq!(chars, vec!['A', '?', 'B']);
    }

    #[test]
    fn surplus_lines_are_dropped_and_rest_blanked() {
        let lib = fixed_width_library("AB?", 40.0);
        let mut rows: Vec<Row> =
            (0..3).map(|i| Row::new(0.0, i as f32 * 60.0, 240.0)).collect();

        // Simulate Board::set_lines against a 3-row board.
        let lines = [BoardText::new("A"), BoardText::new("B")];
        let blank = BoardText::empty();
        for (i, row) in rows.iter_mut().enumerate() {
            row.set_text(lines.get(i).unwrap_or(&blank), &lib);
        }
        assert_eq!(rows[0].cards().len(), 1);
        assert_eq!(rows[1].cards().len(), 1);
        assert!(rows[2].cards().is_empty());
    }

    mod property {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn accumulated_width_never_exceeds_budget(
                text in "[A-Z0-9 ]{0,40}",
                max_width in 10.0f32..400.0,
                card_width in 5.0f32..60.0
            ) {
                let lib = fixed_width_library(
                    "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 ?",
                    card_width,
                );
                let mut row = Row::new(0.0, 0.0, max_width);
                row.set_text(&BoardText::new(text.clone()), &lib);

                prop_assert!(row.width() <= max_width);
                // Tight packing: if input remains, one more card overflows.
                if row.cards().len() < text.chars().count() {
                    prop_assert!(row.width() + card_width > max_width);
                }
            }
        }
    }
}
