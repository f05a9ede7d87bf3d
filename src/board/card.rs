//! Glyph cards and the card library.
//!
//! Each displayable character is a pre-rendered texture triple (background,
//! character, reflection) at a fixed pixel size. Assets are discovered by
//! scanning the texture directory for files named `<stem>_<width>_<height>.png`;
//! dimensions come from the filename, not the image metadata. Punctuation
//! stems are mapped through a fixed ASCII-safe table (`+` -> `plus`, `:` ->
//! `colon`, ...).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::Result;
use crate::host::{Gui, Quad, TextureId, Tint};

/// Width of the whitespace card when no asset overrides it.
const SPACE_WIDTH: f32 = 15.0;
/// Fallback card size for characters without an asset.
const DEFAULT_WIDTH: f32 = 40.0;
const DEFAULT_HEIGHT: f32 = 50.0;

/// Filename stems for punctuation characters.
const CHAR_STEMS: &[(char, &str)] = &[
    ('&', "amp"),
    ('*', "asterisk"),
    ('\\', "bslash"),
    (':', "colon"),
    ('.', "dot"),
    ('|', "downarrow"),
    ('!', "emark"),
    ('=', "equal"),
    ('>', "gt"),
    ('(', "lpar"),
    ('<', "lt"),
    ('-', "minus"),
    ('#', "num"),
    ('+', "plus"),
    ('?', "qmark"),
    (')', "rpar"),
    ('^', "uparrow"),
    ('_', "uscore"),
];

/// Asset filename stem for a character, `None` for characters the board
/// does not display.
pub fn glyph_stem(ch: char) -> Option<String> {
    if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
        return Some(ch.to_string());
    }
    CHAR_STEMS.iter().find(|(c, _)| *c == ch).map(|(_, stem)| (*stem).to_string())
}

/// Parse `<stem>_<width>_<height>.png` into (stem, width, height).
pub(crate) fn parse_asset_name(file_name: &str) -> Option<(&str, u32, u32)> {
    let base = file_name.strip_suffix(".png")?;
    let (rest, height) = base.rsplit_once('_')?;
    let (stem, width) = rest.rsplit_once('_')?;
    if stem.is_empty() {
        return None;
    }
    Some((stem, width.parse().ok()?, height.parse().ok()?))
}

/// A single letter or symbol on the board.
#[derive(Debug, Clone, Copy)]
pub struct Card {
    pub ch: char,
    /// Unscaled pixel width; rows budget against this.
    pub width: f32,
    pub height: f32,
    texture: Option<TextureId>,
    background: TextureId,
    reflection: TextureId,
}

impl Card {
    /// Draw the card at an absolute position. The character layer takes the
    /// text colour; background and reflection stay white.
    pub fn render(
        &self,
        gui: &mut dyn Gui,
        x: f32,
        y: f32,
        opacity: f32,
        scale: f32,
        colour: (f32, f32, f32),
    ) {
        let Some(texture) = self.texture else {
            return;
        };
        let quad =
            Quad { x, y, width: self.width * scale, height: self.height * scale };

        gui.draw_quad(quad, self.background, Tint::white(opacity));
        let (r, g, b) = colour;
        gui.draw_quad(quad, texture, Tint::new(r, g, b, opacity));
        gui.draw_quad(quad, self.reflection, Tint::white(opacity));
    }
}

/// Immutable mapping from character to card, built once at startup.
///
/// Characters whose asset is missing still get a card (blank texture, default
/// size) so layout width accounting stays consistent; lookups for characters
/// outside the set fall back to the `?` card.
#[derive(Debug, Clone)]
pub struct GlyphLibrary {
    cards: HashMap<char, Card>,
}

impl GlyphLibrary {
    /// Build the library by scanning `tex_dir` for card assets.
    pub fn load(gui: &mut dyn Gui, tex_dir: &Path) -> Result<Self> {
        let background = gui.load_texture(&tex_dir.join("card_bg.png"))?;
        let reflection = gui.load_texture(&tex_dir.join("card_reflect.png"))?;

        let assets = Self::scan_assets(tex_dir);
        let mut cards = HashMap::new();

        let chars = ('A'..='Z')
            .chain('0'..='9')
            .chain(CHAR_STEMS.iter().map(|(c, _)| *c))
            .chain(std::iter::once(' '));

        for ch in chars {
            let asset = glyph_stem(ch).and_then(|stem| assets.get(stem.as_str()));
            let card = match asset {
                Some((path, w, h)) => Card {
                    ch,
                    width: *w as f32,
                    height: *h as f32,
                    texture: Some(gui.load_texture(path)?),
                    background,
                    reflection,
                },
                None => {
                    if ch != ' ' {
                        warn!(%ch, "no card asset, using blank glyph");
                    }
                    Card {
                        ch,
                        width: if ch == ' ' { SPACE_WIDTH } else { DEFAULT_WIDTH },
                        height: DEFAULT_HEIGHT,
                        texture: None,
                        background,
                        reflection,
                    }
                }
            };
            cards.insert(ch, card);
        }

        debug!(cards = cards.len(), "glyph library built");
        Ok(GlyphLibrary { cards })
    }

    fn scan_assets(tex_dir: &Path) -> HashMap<String, (PathBuf, u32, u32)> {
        let mut assets = HashMap::new();
        let Ok(entries) = fs::read_dir(tex_dir) else {
            warn!(dir = %tex_dir.display(), "cannot scan texture directory");
            return assets;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some((stem, w, h)) = parse_asset_name(name) {
                assets.entry(stem.to_string()).or_insert((path.clone(), w, h));
            }
        }
        assets
    }

    /// Card for a character, falling back to the `?` glyph.
    ///
    /// Panics only if the library was somehow built without `?`, which the
    /// fixed charset makes impossible.
    pub fn card(&self, ch: char) -> &Card {
        self.cards.get(&ch).unwrap_or_else(|| &self.cards[&'?'])
    }

    /// Whether the character has its own card (no fallback involved).
    pub fn contains(&self, ch: char) -> bool {
        self.cards.contains_key(&ch)
    }

    #[cfg(test)]
    pub(crate) fn from_cards(cards: HashMap<char, Card>) -> Self {
        GlyphLibrary { cards }
    }
}

#[cfg(test)]
pub(crate) fn test_card(ch: char, width: f32) -> Card {
    Card {
        ch,
        width,
        height: DEFAULT_HEIGHT,
        texture: Some(TextureId(u64::from(ch as u32))),
        background: TextureId(9000),
        reflection: TextureId(9001),
    }
}
