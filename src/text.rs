//! Text sessions and glyph rasterization for the text tool.

use std::collections::BTreeMap;

use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use egui::{Color32, Pos2, pos2};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::raster::CoverageMask;

/// Horizontal slant applied to italic glyphs, per pixel above the baseline.
const ITALIC_SHEAR: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Font and decoration used when a text session is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub family: String,
    /// Pixel height of the font
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub alignment: TextAlignment,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: FontLibrary::PROPORTIONAL.to_owned(),
            size: 16.0,
            bold: false,
            italic: false,
            underline: false,
            alignment: TextAlignment::Left,
        }
    }
}

/// An in-progress text insertion. The host edits `text`; the canvas only
/// stores it until commit or cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSession {
    pub anchor: Pos2,
    pub text: String,
    pub style: TextStyle,
}

impl TextSession {
    pub fn new(anchor: Pos2, style: TextStyle) -> Self {
        Self {
            anchor,
            text: String::new(),
            style,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Fonts available to the text tool, keyed by family name.
///
/// Built from the fonts egui embeds, so no system font lookup is needed.
pub struct FontLibrary {
    fonts: BTreeMap<String, FontArc>,
}

impl FontLibrary {
    pub const PROPORTIONAL: &'static str = "Proportional";
    pub const MONOSPACE: &'static str = "Monospace";

    pub fn load() -> Self {
        let definitions = egui::FontDefinitions::default();
        let mut fonts = BTreeMap::new();

        for (family, egui_family) in [
            (Self::PROPORTIONAL, egui::FontFamily::Proportional),
            (Self::MONOSPACE, egui::FontFamily::Monospace),
        ] {
            let Some(name) = definitions.families.get(&egui_family).and_then(|names| names.first()) else {
                continue;
            };
            let Some(data) = definitions.font_data.get(name) else {
                continue;
            };
            match FontArc::try_from_vec(data.font.to_vec()) {
                Ok(font) => {
                    fonts.insert(family.to_owned(), font);
                }
                Err(err) => log::error!("cannot parse embedded font {name}: {err}"),
            }
        }

        if fonts.is_empty() {
            log::warn!("no fonts available; the text tool will not draw anything");
        }
        Self { fonts }
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    /// The requested family, falling back to any loaded font.
    pub fn font(&self, family: &str) -> Option<&FontArc> {
        self.fonts.get(family).or_else(|| self.fonts.values().next())
    }
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("families", &self.fonts.keys().collect::<Vec<_>>())
            .finish()
    }
}

struct LaidOutLine {
    glyphs: Vec<(GlyphId, f32)>,
    width: f32,
}

fn layout_line(font: &FontArc, size: f32, line: &str) -> LaidOutLine {
    let scaled = font.as_scaled(size);
    let mut glyphs = Vec::with_capacity(line.len());
    let mut cursor = 0.0;
    let mut previous: Option<GlyphId> = None;
    for ch in line.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = previous {
            cursor += scaled.kern(prev, id);
        }
        glyphs.push((id, cursor));
        cursor += scaled.h_advance(id);
        previous = Some(id);
    }
    LaidOutLine { glyphs, width: cursor }
}

/// Rasterize `text` into `image` in `color`.
///
/// The first baseline sits one line height below `anchor`; each further
/// line one more line height down. Alignment is relative to the widest line.
pub fn draw_text(image: &mut RgbaImage, font: &FontArc, text: &str, style: &TextStyle, anchor: Pos2, color: Color32) {
    let size = style.size.max(1.0);
    let scaled = font.as_scaled(size);
    let line_height = scaled.height();
    let lines: Vec<LaidOutLine> = text.lines().map(|line| layout_line(font, size, line)).collect();
    let block_width = lines.iter().map(|line| line.width).fold(0.0, f32::max);

    let pad = size;
    let Some(mut mask) = CoverageMask::new(
        pos2(anchor.x - pad, anchor.y - pad),
        pos2(
            anchor.x + block_width + pad * 2.0,
            anchor.y + line_height * (lines.len() as f32 + 1.0) + pad,
        ),
        image.width(),
        image.height(),
    ) else {
        return;
    };

    for (index, line) in lines.iter().enumerate() {
        let baseline = anchor.y + line_height * (index as f32 + 1.0);
        let start_x = anchor.x
            + match style.alignment {
                TextAlignment::Left => 0.0,
                TextAlignment::Center => (block_width - line.width) / 2.0,
                TextAlignment::Right => block_width - line.width,
            };

        for &(id, offset) in &line.glyphs {
            let glyph = id.with_scale_and_position(size, point(start_x + offset, baseline));
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let y = bounds.min.y + gy as f32;
                let mut x = bounds.min.x + gx as f32;
                if style.italic {
                    x += (baseline - y) * ITALIC_SHEAR;
                }
                let (px, py) = (x.round() as i32, y.round() as i32);
                mask.add(px, py, coverage);
                if style.bold {
                    mask.add(px + 1, py, coverage);
                }
            });
        }

        if style.underline && line.width > 0.0 {
            let thickness = (size * 0.06).max(1.0).round() as i32;
            let y0 = (baseline + size * 0.1).round() as i32;
            for y in y0..y0 + thickness {
                for x in start_x.floor() as i32..(start_x + line.width).ceil() as i32 {
                    mask.add(x, y, 1.0);
                }
            }
        }
    }

    mask.composite(image, color, true);
}
