use std::fmt::Write as _;

use crate::foundation::color::Rgb;

/// Rendered viewport: one character and one `#rrggbb` color per cell, row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderOutput {
    /// Character rows.
    pub characters: Vec<Vec<char>>,
    /// Color rows, same dimensions as `characters`.
    pub colors: Vec<Vec<String>>,
}

impl RenderOutput {
    /// Width in cells.
    pub fn width(&self) -> usize {
        self.characters.first().map_or(0, Vec::len)
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.characters.len()
    }

    /// Character and color at `(col, row)`.
    pub fn cell(&self, col: usize, row: usize) -> Option<(char, &str)> {
        let c = *self.characters.get(row)?.get(col)?;
        let color = self.colors.get(row)?.get(col)?;
        Some((c, color.as_str()))
    }

    /// Characters joined into newline-terminated lines.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.height() * (self.width() + 1));
        for row in &self.characters {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }

    /// Characters with 24-bit ANSI foreground colors.
    ///
    /// An escape is emitted only when the color changes along a row, and every row ends with
    /// a reset.
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for (chars, colors) in self.characters.iter().zip(&self.colors) {
            let mut current: Option<&str> = None;
            for (c, color) in chars.iter().zip(colors) {
                if current != Some(color.as_str()) {
                    let rgb = Rgb::parse_hex(color, "render color").unwrap_or_default();
                    // Writing into a String is infallible.
                    let _ = write!(out, "\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b);
                    current = Some(color.as_str());
                }
                out.push(*c);
            }
            out.push_str("\x1b[0m\n");
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/output.rs"]
mod tests;
