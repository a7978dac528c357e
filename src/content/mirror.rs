use crate::content::cell::{Cell, Content};

/// Glyph pairs swapped by a left-right mirror.
const HORIZONTAL_PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('<', '>'),
    ('/', '\\'),
    ('←', '→'),
    ('↖', '↗'),
    ('↙', '↘'),
    ('◀', '▶'),
    ('▌', '▐'),
    ('┌', '┐'),
    ('└', '┘'),
    ('├', '┤'),
    ('╭', '╮'),
    ('╰', '╯'),
    ('╔', '╗'),
    ('╚', '╝'),
    ('╠', '╣'),
    ('┏', '┓'),
    ('┗', '┛'),
    ('╱', '╲'),
];

/// Glyph pairs swapped by a top-bottom mirror.
const VERTICAL_PAIRS: &[(char, char)] = &[
    ('/', '\\'),
    ('^', 'v'),
    ('↑', '↓'),
    ('↖', '↙'),
    ('↗', '↘'),
    ('▲', '▼'),
    ('▀', '▄'),
    ('┌', '└'),
    ('┐', '┘'),
    ('┬', '┴'),
    ('╭', '╰'),
    ('╮', '╯'),
    ('╔', '╚'),
    ('╗', '╝'),
    ('╦', '╩'),
    ('┏', '┗'),
    ('┓', '┛'),
    ('╱', '╲'),
];

fn swap(pairs: &[(char, char)], c: char) -> char {
    for &(a, b) in pairs {
        if c == a {
            return b;
        }
        if c == b {
            return a;
        }
    }
    c
}

/// Left-right mirror image of a glyph; unmapped glyphs are returned unchanged.
pub fn mirror_horizontal(c: char) -> char {
    swap(HORIZONTAL_PAIRS, c)
}

/// Top-bottom mirror image of a glyph; unmapped glyphs are returned unchanged.
pub fn mirror_vertical(c: char) -> char {
    swap(VERTICAL_PAIRS, c)
}

/// Reverse every row in place, optionally mirroring directional glyphs.
pub fn flip_horizontal(content: &mut Content, mirror_glyphs: bool) {
    let w = content.width();
    for row in content.cells_mut().chunks_exact_mut(w) {
        row.reverse();
    }
    if mirror_glyphs {
        remap(content, mirror_horizontal);
    }
}

/// Reverse the row order in place, optionally mirroring directional glyphs.
pub fn flip_vertical(content: &mut Content, mirror_glyphs: bool) {
    let (w, h) = (content.width(), content.height());
    let cells = content.cells_mut();
    for row in 0..h / 2 {
        let other = h - 1 - row;
        for col in 0..w {
            cells.swap(row * w + col, other * w + col);
        }
    }
    if mirror_glyphs {
        remap(content, mirror_vertical);
    }
}

fn remap(content: &mut Content, f: fn(char) -> char) {
    for cell in content.cells_mut() {
        if let Cell::Glyph(c) = *cell {
            *cell = Cell::Glyph(f(c));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/mirror.rs"]
mod tests;
