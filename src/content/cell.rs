use crate::foundation::error::{GlyphError, GlyphResult};

/// Character used in textual content to mark a transparent cell unless configured otherwise.
pub const DEFAULT_TRANSPARENT_CHAR: char = '\0';

/// One grid position of an object's content.
///
/// `Space` and `Transparent` both render nothing themselves, but only `Space` blocks the
/// layers below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cell {
    /// A visible, non-space character.
    Glyph(char),
    /// An opaque space.
    Space,
    /// No content; lower layers show through.
    Transparent,
}

impl Cell {
    /// Classify a raw character.
    pub fn from_char(c: char, transparent: char) -> Self {
        if c == transparent {
            Cell::Transparent
        } else if c == ' ' {
            Cell::Space
        } else {
            Cell::Glyph(c)
        }
    }

    /// Return `true` for glyphs and opaque spaces.
    pub fn is_opaque(self) -> bool {
        !matches!(self, Cell::Transparent)
    }

    /// The character drawn for this cell; transparent cells draw as a space.
    pub fn as_char(self) -> char {
        match self {
            Cell::Glyph(c) => c,
            Cell::Space | Cell::Transparent => ' ',
        }
    }
}

/// Accepted input shapes for object content.
///
/// The textual shapes (`Grid`, `Lines`, `Text`) normalize to identical grids for equivalent
/// input.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ContentSource {
    /// Newline-delimited string (`\n` or `\r\n`; one trailing newline is ignored).
    Text(String),
    /// Equal-length strings, one per row.
    Lines(Vec<String>),
    /// Rows of raw characters.
    Grid(Vec<Vec<char>>),
    /// Rows of already classified cells, passed through unchanged.
    Cells(Vec<Vec<Cell>>),
}

impl ContentSource {
    /// Build a [`ContentSource::Lines`] from any iterator of strings.
    pub fn lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::Lines(lines.into_iter().map(|l| l.as_ref().to_owned()).collect())
    }

    /// Normalize into a rectangular, non-empty [`Content`] grid.
    ///
    /// `transparent` is the character that marks transparent cells in the textual shapes.
    pub fn normalize(&self, transparent: char) -> GlyphResult<Content> {
        let rows: Vec<Vec<Cell>> = match self {
            ContentSource::Text(text) => {
                let unified = text.replace("\r\n", "\n");
                let body = unified.strip_suffix('\n').unwrap_or(unified.as_str());
                if body.is_empty() {
                    Vec::new()
                } else {
                    body.split('\n')
                        .map(|line| classify(line.chars(), transparent))
                        .collect()
                }
            }
            ContentSource::Lines(lines) => lines
                .iter()
                .map(|line| classify(line.chars(), transparent))
                .collect(),
            ContentSource::Grid(grid) => grid
                .iter()
                .map(|row| classify(row.iter().copied(), transparent))
                .collect(),
            ContentSource::Cells(cells) => cells.clone(),
        };
        Content::from_rows(rows)
    }
}

impl From<&str> for ContentSource {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for ContentSource {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for ContentSource {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

impl From<Vec<&str>> for ContentSource {
    fn from(lines: Vec<&str>) -> Self {
        Self::lines(lines)
    }
}

impl From<Vec<Vec<char>>> for ContentSource {
    fn from(grid: Vec<Vec<char>>) -> Self {
        Self::Grid(grid)
    }
}

impl From<Vec<Vec<Cell>>> for ContentSource {
    fn from(cells: Vec<Vec<Cell>>) -> Self {
        Self::Cells(cells)
    }
}

fn classify(chars: impl Iterator<Item = char>, transparent: char) -> Vec<Cell> {
    chars.map(|c| Cell::from_char(c, transparent)).collect()
}

/// Rectangular, non-empty, row-major grid of [`Cell`]s.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Content {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Content {
    /// Validate and flatten rows into a grid.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> GlyphResult<Self> {
        let Some(first) = rows.first() else {
            return Err(GlyphError::content_format("content must have at least one row"));
        };
        let width = first.len();
        if width == 0 {
            return Err(GlyphError::content_format("content rows must not be empty"));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GlyphError::content_format(format!(
                "content rows must have equal width: row {i} has width {}, expected {width}",
                row.len()
            )));
        }

        let height = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(col, row)`, or `None` when out of range.
    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + col).copied()
    }

    pub(crate) fn set(&mut self, col: usize, row: usize, cell: Cell) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = cell;
        }
    }

    /// Iterate rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    /// Owned copy of the rows.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    /// Rows rendered as text; transparent cells draw as spaces.
    #[cfg(test)]
    pub(crate) fn to_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.as_char()).collect())
            .collect()
    }

    /// Number of glyph or opaque-space cells.
    pub fn opaque_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_opaque()).count()
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/cell.rs"]
mod tests;
