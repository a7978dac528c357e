use std::collections::VecDeque;

use crate::content::cell::{Cell, Content};

/// Turn every opaque space reachable from the grid border into a transparent cell.
///
/// The fill is 4-connected and seeded from all border spaces at once. Glyphs and spaces
/// enclosed by glyphs are left untouched, so a hollow ring keeps its inner space opaque while
/// the area around it becomes see-through. An all-space grid becomes fully transparent.
pub fn detect_edges(content: &mut Content) {
    let (w, h) = (content.width(), content.height());
    let mut queue = VecDeque::new();

    let mut seed = |content: &mut Content, col: usize, row: usize| {
        if content.get(col, row) == Some(Cell::Space) {
            content.set(col, row, Cell::Transparent);
            queue.push_back((col, row));
        }
    };

    for col in 0..w {
        seed(content, col, 0);
        seed(content, col, h - 1);
    }
    for row in 0..h {
        seed(content, 0, row);
        seed(content, w - 1, row);
    }

    while let Some((col, row)) = queue.pop_front() {
        let neighbors = [
            (col.checked_sub(1), Some(row)),
            (col.checked_add(1), Some(row)),
            (Some(col), row.checked_sub(1)),
            (Some(col), row.checked_add(1)),
        ];
        for (nc, nr) in neighbors {
            let (Some(nc), Some(nr)) = (nc, nr) else {
                continue;
            };
            if content.get(nc, nr) == Some(Cell::Space) {
                content.set(nc, nr, Cell::Transparent);
                queue.push_back((nc, nr));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/edges.rs"]
mod tests;
