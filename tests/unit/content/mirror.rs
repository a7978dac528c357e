use super::*;
use crate::content::cell::{ContentSource, DEFAULT_TRANSPARENT_CHAR};

fn content(lines: &[&str]) -> Content {
    ContentSource::lines(lines)
        .normalize(DEFAULT_TRANSPARENT_CHAR)
        .unwrap()
}

#[test]
fn mirror_tables_are_involutions() {
    for c in "()[]{}<>/\\^v←→↑↓┌┐└┘├┤┬┴╭╮╰╯╔╗╚╝▀▄▌▐xyz#".chars() {
        assert_eq!(mirror_horizontal(mirror_horizontal(c)), c, "{c}");
        assert_eq!(mirror_vertical(mirror_vertical(c)), c, "{c}");
    }
}

#[test]
fn unmapped_glyphs_are_unchanged() {
    for c in ['#', 'a', '─', '│', '*'] {
        assert_eq!(mirror_horizontal(c), c);
        assert_eq!(mirror_vertical(c), c);
    }
}

#[test]
fn horizontal_flip_reverses_columns() {
    let mut c = content(&["ab ", "cd\0"]);
    flip_horizontal(&mut c, false);
    assert_eq!(
        c.to_rows(),
        vec![
            vec![Cell::Space, Cell::Glyph('b'), Cell::Glyph('a')],
            vec![Cell::Transparent, Cell::Glyph('d'), Cell::Glyph('c')],
        ]
    );
}

#[test]
fn vertical_flip_reverses_rows() {
    let mut c = content(&["ab", "cd", "ef"]);
    flip_vertical(&mut c, false);
    assert_eq!(c.to_lines(), vec!["ef", "cd", "ab"]);
}

#[test]
fn flipping_twice_restores_content() {
    let original = content(&["(/-", "<[┌"]);
    let mut c = original.clone();
    flip_horizontal(&mut c, true);
    assert_ne!(c, original);
    flip_horizontal(&mut c, true);
    assert_eq!(c, original);

    flip_vertical(&mut c, true);
    flip_vertical(&mut c, true);
    assert_eq!(c, original);
}

#[test]
fn mirrored_flip_remaps_glyphs() {
    let mut c = content(&["(=>"]);
    flip_horizontal(&mut c, true);
    assert_eq!(c.to_lines(), vec!["<=)"]);
}

#[test]
fn corner_cycles_through_four_rotations() {
    let mut c = content(&["┌"]);
    let mut seen = Vec::new();
    for step in 0..4 {
        if step % 2 == 0 {
            flip_horizontal(&mut c, true);
        } else {
            flip_vertical(&mut c, true);
        }
        seen.push(c.to_lines()[0].clone());
    }
    assert_eq!(seen, vec!["┐", "┘", "└", "┌"]);
}

#[test]
fn h_then_v_is_a_mirrored_half_turn() {
    let original = content(&["┌─>", "│ /", "└(\0"]);

    let mut flipped = original.clone();
    flip_horizontal(&mut flipped, true);
    flip_vertical(&mut flipped, true);

    let rotated: Vec<Vec<Cell>> = original
        .to_rows()
        .into_iter()
        .rev()
        .map(|row| {
            row.into_iter()
                .rev()
                .map(|cell| match cell {
                    Cell::Glyph(g) => Cell::Glyph(mirror_horizontal(mirror_vertical(g))),
                    other => other,
                })
                .collect()
        })
        .collect();

    assert_eq!(flipped.to_rows(), rotated);
    assert_eq!(flipped.to_lines()[0], " )┐");
}
