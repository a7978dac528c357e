use super::*;

fn sample() -> RenderOutput {
    RenderOutput {
        characters: vec![vec!['a', 'b'], vec![' ', 'c']],
        colors: vec![
            vec!["#ff0000".to_owned(), "#ff0000".to_owned()],
            vec!["#000000".to_owned(), "#00ff00".to_owned()],
        ],
    }
}

#[test]
fn dimensions_and_cell_access() {
    let out = sample();
    assert_eq!((out.width(), out.height()), (2, 2));
    assert_eq!(out.cell(1, 1), Some(('c', "#00ff00")));
    assert_eq!(out.cell(2, 0), None);
    assert_eq!(RenderOutput::default().width(), 0);
}

#[test]
fn text_joins_rows() {
    assert_eq!(sample().to_text(), "ab\n c\n");
}

#[test]
fn ansi_emits_escape_per_color_run() {
    let ansi = sample().to_ansi();
    assert_eq!(
        ansi,
        "\x1b[38;2;255;0;0mab\x1b[0m\n\x1b[38;2;0;0;0m \x1b[38;2;0;255;0mc\x1b[0m\n"
    );
}

#[test]
fn serializes_chars_as_strings() {
    let v = serde_json::to_value(sample()).unwrap();
    assert_eq!(v["characters"][0][1], "b");
    assert_eq!(v["colors"][1][1], "#00ff00");
}

#[test]
fn ansi_repeats_escape_after_each_line_reset() {
    let out = RenderOutput {
        characters: vec![vec!['x'], vec!['y']],
        colors: vec![vec!["#0a0b0c".to_owned()], vec!["#0a0b0c".to_owned()]],
    };
    assert_eq!(
        out.to_ansi(),
        "\x1b[38;2;10;11;12mx\x1b[0m\n\x1b[38;2;10;11;12my\x1b[0m\n"
    );
}
