use super::*;
use crate::content::cell::DEFAULT_TRANSPARENT_CHAR;
use crate::effects::influence::{InfluenceTransform, TransformKind};

fn build(opts: ObjectOptions) -> AsciiObject {
    AsciiObject::build("obj", &opts, DEFAULT_TRANSPARENT_CHAR).unwrap()
}

fn glow(radius: u32) -> Influence {
    Influence::new(
        radius,
        InfluenceTransform::new(TransformKind::Lighten, 1.0),
    )
}

#[test]
fn defaults_are_black_on_layer_zero() {
    let obj = build(ObjectOptions::new("#"));
    let snap = obj.snapshot();
    assert_eq!(snap.color, "#000000");
    assert_eq!(snap.layer, 0);
    assert_eq!(snap.position, Position::new(0, 0));
    assert!(snap.influence.is_none());
    assert_eq!(snap.bounds, Bounds::new(0, 0, 1, 1));
}

#[test]
fn color_is_normalized_and_errors_name_the_object() {
    let obj = build(ObjectOptions::new("#").color("ABCDEF"));
    assert_eq!(obj.snapshot().color, "#abcdef");

    let err = AsciiObject::build(
        "ship",
        &ObjectOptions::new("#").color("blue"),
        DEFAULT_TRANSPARENT_CHAR,
    )
    .unwrap_err();
    assert!(err.to_string().contains("'ship'"));
}

#[test]
fn bounds_include_influence_radius() {
    let mut obj = build(ObjectOptions::new(vec!["###", "###"]).at(5, -2).influence(glow(2)));
    assert_eq!(obj.bounds(), Bounds::new(3, -4, 7, 6));

    obj.set_position(Position::new(0, 0));
    assert_eq!(obj.bounds(), Bounds::new(-2, -2, 7, 6));

    obj.set_influence(None);
    assert_eq!(obj.bounds(), Bounds::new(0, 0, 3, 2));
}

#[test]
fn sample_maps_world_cells_through_the_mask() {
    let mut obj = build(ObjectOptions::new("#\0").at(10, 10).influence(glow(1)));
    assert_eq!(obj.sample(10, 10), Sample::None, "mask not built yet");

    obj.ensure_mask();
    assert_eq!(obj.sample(10, 10), Sample::Full(Cell::Glyph('#')));
    assert!(matches!(obj.sample(11, 10), Sample::Partial(_)));
    assert!(matches!(obj.sample(9, 10), Sample::Partial(_)));
    assert_eq!(obj.sample(8, 10), Sample::None);
    assert_eq!(obj.sample(-100, i32::MIN), Sample::None);
}

#[test]
fn influence_change_invalidates_mask() {
    let mut obj = build(ObjectOptions::new("#"));
    assert_eq!(obj.ensure_mask().padding(), 0);

    obj.set_influence(Some(glow(3)));
    assert_eq!(obj.ensure_mask().padding(), 3);
}

#[test]
fn flips_toggle_state_and_keep_mask_consistent() {
    let mut obj = build(
        ObjectOptions::new(vec!["#\0", "##"])
            .influence(glow(2))
            .mirror_glyphs(true),
    );
    obj.ensure_mask();

    obj.toggle_flip_horizontal();
    assert_eq!(obj.flip_state(), (true, false));
    let flipped_mask = obj.ensure_mask().clone();
    assert_eq!(
        flipped_mask,
        InfluenceMask::generate(&obj.content, obj.influence.as_ref())
    );

    obj.toggle_flip_horizontal();
    assert_eq!(obj.flip_state(), (false, false));
    assert_eq!(obj.content, obj.source);
}

#[test]
fn set_content_reapplies_current_flips() {
    let mut obj = build(ObjectOptions::new("ab").mirror_glyphs(true));
    obj.toggle_flip_horizontal();
    assert_eq!(obj.snapshot().content, vec![vec![Cell::Glyph('b'), Cell::Glyph('a')]]);

    let next = prepare_content(&ContentSource::from("(x"), DEFAULT_TRANSPARENT_CHAR, false).unwrap();
    obj.set_content(next);
    assert_eq!(
        obj.snapshot().content,
        vec![vec![Cell::Glyph('x'), Cell::Glyph(')')]]
    );

    obj.toggle_flip_horizontal();
    assert_eq!(
        obj.snapshot().content,
        vec![vec![Cell::Glyph('('), Cell::Glyph('x')]]
    );
}

#[test]
fn prepare_content_runs_edge_detection_on_request() {
    let src = ContentSource::from(vec![" # ", "# #", " # "]);
    let plain = prepare_content(&src, DEFAULT_TRANSPARENT_CHAR, false).unwrap();
    let detected = prepare_content(&src, DEFAULT_TRANSPARENT_CHAR, true).unwrap();
    assert_eq!(plain.opaque_count(), 9);
    assert_eq!(detected.opaque_count(), 5);
}

#[test]
fn tint_follows_color_for_multiply() {
    let inf = Influence::new(1, InfluenceTransform::new(TransformKind::Multiply, 0.5));
    let mut obj = build(ObjectOptions::new("#").color("#ff0000").influence(inf));
    assert_eq!(obj.tint().map(|t| t.target), Some(Rgb::new(255, 0, 0)));

    obj.set_color(Rgb::new(0, 0, 255));
    assert_eq!(obj.tint().map(|t| t.target), Some(Rgb::new(0, 0, 255)));
}

#[test]
fn cell_at_reads_content_without_a_mask() {
    let obj = build(ObjectOptions::new(vec!["#\0", " x"]).at(-1, 3));
    assert_eq!(obj.cell_at(-1, 3), Some(Cell::Glyph('#')));
    assert_eq!(obj.cell_at(0, 3), Some(Cell::Transparent));
    assert_eq!(obj.cell_at(-1, 4), Some(Cell::Space));
    assert_eq!(obj.cell_at(-2, 3), None);
    assert_eq!(obj.cell_at(1, 4), None);
}

#[test]
fn sample_rejects_cells_outside_bounds() {
    let mut obj = build(ObjectOptions::new(vec!["# ", "\0#"]).at(-3, 2).influence(glow(1)));
    obj.ensure_mask();
    assert_eq!(obj.opaque_count(), 3);

    let b = obj.bounds();
    assert_eq!(b, Bounds::new(-4, 1, 4, 4));
    for (x, y) in [(-5, 2), (0, 2), (-3, 0), (-3, 5)] {
        assert!(!b.contains(x, y));
        assert_eq!(obj.sample(x, y), Sample::None, "({x},{y})");
    }
    assert_eq!(obj.sample(-3, 2), Sample::Full(Cell::Glyph('#')));
    assert!(matches!(obj.sample(-4, 2), Sample::Partial(_)));
}
