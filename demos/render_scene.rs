use glyphcomp::{
    Falloff, Influence, InfluenceTransform, LayerEffect, ObjectOptions, Scene, SceneOpts,
    TransformKind, Viewport,
};

const HOUSE: &[&str] = &[
    "    /\\    ",
    "   /  \\   ",
    "  /____\\  ",
    "  |    |  ",
    "  | [] |  ",
    "  |____|  ",
];

const SUN: &str = "\\|/\n-O-\n/|\\";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut scene = Scene::with_opts(SceneOpts {
        default_viewport: Some(Viewport::new(-2, -2, 28, 10)),
        background: "#101020".to_owned(),
        ..SceneOpts::default()
    })?;

    scene.add_object("ground", ObjectOptions::new("=".repeat(28)).at(-2, 6).color("#3a7d2c"))?;
    scene.add_object(
        "house",
        ObjectOptions::new(HOUSE.to_vec())
            .at(2, 0)
            .layer(1)
            .color("#c8a060")
            .auto_detect_edges(true)
            .mirror_glyphs(true),
    )?;
    scene.add_object(
        "sun",
        ObjectOptions::new(SUN).at(18, -1).layer(2).color("#ffd700").influence(
            Influence::new(
                4,
                InfluenceTransform::new(TransformKind::Lighten, 0.6)
                    .with_falloff(Falloff::Quadratic),
            )
            .with_color("#fff3b0"),
        ),
    )?;
    scene.add_object(
        "window",
        ObjectOptions::new(vec!["    ", "    "])
            .at(13, 2)
            .layer(3)
            .color("#3060ff")
            .influence(Influence::new(
                1,
                InfluenceTransform::new(TransformKind::Multiply, 0.7),
            )),
    )?;

    print!("{}", scene.render(None)?.to_ansi());

    scene.flip_horizontal("house")?;
    scene.set_layer_effect(0, Some(LayerEffect::new(TransformKind::Darken, 0.4)))?;
    print!("{}", scene.render(None)?.to_ansi());

    for obj in scene.list_objects() {
        println!("{:>8} layer {:>2} bounds {:?}", obj.id, obj.layer, obj.bounds);
    }
    Ok(())
}
