use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use glyphcomp::{
    Falloff, Influence, InfluenceTransform, ObjectOptions, Scene, SceneOpts, TransformKind,
    Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "glyphcomp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite text files and print the result.
    Render(RenderArgs),
    /// Print the canvas bounds of the given objects.
    Bounds(SceneArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Object as comma-separated `key=value` pairs, e.g. `file=ship.txt,x=4,layer=1,glow=2`.
    ///
    /// Keys: id, file (required), x, y, layer, color, edges, mirror, glow (influence radius),
    /// kind, strength, falloff, tint.
    #[arg(long = "object", required = true, value_parser = parse_object)]
    objects: Vec<ObjectArg>,

    /// Background color.
    #[arg(long, default_value = "#000000")]
    background: String,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Viewport as `x,y,width,height`; defaults to the canvas bounds.
    #[arg(long, value_parser = parse_viewport)]
    viewport: Option<Viewport>,

    /// Emit 24-bit ANSI colors.
    #[arg(long, default_value_t = false, conflicts_with = "json")]
    ansi: bool,

    /// Emit the character and color grids as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Clone, Debug)]
struct ObjectArg {
    id: Option<String>,
    file: PathBuf,
    x: i32,
    y: i32,
    layer: i32,
    color: Option<String>,
    edges: bool,
    mirror: bool,
    glow: Option<u32>,
    kind: TransformKind,
    strength: f64,
    falloff: Falloff,
    tint: Option<String>,
}

impl ObjectArg {
    fn id(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| {
            self.file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("object{index}"))
        })
    }

    fn options(&self, text: String) -> ObjectOptions {
        let mut opts = ObjectOptions::new(text)
            .at(self.x, self.y)
            .layer(self.layer)
            .auto_detect_edges(self.edges)
            .mirror_glyphs(self.mirror);
        if let Some(color) = &self.color {
            opts = opts.color(color.clone());
        }
        if let Some(radius) = self.glow {
            let transform = InfluenceTransform::new(self.kind, self.strength)
                .with_falloff(self.falloff);
            let mut influence = Influence::new(radius, transform);
            if let Some(tint) = &self.tint {
                influence = influence.with_color(tint.clone());
            }
            opts = opts.influence(influence);
        }
        opts
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Bounds(args) => cmd_bounds(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene_args = &args.scene;
    let mut scene = build_scene(scene_args)?;

    let viewport = match args.viewport {
        Some(vp) => vp,
        None => {
            let b = scene.canvas_bounds();
            if b.is_empty() {
                bail!("nothing to render: the canvas is empty");
            }
            Viewport::new(b.x, b.y, b.width, b.height)
        }
    };
    let out = scene.render(Some(viewport))?;

    if args.json {
        let json = serde_json::to_string_pretty(&out).context("serialize render output")?;
        println!("{json}");
    } else if args.ansi {
        print!("{}", out.to_ansi());
    } else {
        print!("{}", out.to_text());
    }
    Ok(())
}

fn cmd_bounds(args: SceneArgs) -> anyhow::Result<()> {
    let scene = build_scene(&args)?;
    let b = scene.canvas_bounds();
    println!("{},{},{},{}", b.x, b.y, b.width, b.height);
    Ok(())
}

fn build_scene(args: &SceneArgs) -> anyhow::Result<Scene> {
    let mut scene = Scene::with_opts(SceneOpts {
        background: args.background.clone(),
        ..SceneOpts::default()
    })?;
    for (i, obj) in args.objects.iter().enumerate() {
        let text = read_art(&obj.file)?;
        let id = obj.id(i);
        scene
            .add_object(id.clone(), obj.options(text))
            .with_context(|| format!("add object '{id}' from '{}'", obj.file.display()))?;
    }
    Ok(scene)
}

fn read_art(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read art file '{}'", path.display()))
}

fn parse_object(s: &str) -> anyhow::Result<ObjectArg> {
    let mut file = None;
    let mut arg = ObjectArg {
        id: None,
        file: PathBuf::new(),
        x: 0,
        y: 0,
        layer: 0,
        color: None,
        edges: false,
        mirror: false,
        glow: None,
        kind: TransformKind::Lighten,
        strength: 1.0,
        falloff: Falloff::default(),
        tint: None,
    };

    for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = value.trim();
        match key.trim() {
            "id" => arg.id = Some(value.to_owned()),
            "file" => file = Some(PathBuf::from(value)),
            "x" => arg.x = parse_num(key, value)?,
            "y" => arg.y = parse_num(key, value)?,
            "layer" => arg.layer = parse_num(key, value)?,
            "color" => arg.color = Some(value.to_owned()),
            "edges" => arg.edges = parse_flag(key, value)?,
            "mirror" => arg.mirror = parse_flag(key, value)?,
            "glow" => arg.glow = Some(parse_num(key, value)?),
            "kind" => arg.kind = parse_kebab(key, value)?,
            "strength" => arg.strength = parse_num(key, value)?,
            "falloff" => arg.falloff = parse_kebab(key, value)?,
            "tint" => arg.tint = Some(value.to_owned()),
            other => bail!("unknown object key '{other}'"),
        }
    }

    arg.file = file.context("object needs a file=<path> entry")?;
    Ok(arg)
}

fn parse_viewport(s: &str) -> anyhow::Result<Viewport> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, w, h] = parts.as_slice() else {
        bail!("viewport must be x,y,width,height (got '{s}')");
    };
    Ok(Viewport::new(
        parse_num("x", x)?,
        parse_num("y", y)?,
        parse_num("width", w)?,
        parse_num("height", h)?,
    ))
}

fn parse_num<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("invalid value '{value}' for '{key}'"))
}

fn parse_flag(key: &str, value: &str) -> anyhow::Result<bool> {
    match value {
        "" | "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => bail!("invalid value '{value}' for '{key}' (expected true or false)"),
    }
}

/// Parse a kebab-case enum name through its serde representation.
fn parse_kebab<T: serde::de::DeserializeOwned>(key: &str, value: &str) -> anyhow::Result<T> {
    serde_json::from_value(serde_json::Value::String(value.to_owned()))
        .with_context(|| format!("invalid value '{value}' for '{key}'"))
}
