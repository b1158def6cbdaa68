use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use posterframe::{
    EditorEvent, EditorOutcome, EditorSession, FitMode, FocusPoint, FramingConfig,
    FramingMetadata, Size, Vec2,
};

#[derive(Parser, Debug)]
#[command(name = "posterframe", version)]
struct Cli {
    /// Framing config JSON (editor and render tunables).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the natural dimensions of an image file.
    Probe(ProbeArgs),
    /// Run a headless editor session and print the applied metadata.
    Frame(FrameArgs),
    /// Resolve stored metadata into a render plan for a container ratio.
    Render(RenderArgs),
    /// Print the visible window for each preview device.
    Preview(MetaArgs),
    /// Print the safe zone of stored metadata.
    SafeZone(MetaArgs),
}

#[derive(Args, Debug)]
struct ProbeArgs {
    /// Image file to read the header of.
    image: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Source image id written into the metadata.
    #[arg(long)]
    id: String,

    /// Read natural dimensions from this image file.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    image: Option<PathBuf>,

    /// Natural width in pixels.
    #[arg(long, requires = "height")]
    width: Option<f64>,

    /// Natural height in pixels.
    #[arg(long, requires = "width")]
    height: Option<f64>,

    /// Editor container size, e.g. `800x600`. Omit to use the configured fallback.
    #[arg(long)]
    container: Option<String>,

    /// Restrict selectable ratios, comma separated (e.g. `1200/630` or `16:9,1:1`).
    #[arg(long, value_delimiter = ',')]
    allowed: Vec<String>,

    /// Frame ratio to select (must be one of the selectable ratios).
    #[arg(long)]
    aspect: Option<String>,

    #[arg(long)]
    zoom: Option<f64>,

    /// Pan offset in display pixels, `dx,dy`.
    #[arg(long, allow_hyphen_values = true)]
    pan: Option<String>,

    /// Focus point in percent of the crop, `x,y`.
    #[arg(long)]
    focus: Option<String>,

    #[arg(long)]
    fit_mode: Option<String>,

    /// Existing metadata to re-open.
    #[arg(long)]
    existing: Option<PathBuf>,

    /// Write metadata here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    meta: MetaArgs,

    /// Runtime container ratio, e.g. `16:9` or `1.5`.
    #[arg(long)]
    container_aspect: String,

    /// Override the stored fit mode.
    #[arg(long)]
    mode: Option<String>,

    /// Include CSS declarations for each layer.
    #[arg(long)]
    css: bool,
}

#[derive(Args, Debug)]
struct MetaArgs {
    /// Stored framing metadata JSON.
    #[arg(long = "meta")]
    meta_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => FramingConfig::load(path)?,
        None => FramingConfig::default(),
    };

    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Frame(args) => cmd_frame(args, &config),
        Command::Render(args) => cmd_render(args, &config),
        Command::Preview(args) => cmd_preview(args),
        Command::SafeZone(args) => cmd_safe_zone(args),
    }
}

fn probe_dimensions(path: &Path) -> anyhow::Result<(u32, u32)> {
    image::image_dimensions(path).with_context(|| format!("probe image '{}'", path.display()))
}

fn read_meta(path: &Path) -> anyhow::Result<FramingMetadata> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read metadata '{}'", path.display()))?;
    FramingMetadata::from_json_str(&text)
        .with_context(|| format!("parse metadata '{}'", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_pair(s: &str, sep: &[char], what: &str) -> anyhow::Result<(f64, f64)> {
    let (a, b) = s
        .split_once(sep)
        .with_context(|| format!("{what} must look like A{}B, got '{s}'", sep[0]))?;
    let a: f64 = a.trim().parse().with_context(|| format!("parse {what} '{s}'"))?;
    let b: f64 = b.trim().parse().with_context(|| format!("parse {what} '{s}'"))?;
    Ok((a, b))
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let (width, height) = probe_dimensions(&args.image)?;
    print_json(&serde_json::json!({ "width": width, "height": height }))
}

fn cmd_frame(args: FrameArgs, config: &FramingConfig) -> anyhow::Result<()> {
    let (width, height) = match (&args.image, args.width, args.height) {
        (Some(path), _, _) => {
            let (w, h) = probe_dimensions(path)?;
            (f64::from(w), f64::from(h))
        }
        (None, Some(w), Some(h)) => (w, h),
        _ => anyhow::bail!("either --image or --width/--height is required"),
    };

    let allowed = args
        .allowed
        .iter()
        .map(|s| posterframe::parse_aspect(s).with_context(|| format!("parse --allowed '{s}'")))
        .collect::<anyhow::Result<Vec<f64>>>()?;
    let existing = args.existing.as_deref().map(read_meta).transpose()?;

    let mut session = EditorSession::new(
        config.editor.clone(),
        (!allowed.is_empty()).then_some(allowed.as_slice()),
    );
    session.open(&args.id, width, height, existing)?;

    let layout = match &args.container {
        Some(s) => {
            let (w, h) = parse_pair(s, &['x', 'X'], "--container")?;
            EditorEvent::ContainerMeasured(Size::new(w, h))
        }
        None => EditorEvent::LayoutUnavailable,
    };

    let mut events = vec![layout];
    if let Some(s) = &args.aspect {
        let ratio = posterframe::parse_aspect(s).with_context(|| format!("parse --aspect '{s}'"))?;
        events.push(EditorEvent::SelectAspect(ratio));
    }
    if let Some(zoom) = args.zoom {
        events.push(EditorEvent::SetZoom(zoom));
    }
    if let Some(s) = &args.pan {
        let (dx, dy) = parse_pair(s, &[','], "--pan")?;
        events.push(EditorEvent::Nudge(Vec2::new(dx, dy)));
    }
    if let Some(s) = &args.focus {
        let (x, y) = parse_pair(s, &[','], "--focus")?;
        events.push(EditorEvent::SetFocusPoint(Some(FocusPoint::new(x, y))));
    }
    if let Some(s) = &args.fit_mode {
        events.push(EditorEvent::SetFitMode(FitMode::parse_lenient(s)));
    }
    events.push(EditorEvent::Apply);

    let mut applied = None;
    for event in events {
        match session.handle(event) {
            EditorOutcome::Ignored => {
                tracing::warn!(?event, phase = ?session.phase(), "event ignored");
            }
            EditorOutcome::Updated => {}
            EditorOutcome::Applied(meta) => applied = Some(meta),
        }
    }
    let meta = applied.context("editor session did not reach a state that can be applied")?;

    if session.safe_zone_warning() {
        eprintln!("warning: focus point lies outside the safe zone");
    }

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let json = serde_json::to_string_pretty(&meta)?;
            std::fs::write(out, json)
                .with_context(|| format!("write metadata '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
            Ok(())
        }
        None => print_json(&meta),
    }
}

fn cmd_render(args: RenderArgs, config: &FramingConfig) -> anyhow::Result<()> {
    let meta = read_meta(&args.meta.meta_path)?;
    let container_aspect = posterframe::parse_aspect(&args.container_aspect)
        .with_context(|| format!("parse --container-aspect '{}'", args.container_aspect))?;
    let mode = args
        .mode
        .as_deref()
        .map_or(meta.fit_mode, FitMode::parse_lenient);

    let plan = posterframe::render_plan(&meta, container_aspect, mode, &config.render);
    let mut out = serde_json::json!({
        "plan": plan,
        "fingerprint": plan.fingerprint().to_string(),
    });
    if args.css {
        let (background, foreground) = plan.css();
        let to_map = |decls: Vec<(&'static str, String)>| {
            decls
                .into_iter()
                .map(|(k, v)| serde_json::json!([k, v]))
                .collect::<Vec<_>>()
        };
        out["css"] = serde_json::json!({
            "background": to_map(background),
            "foreground": foreground.map(to_map),
        });
    }
    print_json(&out)
}

fn cmd_preview(args: MetaArgs) -> anyhow::Result<()> {
    let meta = read_meta(&args.meta_path)?;
    print_json(&posterframe::project_devices(&meta))
}

fn cmd_safe_zone(args: MetaArgs) -> anyhow::Result<()> {
    let meta = read_meta(&args.meta_path)?;
    print_json(&serde_json::json!({
        "cropData": meta.crop_rect,
        "safeZone": posterframe::safe_zone(meta.crop_rect),
        "focusOutside": posterframe::focus_outside_safe_zone(&meta),
    }))
}
