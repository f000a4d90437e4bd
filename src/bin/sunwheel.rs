use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sunwheel::{
    DeviceClass, Document, EngineConfig, Millis, PieEngine, TaskPath, render::render_svg,
};

#[derive(Parser, Debug)]
#[command(name = "sunwheel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one animation instant as an SVG.
    Render(RenderArgs),
    /// Parse and validate a task document.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input task document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Selected path, comma-separated ids (e.g. "1,3"). Empty for top level.
    #[arg(long, default_value = "")]
    select: String,

    /// Previous selection; when set, the frame is sampled mid-transition
    /// from this path to --select.
    #[arg(long)]
    prev: Option<String>,

    /// Milliseconds into the transition at which to sample.
    #[arg(long, default_value_t = 0.0)]
    at_ms: f64,

    /// Output SVG size in pixels.
    #[arg(long, default_value_t = 220.0)]
    size: f64,

    /// Outer radius of the current ring.
    #[arg(long, default_value_t = 70.0)]
    r1: f64,

    /// Outer radius of the child ring.
    #[arg(long, default_value_t = 100.0)]
    r2: f64,

    /// Transition duration in milliseconds.
    #[arg(long, default_value_t = 1500.0)]
    duration_ms: f64,

    /// Narrow-viewport rotation policy (selected slice parks at the top
    /// instead of the right).
    #[arg(long)]
    narrow: bool,

    /// Output SVG path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input task document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => run_render(args),
        Command::Validate(args) => run_validate(args),
    }
}

fn run_render(args: RenderArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.in_path)?;
    let select = parse_path(&args.select)?;

    let config = EngineConfig {
        r1: args.r1,
        r2: args.r2,
        duration_ms: args.duration_ms,
        device: if args.narrow {
            DeviceClass::Narrow
        } else {
            DeviceClass::Wide
        },
        ..EngineConfig::default()
    };
    config.validate()?;
    let duration = config.duration_ms;
    let mut engine = PieEngine::new(config);

    // Settle on the previous selection first, then trigger the transition
    // and sample it at the requested instant.
    let mut now = Millis(0.0);
    if let Some(prev) = &args.prev {
        let prev = parse_path(prev)?;
        engine.select(&doc.tasks, &prev, now);
        now = Millis(now.0 + 2.0 * duration);
        let _ = engine.frame(&doc.tasks, &prev, now);
    }
    engine.select(&doc.tasks, &select, now);
    let frame = engine.frame(&doc.tasks, &select, Millis(now.0 + args.at_ms));

    let svg = render_svg(&frame, args.size);
    match &args.out {
        Some(path) => fs::write(path, svg)
            .with_context(|| format!("failed to write SVG to {}", path.display()))?,
        None => println!("{svg}"),
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.in_path)?;
    doc.validate().context("document failed validation")?;
    println!("ok: {} top-level tasks", doc.tasks.len());
    Ok(())
}

fn load_document(path: &PathBuf) -> anyhow::Result<Document> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = Document::from_json(&s)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    doc.validate().context("document failed validation")?;
    Ok(doc)
}

fn parse_path(s: &str) -> anyhow::Result<TaskPath> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(TaskPath::root());
    }
    let ids = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u64>()
                .with_context(|| format!("invalid id '{part}' in path '{s}'"))
        })
        .collect::<anyhow::Result<Vec<u64>>>()?;
    Ok(TaskPath::new(ids))
}
