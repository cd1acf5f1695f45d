use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "kvcompose", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the master template (key visual, scrim, headline, CTA) at every configured size.
    Master(MasterArgs),
    /// Render a JSON layout descriptor at every configured size.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Render config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads for the batch render.
    #[arg(long)]
    threads: Option<usize>,

    /// Directory receiving one `<ratio>.png` per size.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct MasterArgs {
    /// Key visual image.
    #[arg(long)]
    kv: PathBuf,

    #[arg(long)]
    headline: String,

    #[arg(long)]
    cta: String,

    /// Brand motif, raster or SVG.
    #[arg(long)]
    motif: Option<PathBuf>,

    #[arg(long)]
    motif_opacity: Option<f32>,

    /// Hex tint for the motif; `none` keeps its own colors.
    #[arg(long)]
    motif_tint: Option<String>,

    /// full, left, center or right.
    #[arg(long)]
    motif_position: Option<String>,

    /// Subject protection preset: none, left, center or right.
    #[arg(long)]
    subject: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Key visual image.
    #[arg(long)]
    kv: PathBuf,

    /// Layout descriptor JSON.
    #[arg(long)]
    layout: PathBuf,

    /// Directory of element and motif assets, keyed by file stem.
    #[arg(long)]
    assets: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Master(args) => cmd_master(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<kvcompose::RenderConfig> {
    let mut cfg = match &common.config {
        Some(path) => kvcompose::RenderConfig::from_path(path)?,
        None => kvcompose::RenderConfig::default(),
    }
    .with_env_overrides();
    if let Some(n) = common.threads {
        cfg.threads = Some(n);
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Longest canvas edge across the configured sizes; SVG assets are rasterized to this.
fn svg_raster_dim(cfg: &kvcompose::RenderConfig) -> u32 {
    cfg.master_sizes
        .values()
        .map(|s| s.width.max(s.height))
        .max()
        .unwrap_or(2048)
}

fn cmd_master(args: MasterArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    let kv = kvcompose::load_image_file(&args.kv, svg_raster_dim(&cfg))
        .with_context(|| format!("load key visual '{}'", args.kv.display()))?;

    let mut copy = kvcompose::MasterCopy::new(args.headline, args.cta);
    if let Some(path) = &args.motif {
        let img = kvcompose::load_image_file(path, svg_raster_dim(&cfg))
            .with_context(|| format!("load motif '{}'", path.display()))?;
        let mut motif = kvcompose::MotifSpec::new(Arc::new(img));
        if let Some(op) = args.motif_opacity {
            motif.opacity = op;
        }
        if let Some(tint) = args.motif_tint.as_deref() {
            motif.tint = parse_tint(tint);
        }
        if let Some(pos) = args.motif_position.as_deref() {
            motif.placement = kvcompose::MotifPlacement::from_name(pos);
        }
        if let Some(subject) = args.subject.as_deref() {
            motif.protection = kvcompose::SubjectProtection::from_name(subject);
        }
        copy = copy.with_motif(motif);
    }

    let items = kvcompose::render_master_batch(&kv, &copy, &cfg.sizes(), &cfg)?;
    write_outputs(&args.common.out_dir, &items)
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    let svg_dim = svg_raster_dim(&cfg);
    let kv = kvcompose::load_image_file(&args.kv, svg_dim)
        .with_context(|| format!("load key visual '{}'", args.kv.display()))?;

    let bytes = std::fs::read(&args.layout)
        .with_context(|| format!("read layout '{}'", args.layout.display()))?;
    let doc = kvcompose::LayoutDoc::from_json(&bytes)?;

    let assets = match &args.assets {
        Some(dir) => kvcompose::AssetLibrary::load_dir(dir, svg_dim)?,
        None => kvcompose::AssetLibrary::new(),
    };
    let layout = doc.validate(&assets)?;

    let items = kvcompose::render_layout_batch(&kv, &layout, &cfg.sizes(), &cfg)?;
    write_outputs(&args.common.out_dir, &items)
}

fn parse_tint(s: &str) -> Option<kvcompose::Rgb8> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(kvcompose::Rgb8::from_hex_or_fallback(s))
}

fn output_file_name(label: &str) -> String {
    format!("{}.png", label.replace(':', "x"))
}

fn write_outputs(out_dir: &Path, items: &[kvcompose::BatchItem]) -> anyhow::Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    for item in items {
        let path = out_dir.join(output_file_name(&item.label));
        item.output
            .image
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;

        for skipped in &item.output.report.skipped {
            eprintln!(
                "{}: skipped {:?} #{} ({})",
                item.label, skipped.kind, skipped.index, skipped.reason
            );
        }
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
