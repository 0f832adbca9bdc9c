use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use drape::{
    AssetFile, BackgroundMode, BoundBox, MockupService as _, PlacementMode, Point, PointerTarget,
    Quad, SlotKind, Stage, StageConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "drape",
    version,
    about = "Place a design on a garment photo and render a mockup"
)]
struct Cli {
    /// Stage configuration JSON. Environment overrides apply on top.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the native-pixel quad for a placement.
    Quad(PlaceArgs),
    /// Send a mockup request and print the result URL.
    Submit(SubmitArgs),
    /// Probe the compositing service.
    Health,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    FreeTransform,
    FourPoint,
}

impl From<ModeArg> for PlacementMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::FreeTransform => PlacementMode::FreeTransform,
            ModeArg::FourPoint => PlacementMode::FourPoint,
        }
    }
}

#[derive(Args, Debug)]
struct PlaceArgs {
    /// Garment photograph.
    #[arg(long)]
    base: PathBuf,

    /// Design image.
    #[arg(long)]
    design: PathBuf,

    /// Placement mode; defaults to the configured one.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Viewport width used to size the display canvas.
    #[arg(long)]
    viewport_width: Option<u32>,

    /// Design origin x in display pixels.
    #[arg(long)]
    x: Option<f64>,

    /// Design origin y in display pixels.
    #[arg(long)]
    y: Option<f64>,

    /// On-screen design width in display pixels; height follows the aspect ratio.
    #[arg(long)]
    width: Option<f64>,

    /// Design rotation in degrees, clockwise about the design origin.
    #[arg(long)]
    rotation: Option<f64>,

    /// Four display-space corners "x0,y0,...,x3,y3" in TL, TR, BR, BL order.
    #[arg(long, allow_hyphen_values = true)]
    points: Option<String>,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[command(flatten)]
    place: PlaceArgs,

    /// Design opacity in [0, 1].
    #[arg(long)]
    opacity: Option<f64>,

    /// Disable garment shading.
    #[arg(long)]
    no_shading: bool,

    /// Shading strength in [0, 1].
    #[arg(long)]
    shading_strength: Option<f64>,

    /// Background removal mode: none, auto, white or black.
    #[arg(long)]
    bg_mode: Option<BackgroundMode>,

    /// Background removal threshold in [0, 100].
    #[arg(long)]
    bg_threshold: Option<i64>,

    /// Download the rendered mockup to this path.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Quad(args) => cmd_quad(&cfg, args),
        Command::Submit(args) => cmd_submit(&cfg, args),
        Command::Health => cmd_health(&cfg),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<StageConfig> {
    let cfg = match path {
        Some(p) => StageConfig::from_path(p)?,
        None => StageConfig::default(),
    };
    Ok(cfg.with_env_overrides()?)
}

fn cmd_quad(cfg: &StageConfig, args: PlaceArgs) -> anyhow::Result<()> {
    let stage = prepare_stage(cfg, &args)?;
    let quad: Quad = stage.quad()?;
    println!("{quad}");
    Ok(())
}

fn cmd_submit(cfg: &StageConfig, args: SubmitArgs) -> anyhow::Result<()> {
    let mut stage = prepare_stage(cfg, &args.place)?;
    {
        let o = stage.options_mut();
        if let Some(v) = args.opacity {
            o.opacity = v;
        }
        if args.no_shading {
            o.shading = false;
        }
        if let Some(v) = args.shading_strength {
            o.shading_strength = Some(v);
        }
        if let Some(v) = args.bg_mode {
            o.bg_mode = v;
        }
        if let Some(v) = args.bg_threshold {
            o.bg_threshold = v;
        }
    }

    let service = cfg.service()?;
    tracing::info!(endpoint = %service.endpoint_url()?, "submitting mockup");
    let url = stage.submit(&service)?.url.clone();
    println!("{url}");

    if let Some(out) = args.out {
        let bytes = service.fetch_result(&url)?;
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&out, bytes).with_context(|| format!("write '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    tracing::debug!(base = %service.api_base(), "done");
    Ok(())
}

fn cmd_health(cfg: &StageConfig) -> anyhow::Result<()> {
    let service = cfg.service()?;
    if service.health()? {
        println!("ok");
        Ok(())
    } else {
        anyhow::bail!("service at {} reported unhealthy", cfg.api_base)
    }
}

fn prepare_stage(cfg: &StageConfig, args: &PlaceArgs) -> anyhow::Result<Stage> {
    let mut stage = Stage::from_config(cfg);
    if let Some(mode) = args.mode {
        stage.switch_mode(mode.into());
    }
    if let Some(w) = args.viewport_width {
        stage.resize_viewport(w)?;
    }

    stage.set_base(AssetFile::from_path(&args.base)?);
    stage.set_design(AssetFile::from_path(&args.design)?);
    stage.decode_pending(SlotKind::Base)?;
    stage.decode_pending(SlotKind::Design)?;

    match stage.mode() {
        PlacementMode::FreeTransform => {
            let Some(m) = stage.placement_mut().as_free_transform_mut() else {
                anyhow::bail!("stage is not in free-transform mode");
            };
            if args.points.is_some() {
                anyhow::bail!("--points only applies to --mode four-point");
            }
            let Some(node) = m.node() else {
                anyhow::bail!("design placement was not initialized");
            };
            let current = node.bound_box();
            let width = args.width.unwrap_or(current.width);
            let candidate = BoundBox {
                x: args.x.unwrap_or(current.x),
                y: args.y.unwrap_or(current.y),
                width,
                height: current.height * width / current.width,
                rotation_deg: args.rotation.unwrap_or(current.rotation_deg),
            };
            if candidate != current && !m.propose_box(candidate) {
                anyhow::bail!("design box {width:.2} wide is below the minimum size");
            }
        }
        PlacementMode::FourPoint => {
            let raw = args
                .points
                .as_deref()
                .context("--mode four-point needs --points x0,y0,...,x3,y3")?;
            let corners = Quad::parse_points_field(raw)?.corners;
            for c in corners {
                if stage.pointer_down(Point::new(c.x, c.y)) == PointerTarget::Ignored {
                    anyhow::bail!(
                        "point ({:.2}, {:.2}) lies outside the display canvas",
                        c.x,
                        c.y
                    );
                }
            }
        }
    }
    Ok(stage)
}
