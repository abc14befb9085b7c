use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gallery-ll", version)]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount every section, scroll through the page and print the final surface as JSON.
    Simulate(SimulateArgs),
    /// Print the sample artworks, guestbook notes and artist profile as JSON.
    Catalog,
    /// Upload an artwork through the admin flow (requires the `network` feature).
    Upload(UploadArgs),
    /// Report which collaborators are configured.
    CheckConfig(ConfigArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page layout JSON (element id -> rectangle).
    #[arg(long)]
    layout: PathBuf,

    /// Final scroll offset; defaults to the bottom of the document.
    #[arg(long)]
    scroll_to: Option<f64>,

    /// Number of even scroll steps.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Milliseconds between frames.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Extra time after the last scroll step for running animations to finish.
    #[arg(long, default_value_t = 3_000.0)]
    settle_ms: f64,

    /// Seed for the hero drift offsets.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Read configuration from JSON instead of the environment.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct UploadArgs {
    #[arg(long)]
    file: PathBuf,

    #[arg(long)]
    title: String,

    #[arg(long)]
    category: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Admin password; defaults to the configured secret.
    #[arg(long)]
    password: Option<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Catalog => cmd_catalog(),
        Command::Upload(args) => cmd_upload(args),
        Command::CheckConfig(args) => cmd_check_config(args),
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_layout_json(path: &Path) -> anyhow::Result<gallery_ll::PageLayout> {
    let f = File::open(path).with_context(|| format!("open layout '{}'", path.display()))?;
    let layout: gallery_ll::PageLayout =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse layout JSON")?;
    layout.validate()?;
    Ok(layout)
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<gallery_ll::Config> {
    match &args.config {
        Some(path) => Ok(gallery_ll::Config::from_json_path(path)?),
        None => Ok(gallery_ll::Config::from_env()),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frames > 0, "--frames must be > 0");
    anyhow::ensure!(args.frame_ms > 0.0, "--frame-ms must be > 0");
    let layout = read_layout_json(&args.layout)?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut page = gallery_ll::Page::new(&mut rng);
    page.mount(&layout);

    let bottom = (layout.document_height() - layout.viewport_height).max(0.0);
    let target = args.scroll_to.unwrap_or(bottom);
    let mut surface = gallery_ll::PropertySurface::new();
    let mut now = 0.0;
    for step in 0..=args.frames {
        page.set_scroll(target * f64::from(step) / f64::from(args.frames));
        page.frame(now, &layout, &mut surface)?;
        now += args.frame_ms;
    }
    let settle_until = now + args.settle_ms;
    while now <= settle_until {
        page.frame(now, &layout, &mut surface)?;
        now += args.frame_ms;
    }

    let counts = page.stage().counts();
    tracing::info!(?counts, writes = surface.writes(), "simulation finished");
    println!("{}", serde_json::to_string_pretty(&surface)?);
    Ok(())
}

fn cmd_catalog() -> anyhow::Result<()> {
    let catalog = serde_json::json!({
        "artworks": gallery_ll::model::sample_artworks(),
        "messages": gallery_ll::model::sample_messages(),
        "profile": gallery_ll::model::sample_profile(),
    });
    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}

fn cmd_check_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let report = serde_json::json!({
        "image_host": config.image_host().is_ok(),
        "document_store": config.document_store().is_ok(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(feature = "network")]
fn cmd_upload(args: UploadArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let mut host = gallery_ll::CloudinaryHost::new(config.image_host()?.clone())?;
    let file = gallery_ll::ImageFile::from_path(&args.file)?;
    let category = gallery_ll::Category::parse(&args.category)?;

    let mut flow = gallery_ll::AdminFlow::new(config.admin_secret.clone());
    flow.open();
    flow.login(args.password.as_deref().unwrap_or(&config.admin_secret))?;
    flow.set_title(&args.title)?;
    flow.set_description(&args.description)?;
    flow.set_category(category)?;
    flow.select_file(file)?;
    let record = flow.submit(&mut host, 0.0).context("upload artwork")?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

#[cfg(not(feature = "network"))]
fn cmd_upload(args: UploadArgs) -> anyhow::Result<()> {
    let _ = args;
    anyhow::bail!("gallery-ll was built without the `network` feature; upload is unavailable")
}
