use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reelkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a reel config and list every shape violation.
    Validate(ValidateArgs),
    /// Generate a self-contained HTML reel.
    Generate(GenerateArgs),
    /// Recover the embedded config from a generated HTML reel.
    Extract(ExtractArgs),
    /// Play a reel headlessly and print the surface's events as JSON lines.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output HTML path.
    #[arg(long)]
    out: PathBuf,

    /// Asset table JSON (logo images and extra SVG icons).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Session number stamped on the surface's messages.
    #[arg(long, default_value_t = 0)]
    session: u64,

    /// Document language; defaults from the reel direction.
    #[arg(long)]
    lang: Option<String>,

    /// Leave out the progress bar.
    #[arg(long)]
    no_progress_bar: bool,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Generated HTML (or raw config JSON).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Simulated wall time to run for.
    #[arg(long)]
    ms: u64,

    /// Clock step between pumps; defaults to the artifact's tick interval.
    #[arg(long)]
    tick: Option<u64>,

    /// Send `play` once the surface is ready.
    #[arg(long)]
    play: bool,

    /// Asset table JSON.
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Generate(args) => cmd_generate(args),
        Command::Extract(args) => cmd_extract(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let v = serde_json::from_reader(BufReader::new(f)).with_context(|| "parse config JSON")?;
    Ok(v)
}

fn read_config(path: &Path) -> anyhow::Result<reelkit::Config> {
    let v = read_json(path)?;
    reelkit::validate_report(&v)
        .map_err(anyhow::Error::new)
        .with_context(|| format!("invalid config '{}'", path.display()))?;
    let config = serde_json::from_value(v).with_context(|| "decode config")?;
    Ok(config)
}

fn read_assets(path: Option<&Path>) -> anyhow::Result<reelkit::AssetTable> {
    match path {
        Some(p) => Ok(reelkit::AssetTable::from_path(p)?),
        None => Ok(reelkit::AssetTable::default()),
    }
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let v = read_json(&args.in_path)?;
    match reelkit::validate_report(&v) {
        Ok(()) => {
            println!("ok");
            Ok(())
        }
        Err(errs) => {
            for e in &errs.errors {
                println!("{e}");
            }
            anyhow::bail!("{} violation(s) in '{}'", errs.errors.len(), args.in_path.display())
        }
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = read_config(&args.in_path)?;
    let assets = read_assets(args.assets.as_deref())?;
    let opts = reelkit::GenerateOpts {
        lang: args.lang,
        session: args.session,
        progress_bar: !args.no_progress_bar,
        ..reelkit::GenerateOpts::default()
    };

    let artifact = reelkit::generate_with(&config, &assets, &opts);
    if artifact.kind == reelkit::ArtifactKind::Fault {
        tracing::warn!("generation fell back to an error panel");
    }
    write_output(&args.out, &artifact.html)?;
    eprintln!("fingerprint {:016x}", artifact.fingerprint);
    Ok(())
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;
    let config = reelkit::import_config(&text)?;
    let json = config.to_json_pretty()?;
    match args.out {
        Some(out) => write_output(&out, &json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = read_config(&args.in_path)?;
    let assets = read_assets(args.assets.as_deref())?;
    let mut preview = reelkit::Preview::new(&config, assets)?;
    let tick = args
        .tick
        .unwrap_or_else(|| preview.surface().tick_interval().0);
    anyhow::ensure!(tick > 0, "--tick must be positive");

    print_events(preview.now(), &preview.pump())?;
    if args.play && preview.send(reelkit::Command::Play) {
        print_events(preview.now(), &preview.pump())?;
    }

    let end = reelkit::Millis(args.ms);
    while preview.now() < end {
        let step = reelkit::Millis(tick.min(end.0 - preview.now().0));
        let events = preview.advance(step);
        print_events(preview.now(), &events)?;
    }
    Ok(())
}

fn print_events(at: reelkit::Millis, events: &[reelkit::Event]) -> anyhow::Result<()> {
    for ev in events {
        let line = serde_json::json!({ "at": at, "event": ev });
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}
