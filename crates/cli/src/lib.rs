use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use httpgen_descriptor::ManifestProvider;
use httpgen_regen::{DirectoryStore, Regenerator, ScaffoldTemplates};
use std::fs;
use std::io;
use std::path::PathBuf;

pub mod config;

use config::HttpgenConfig;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "httpgen")]
#[command(about = "Keep .http request files in sync with an API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (defaults to httpgen.toml in the project directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate .http files from an endpoint manifest
    Generate(GenerateArgs),

    /// Merge two JSON bodies, keeping the fresh structure and the old values
    #[command(name = "merge-body")]
    MergeBody(MergeBodyArgs),

    /// Print the requests of a .http file as JSON
    Inspect(InspectArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Endpoint manifest (.json or .toml)
    #[arg(long)]
    manifest: PathBuf,

    /// Project directory (defaults to current directory)
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// Output directory, relative to the project directory (env: HTTPGEN_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Host variable interpolated before every path (env: HTTPGEN_HOST_VARIABLE)
    #[arg(long)]
    host_variable: Option<String>,

    /// Directory with replacement environment templates (env: HTTPGEN_TEMPLATES_DIR)
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Report what would change without writing files
    #[arg(long)]
    dry_run: bool,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct MergeBodyArgs {
    /// Freshly generated body
    #[arg(long)]
    fresh: PathBuf,

    /// Previously saved body
    #[arg(long)]
    old: PathBuf,
}

#[derive(Args)]
struct InspectArgs {
    /// .http file to parse
    file: PathBuf,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON consumers
    if matches!(&cli.command, Commands::Generate(args) if args.json) {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Generate(args) => run_generate(args, cli.config)?,
        Commands::MergeBody(args) => run_merge_body(args)?,
        Commands::Inspect(args) => run_inspect(args)?,
    }

    Ok(())
}

/// Regenerate every group and report per-file outcomes
fn run_generate(args: GenerateArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = HttpgenConfig::load(&args.project_dir, config_path.as_deref())?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(name) = args.host_variable {
        config.host_variable = name;
    }
    if let Some(dir) = args.templates_dir {
        config.templates_dir = Some(dir);
    }

    let out_dir = config.output_path(&args.project_dir);
    let store = DirectoryStore::open(&out_dir)
        .with_context(|| format!("Cannot use output directory {}", out_dir.display()))?;

    let templates = match &config.templates_dir {
        Some(dir) => ScaffoldTemplates::from_dir(&args.project_dir.join(dir))?,
        None => ScaffoldTemplates::bundled(),
    }
    .with_host_variable(&config.host_variable);

    let provider = ManifestProvider::new(&args.manifest);
    let mut regen = Regenerator::new(store)
        .with_scaffold(templates)
        .dry_run(args.dry_run);
    let report = regen
        .regenerate(&provider, &config.build_options())
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&report)?)?;
    } else {
        print_stdout(report.render_text().trim_end())?;
    }

    if report.has_failures() {
        let failed = report
            .entries
            .iter()
            .filter(|entry| matches!(entry.outcome, httpgen_regen::Outcome::Failed { .. }))
            .count();
        anyhow::bail!("{failed} file(s) could not be regenerated");
    }
    Ok(())
}

fn run_merge_body(args: MergeBodyArgs) -> Result<()> {
    let fresh = fs::read_to_string(&args.fresh)
        .with_context(|| format!("Failed to read {}", args.fresh.display()))?;
    let old = fs::read_to_string(&args.old)
        .with_context(|| format!("Failed to read {}", args.old.display()))?;

    print_stdout(&httpgen_reconcile::merge_bodies(&fresh, &old))
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let snippets = httpgen_snippet::parse(&text);
    log::debug!("{}: {} requests", args.file.display(), snippets.len());

    let json = if args.pretty {
        serde_json::to_string_pretty(&snippets)?
    } else {
        serde_json::to_string(&snippets)?
    };
    print_stdout(&json)
}
