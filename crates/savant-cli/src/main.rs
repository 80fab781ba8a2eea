// Recruit Savant entry point.
//
// 1. Initialize tracing (stderr, so stdout carries only table output)
// 2. Parse arguments and load config
// 3. Load the dataset and resolve or read the column mapping
// 4. Build and write the requested table

use savant_cli::args::{Cli, Command, TableArgs};
use savant_cli::config::{self, Config};
use savant_cli::output::{self, Rendered};
use savant_core::{ColumnMapping, Dataset, Session, WeightField};

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let config = config::load_config(&base_dir).context("failed to load configuration")?;

    match cli.command {
        Command::Map { file, out } => run_map(&file, out.as_deref()),
        Command::Rank { file, table } => run_rank(&file, &table, &config),
        Command::Composite {
            file,
            overrides,
            table,
        } => run_composite(&file, &overrides, &table, &config),
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn run_map(file: &Path, out: Option<&Path>) -> anyhow::Result<()> {
    let session = Session::new(load(file)?);
    let mapping = session.mapping();

    for metric in mapping.unmapped() {
        info!("No column found for {metric}");
    }

    let text = toml::to_string_pretty(mapping).context("failed to serialize mapping")?;
    let mut writer = open_output(out)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn run_rank(file: &Path, args: &TableArgs, config: &Config) -> anyhow::Result<()> {
    let session = open_session(file, args.mapping.as_deref(), config)?;
    let table = session.percentile_table();
    info!("Ranked {} players", table.row_count());
    emit(&Rendered::from(&table), args, config)
}

fn run_composite(
    file: &Path,
    overrides: &[(WeightField, String)],
    args: &TableArgs,
    config: &Config,
) -> anyhow::Result<()> {
    let mut session = open_session(file, args.mapping.as_deref(), config)?;

    let rejected = session.update_weights(overrides.iter().map(|(f, v)| (*f, v.as_str())));
    if !rejected.is_empty() {
        info!("{} weight override(s) ignored", rejected.len());
    }

    let table = session.composite_table();
    info!("Scored {} players", table.rows.len());
    emit(&Rendered::from(&table), args, config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load(file: &Path) -> anyhow::Result<Dataset> {
    savant_ingest::load_dataset(file)
        .with_context(|| format!("failed to load dataset {}", file.display()))
}

fn open_session(
    file: &Path,
    mapping: Option<&Path>,
    config: &Config,
) -> anyhow::Result<Session> {
    let mut session = Session::new(load(file)?).with_weights(config.weights);
    if let Some(path) = mapping {
        session.set_mapping(read_mapping(path)?);
        info!("Using mapping from {}", path.display());
    }
    Ok(session)
}

fn read_mapping(path: &Path) -> anyhow::Result<ColumnMapping> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read mapping {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse mapping {}", path.display()))
}

fn emit(table: &Rendered, args: &TableArgs, config: &Config) -> anyhow::Result<()> {
    let mut writer = open_output(args.out.as_deref())?;
    output::write_table(table, args.format, &config.output, &mut writer)
        .context("failed to write table")?;
    writer.flush()?;
    if let Some(path) = &args.out {
        info!("Wrote {} rows to {}", table.row_count(), path.display());
    }
    Ok(())
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("failed to create {}", p.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("savant=info,warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
