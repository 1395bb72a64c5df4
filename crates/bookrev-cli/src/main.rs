use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use bookrev_core::Strictness;
use bookrev_core::config_file::{self, ConfigFile};
use bookrev_core::lookup::WorksCatalog;
use bookrev_ingest::{ItemOutcome, Pipeline, PipelineOptions, VenueProfiles};
use bookrev_parsing::{FormatExtractor, ParsingConfig, ParsingConfigBuilder, ReviewClassifier};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

mod output;

use output::ColorMode;

/// Book review extractor - recover reviewed books and their authors from citation titles
#[derive(Parser, Debug)]
#[command(name = "bookrev", version, about, long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Read this config file instead of the platform and .bookrev.toml cascade
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one citation title and show what the cascade recovered
    Parse {
        /// Raw citation title (markup allowed)
        title: String,

        /// Raw citation subtitle, tried when the title yields nothing
        #[arg(long, default_value = "")]
        subtitle: String,

        /// Print the parse as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decide whether a citation title looks like a book review
    Classify {
        /// Raw citation title (markup allowed)
        title: String,

        /// lenient or italic_only (default: from --venue, else lenient)
        #[arg(long)]
        strictness: Option<Strictness>,

        /// Take the strictness from this venue's profile
        #[arg(long)]
        venue: Option<String>,
    },

    /// Run a JSON-lines file of citations through the whole pipeline
    Process {
        /// JSON-lines input, one citation per line
        input: PathBuf,

        /// Offline works catalog (JSON array) used for author lookup
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Write JSON-lines records here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Never query the works catalog
        #[arg(long)]
        no_lookup: bool,

        /// Items processed concurrently
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// List configured venue profiles
    Venues,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let color = ColorMode(!cli.no_color);

    match cli.command {
        Command::Parse {
            title,
            subtitle,
            json,
        } => parse(&config, &title, &subtitle, json, color),
        Command::Classify {
            title,
            strictness,
            venue,
        } => classify(&config, &title, strictness, venue.as_deref(), color),
        Command::Process {
            input,
            catalog,
            output,
            no_lookup,
            concurrency,
        } => {
            process(
                &config,
                &input,
                catalog,
                output,
                no_lookup,
                concurrency,
                color,
            )
            .await
        }
        Command::Venues => {
            let profiles = VenueProfiles::from_config(&config);
            let mut stdout = std::io::stdout();
            output::print_venues(&mut stdout, profiles.iter(), color)?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ConfigFile> {
    match path {
        Some(p) => config_file::try_load_from_path(p)
            .with_context(|| format!("failed to load config from {}", p.display())),
        None => Ok(config_file::load_config()),
    }
}

/// Parsing configuration: built-in vocabulary extended by the config file.
fn parsing_config(config: &ConfigFile) -> anyhow::Result<ParsingConfig> {
    let mut builder = ParsingConfigBuilder::new();
    if let Some(vocab) = &config.vocabulary {
        builder = builder.vocabulary(vocab);
    }
    if let Some(n) = config.pipeline.as_ref().and_then(|p| p.min_title_chars) {
        builder = builder.min_title_chars(n);
    }
    Ok(builder.build()?)
}

fn parse(
    config: &ConfigFile,
    title: &str,
    subtitle: &str,
    json: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let extractor = FormatExtractor::with_config(parsing_config(config)?);
    let result = extractor.extract(title, subtitle);
    let mut stdout = std::io::stdout();

    if json {
        serde_json::to_writer_pretty(&mut stdout, &result)?;
        writeln!(stdout)?;
    } else {
        output::print_parse(&mut stdout, title, result.as_ref(), color)?;
    }
    Ok(())
}

fn classify(
    config: &ConfigFile,
    title: &str,
    strictness: Option<Strictness>,
    venue: Option<&str>,
    color: ColorMode,
) -> anyhow::Result<()> {
    // Resolve strictness: flag > venue profile > lenient
    let strictness = strictness
        .or_else(|| venue.map(|v| VenueProfiles::from_config(config).get(v).strictness))
        .unwrap_or_default();

    let classifier = ReviewClassifier::with_config(parsing_config(config)?);
    let verdict = classifier.classify(title, strictness);
    output::print_verdict(&mut std::io::stdout(), verdict, color)?;
    Ok(())
}

async fn process(
    config: &ConfigFile,
    input: &Path,
    catalog: Option<PathBuf>,
    output: Option<PathBuf>,
    no_lookup: bool,
    concurrency: Option<usize>,
    color: ColorMode,
) -> anyhow::Result<()> {
    // Resolve configuration: CLI flags > env vars > config file > defaults
    let catalog_path = catalog
        .or_else(|| std::env::var("BOOKREV_CATALOG").ok().map(PathBuf::from))
        .or_else(|| {
            config
                .lookup
                .as_ref()
                .and_then(|l| l.catalog_path.as_ref())
                .map(PathBuf::from)
        });

    let mut options = PipelineOptions::from_config(config);
    if let Some(c) = concurrency {
        options.concurrency = c.max(1);
    }
    if no_lookup {
        options.lookup_enabled = false;
    }

    let profiles = VenueProfiles::from_config(config);
    let items = bookrev_ingest::read_items_from_path(input, &profiles)
        .with_context(|| format!("failed to read citations from {}", input.display()))?;

    let mut pipeline = Pipeline::new(parsing_config(config)?)
        .with_profiles(profiles)
        .with_options(options);

    if options.lookup_enabled
        && let Some(path) = catalog_path
    {
        if !path.exists() {
            anyhow::bail!("Works catalog not found at {}", path.display());
        }
        let catalog = WorksCatalog::from_path(&path)
            .with_context(|| format!("failed to load works catalog {}", path.display()))?;
        pipeline = pipeline.with_lookup(Arc::new(catalog));
    }

    let (outcomes, stats) = pipeline.process_all(&items).await;

    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };
    bookrev_ingest::write_jsonl(writer, outcomes.into_iter().filter_map(ItemOutcome::into_record))?;

    let mut stderr = std::io::stderr();
    output::print_summary(&mut stderr, &stats, color)?;
    Ok(())
}
