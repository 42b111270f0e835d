use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::config::{AppConfig, Config, IndexConfig};
use crate::core::error::Result;
use crate::features::regions::models::RegionIndex;
use crate::features::regions::services::{flatten, FlattenedRecord};
use crate::features::regions::RegionIndexService;
use crate::modules::geofabrik::{FileIndexSource, GeofabrikClient, IndexSource};

/// List the Geofabrik download regions as an indented tree.
///
/// The printed paths can be fed straight to tools that download or process
/// a single region.
#[derive(Debug, Parser)]
#[command(name = "geofabrik-regions", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every region path, indented by depth (the default)
    List(ListArgs),
    /// Serve the flattened catalog over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Read the index from a local file instead of downloading it
    #[arg(long, value_name = "FILE", conflicts_with = "url")]
    pub input: Option<PathBuf>,

    /// Index URL [env: GEOFABRIK_INDEX_URL]
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Bind host [env: HOST]
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port [env: PORT]
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Two spaces per level, then "- " and the path
    #[default]
    Text,
    /// JSON array of {"depth", "path"} objects
    Json,
}

impl Cli {
    /// The requested command; no subcommand means `list` with defaults
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::List(ListArgs::default()))
    }
}

impl SourceArgs {
    pub fn into_source(self, config: &IndexConfig) -> Result<Arc<dyn IndexSource>> {
        if let Some(path) = self.input {
            return Ok(Arc::new(FileIndexSource::new(path)));
        }

        let mut config = config.clone();
        if let Some(url) = self.url {
            config.url = url;
        }
        Ok(Arc::new(GeofabrikClient::new(&config)?))
    }
}

impl ServeArgs {
    pub fn apply_to(&self, app: &mut AppConfig) {
        if let Some(host) = &self.host {
            app.host = host.clone();
        }
        if let Some(port) = self.port {
            app.port = port;
        }
    }
}

/// `list`: print the flattened index to stdout
pub async fn run_list(args: ListArgs, config: &Config) -> anyhow::Result<ExitCode> {
    let source = args.source.into_source(&config.index)?;
    let origin = source.describe();
    let service = RegionIndexService::new(source);

    let Some(index) = service.try_load_index().await else {
        eprintln!("Error fetching index from {}", origin);
        return Ok(ExitCode::FAILURE);
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = write_listing(&index, args.format, &mut out).and_then(|_| out.flush());
    ignore_broken_pipe(written)?;

    Ok(ExitCode::SUCCESS)
}

pub fn write_listing(
    index: &RegionIndex,
    format: OutputFormat,
    out: &mut impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for record in flatten(index) {
                writeln!(out, "{}", record)?;
            }
        }
        OutputFormat::Json => {
            let records: Vec<FlattenedRecord<'_>> = flatten(index).collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// A reader that went away (`| head`) is not a failure
fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed early; stopping listing");
            Ok(())
        }
        other => other,
    }
}
