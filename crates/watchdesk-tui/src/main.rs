mod config;
mod metrics;
mod source;
mod state;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::{DashboardConfig, FilterOverrides};
use metrics::init_metrics;
use source::DataSource;
use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use tui::{run_tui, TuiApp};
use watchdesk_core::{DashboardState, Dataset, FilterCriteria, IncidentRecord, Intent, RecordSource, Recorded};

#[derive(Parser)]
#[command(name = "watchdesk")]
#[command(about = "Incident report dashboard: filter, triage and review reports from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    Run {
        /// JSON dataset to load (built-in data when omitted)
        #[arg(long)]
        data: Option<PathBuf>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Serve Prometheus metrics on this address
        #[arg(long)]
        metrics_addr: Option<SocketAddr>,
        /// Write logs to this file (the terminal belongs to the UI)
        #[arg(long)]
        log_file: Option<PathBuf>,
        /// Emit logs as JSON lines
        #[arg(long)]
        log_json: bool,
        #[command(flatten)]
        filters: FilterOverrides,
    },
    /// Print the filtered report list and exit
    List {
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        filters: FilterOverrides,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            metrics_addr,
            log_file,
            log_json,
            filters,
        } => {
            init_logging(log_file.as_deref(), log_json, false)?;
            let config = DashboardConfig::load_or_default(config.as_deref())
                .context("Failed to load config")?
                .with_data(data)
                .with_metrics_addr(metrics_addr)
                .with_filter_overrides(filters);
            run_dashboard(config).await?;
        }
        Commands::List {
            data,
            config,
            filters,
            json,
        } => {
            init_logging(None, false, true)?;
            let config = DashboardConfig::load_or_default(config.as_deref())
                .context("Failed to load config")?
                .with_data(data)
                .with_filter_overrides(filters);
            list_reports(config.data, config.filters, json).await?;
        }
    }

    Ok(())
}

fn init_logging(log_file: Option<&Path>, json: bool, to_stderr: bool) -> anyhow::Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None if to_stderr => BoxMakeWriter::new(std::io::stderr),
        None => BoxMakeWriter::new(std::io::sink),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn run_dashboard(config: DashboardConfig) -> anyhow::Result<()> {
    init_metrics(config.metrics_addr).context("Failed to install Prometheus metrics exporter")?;

    let source = DataSource::from_path(config.data.clone());
    info!("Starting dashboard with {} data", source.describe());

    let app = TuiApp::new(config.filters.clone(), source.describe());
    run_tui(app, source, Duration::from_millis(config.tick_ms)).await
}

async fn list_reports(data: Option<PathBuf>, criteria: FilterCriteria, json: bool) -> anyhow::Result<()> {
    let source = DataSource::from_path(data);
    let dataset = source
        .fetch_dataset()
        .await
        .with_context(|| format!("Failed to load reports from {}", source.describe()))?;

    print!("{}", render_report_list(dataset, criteria, json)?);
    Ok(())
}

/// Applies the criteria to a loaded dataset and formats the derived view.
fn render_report_list(dataset: Dataset, criteria: FilterCriteria, json: bool) -> anyhow::Result<String> {
    let mut dashboard = DashboardState::new(criteria);
    let mut sink = Recorded::default();
    dashboard.update(Intent::Loaded(Ok(dataset)), &mut sink);

    let rows: Vec<&IncidentRecord> = dashboard.view().collect();
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&rows)?));
    }

    let mut out = format!(
        "{:<6} {:<14} {:<18} {:<22} {:<16} {}\n",
        "ID", "TYPE", "LOCATION", "DATE/TIME", "REPORTER", "STATUS"
    );
    for record in &rows {
        out.push_str(&format!(
            "{:<6} {:<14} {:<18} {:<22} {:<16} {}\n",
            record.id.to_string(),
            record.incident,
            record.location,
            record.date_time(),
            record.reporter,
            record.status
        ));
    }
    out.push_str(&format!("{} of {} reports\n", rows.len(), dashboard.store().len()));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use watchdesk_core::MockSource;

    #[test]
    fn test_list_applies_file_and_flag_filters() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"filters": {{"month": "04"}}}}"#).unwrap();
        let config = DashboardConfig::load(file.path())
            .unwrap()
            .with_filter_overrides(FilterOverrides {
                reporter: Some("Jane Smith".into()),
                ..Default::default()
            });

        let out = render_report_list(MockSource::dataset(), config.filters, false).unwrap();
        assert!(out.contains("Car Crash"));
        assert!(!out.contains("John Doe"));
        assert!(out.ends_with("1 of 2 reports\n"));
    }

    #[test]
    fn test_list_json_carries_store_ids() {
        let out = render_report_list(MockSource::dataset(), FilterCriteria::default(), true).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], 1);
        assert_eq!(rows[1]["reporter"], "Jane Smith");
    }

    #[test]
    fn test_cli_parses_filter_flags() {
        let cli = Cli::try_parse_from(["watchdesk", "list", "--month", "04", "--reporter", "John Doe", "--json"]).unwrap();
        match cli.command {
            Commands::List { filters, json, .. } => {
                assert!(json);
                assert_eq!(filters.month.as_deref(), Some("04"));
                assert_eq!(filters.reporter.as_deref(), Some("John Doe"));
                assert!(filters.search.is_none());
            }
            Commands::Run { .. } => panic!("expected list"),
        }
    }
}
