//! Tessera CLI
//!
//! Command-line interface for a dashboard's data:
//! - Check whether data is configured and how old it is
//! - Inspect the published data file
//! - Render a chart to a standalone HTML page
//! - Generate the default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

use tessera::chart::{
    svg::escape, AreaChart, BarChart, Chart, ChartKind, ChartOptions, LineChart, PieChart,
    SeriesSpec, ValueFormatter,
};
use tessera::config::{generate_default_config, Config, LoggingConfig};
use tessera::data::{data_age, field_names, DataFile, DataLoader, Fetch, FsFetcher, HttpFetcher};

type Rows = Map<String, Value>;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect dashboard data and render charts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Static root to read data files from (contains data/)
    #[arg(long, default_value = "./public", global = true)]
    pub root: PathBuf,

    /// Read from a running dashboard server instead (e.g. http://localhost:8084)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Data file name (default: from config)
    #[arg(long, global = true)]
    pub file: Option<String>,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show whether data is configured and how old it is
    Status,

    /// Show metadata, row counts and field names
    Inspect {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render one chart from the data file to an HTML page
    Render {
        /// Chart kind: line, bar, area, pie (or donut)
        kind: ChartKind,
        /// Chart title
        #[arg(short, long, default_value = "Chart")]
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Category field for line/bar/area charts
        #[arg(short = 'x', long, default_value = "period")]
        x_key: String,
        /// Series as `field` or `field:Label`, repeatable
        #[arg(short, long)]
        series: Vec<String>,
        /// Value field for pie charts
        #[arg(long, default_value = "value")]
        value_key: String,
        /// Name field for pie charts
        #[arg(long, default_value = "name")]
        name_key: String,
        #[arg(long)]
        stacked: bool,
        #[arg(long)]
        horizontal: bool,
        #[arg(long)]
        donut: bool,
        /// Format tooltip values as dollars
        #[arg(long)]
        currency: bool,
        /// Message shown when there is no data
        #[arg(long)]
        empty_message: Option<String>,
        /// Output file
        #[arg(short, long, default_value = "chart.html")]
        output: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    let logging = LoggingConfig {
        level: if cli.verbose { "debug" } else { "warn" }.to_string(),
        ..config.logging.clone()
    };
    tessera::logging::init(&logging).context("Failed to initialize logging")?;

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let file = cli.file.clone().unwrap_or_else(|| config.data.monthly_file.clone());
    match &cli.url {
        Some(url) => {
            let loader = DataLoader::with_base_path(HttpFetcher::new(url.as_str())?, &config.data.base_path);
            run(&cli, &config, &loader, &file).await
        }
        None => {
            let loader = DataLoader::with_base_path(FsFetcher::new(&cli.root), &config.data.base_path);
            run(&cli, &config, &loader, &file).await
        }
    }
}

async fn run<F: Fetch>(cli: &Cli, config: &Config, loader: &DataLoader<F>, file: &str) -> anyhow::Result<()> {
    let source = cli
        .url
        .clone()
        .unwrap_or_else(|| cli.root.display().to_string());

    match &cli.command {
        Commands::Status => {
            println!("Tessera v{}", env!("CARGO_PKG_VERSION"));
            println!();

            if !loader.has_file(file).await {
                println!("Data: not configured ({} not found in {})", file, source);
                println!();
                println!("Run the data sync pipeline to publish {}", loader.path_for(file));
                std::process::exit(1);
            }

            let data: DataFile<Rows> = loader.load_data_file(file).await?;
            println!("Data: configured");
            println!("  Source:  {}", data.metadata.source);
            if let Some(sheet) = &data.metadata.sheet {
                println!("  Sheet:   {}", sheet);
            }
            println!("  Rows:    {}", data.len());
            println!("  Updated: {}", data_age(&data.metadata.fetched_at));
        }

        Commands::Inspect { json } => {
            let data: DataFile<Rows> = match loader.load_optional(file).await {
                Some(data) => data,
                None => {
                    eprintln!("No {} found in {}. Configure data source first.", file, source);
                    std::process::exit(1);
                }
            };
            let fields = field_names(&data.data);

            if *json {
                let report = serde_json::json!({
                    "metadata": &data.metadata,
                    "rows": data.len(),
                    "age": data_age(&data.metadata.fetched_at),
                    "fields": fields,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{:<12} {}", "Source", data.metadata.source);
                println!("{:<12} {}", "Sheet", data.metadata.sheet.as_deref().unwrap_or("-"));
                println!("{:<12} {} ({})", "Fetched", data.metadata.fetched_at, data_age(&data.metadata.fetched_at));
                println!("{:<12} {}", "Row count", data.metadata.row_count);
                println!("{:<12} {}", "Rows", data.len());
                if let Some((claimed, actual)) = data.row_count_mismatch() {
                    println!();
                    println!("Warning: row_count says {} but the file has {} rows", claimed, actual);
                }
                println!();
                println!("Fields:");
                for field in fields {
                    println!("  {}", field);
                }
            }
        }

        Commands::Render {
            kind,
            title,
            description,
            x_key,
            series,
            value_key,
            name_key,
            stacked,
            horizontal,
            donut,
            currency,
            empty_message,
            output,
        } => {
            // Absence renders the empty state, a broken file the error state
            let (rows, error) = match loader.load_data_file::<Rows>(file).await {
                Ok(data) => (Some(data.data), None),
                Err(e) if e.is_not_found() => (None, None),
                Err(e) => (None, Some(e.to_string())),
            };

            let mut options = ChartOptions::new(title.as_str());
            options.description = description.clone();
            options.error = error;
            options.empty_message = empty_message.clone();
            options.palette = config.charts.palette()?;
            if *currency {
                let dollars: ValueFormatter = Arc::new(|v| format!("${:.2}", v));
                options.format_tooltip = Some(dollars);
            }

            let specs: Vec<SeriesSpec> = series.iter().map(|s| parse_series(s)).collect();
            let data = rows.as_deref();
            let empty: &[Rows] = &[];
            let body = match kind {
                ChartKind::Line => with_options(LineChart::new("", empty, x_key.as_str()).lines(specs).data(data), options),
                ChartKind::Bar => with_options(
                    BarChart::new("", empty, x_key.as_str())
                        .bars(specs)
                        .stacked(*stacked)
                        .horizontal(*horizontal)
                        .data(data),
                    options,
                ),
                ChartKind::Area => with_options(
                    AreaChart::new("", empty, x_key.as_str()).areas(specs).stacked(*stacked).data(data),
                    options,
                ),
                ChartKind::Pie => with_options(
                    PieChart::new("", empty, value_key.as_str(), name_key.as_str())
                        .donut(*donut)
                        .data(data),
                    options,
                ),
            };

            std::fs::write(output, html_page(title, &body)).with_context(|| format!("Failed to write {:?}", output))?;
            println!("Rendered {} chart to {:?}", kind, output);
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn with_options<C: Chart>(mut chart: C, options: ChartOptions) -> String {
    *chart.options_mut() = options;
    chart.render()
}

/// `revenue` or `revenue:Revenue ($)`
fn parse_series(arg: &str) -> SeriesSpec {
    match arg.split_once(':') {
        Some((key, label)) if !label.is_empty() => SeriesSpec::new(key.trim()).label(label.trim()),
        _ => SeriesSpec::new(arg.trim().trim_end_matches(':')),
    }
}

fn html_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{}</title>
<style>
body {{ font-family: system-ui, sans-serif; margin: 2rem; color: #111827; }}
.chart-card {{ max-width: 720px; border: 1px solid #E5E7EB; border-radius: 8px; padding: 1rem 1.5rem; }}
.chart-card h3 {{ margin: 0 0 0.25rem; }}
.chart-card p {{ margin: 0; color: #6B7280; }}
.chart-content > div {{ display: flex; align-items: center; justify-content: center; margin-top: 1rem; }}
.border-dashed {{ border: 2px dashed #E5E7EB; border-radius: 8px; }}
</style>
</head>
<body>
{}
</body>
</html>
"#,
        escape(title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_series() {
        assert_eq!(parse_series("revenue"), SeriesSpec::new("revenue"));
        assert_eq!(
            parse_series("revenue:Revenue ($)"),
            SeriesSpec::new("revenue").label("Revenue ($)")
        );
        assert_eq!(parse_series("revenue:"), SeriesSpec::new("revenue"));
    }

    #[test]
    fn test_html_page() {
        let page = html_page("Q1 <draft>", "<div>chart</div>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Q1 &lt;draft&gt;</title>"));
        assert!(page.contains("<div>chart</div>"));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "tessera", "render", "bar", "--series", "revenue:Revenue", "--series", "expenses", "--stacked",
            "--root", "/srv/site",
        ])
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("/srv/site"));
        match cli.command {
            Commands::Render { kind, series, stacked, .. } => {
                assert_eq!(kind, ChartKind::Bar);
                assert_eq!(series.len(), 2);
                assert!(stacked);
            }
            _ => panic!("expected render"),
        }

        assert!(Cli::try_parse_from(["tessera", "render", "radar"]).is_err());
    }
}
