//! FIRE Dashboard CLI
//!
//! Terminal front end for the dashboard backend:
//! - Show KPI summaries
//! - List a section's graphs in display order
//! - Compute a graph container's layout
//! - Fetch drill-down figures

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fire_dashboard::api;
use fire_dashboard::config::{generate_default_config, Config, DevConfig};
use fire_dashboard::pages::{self, Section};
use fire_dashboard::summary::{PanelView, Summary, SummaryPanel};
use fire_dashboard::{ContainerSize, Figure, GraphContainer, LoadState};

#[derive(Parser)]
#[command(name = "fire-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal-finance FIRE dashboard client")]
#[command(long_about = "FIRE Dashboard reads precomputed summaries and Plotly figures from the\nfinance backend and renders the dashboard pages in the terminal.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Serve built-in fixtures instead of calling the backend
    #[arg(long, global = true)]
    pub mock: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Config file (default: <config dir>/fire-dashboard/config.toml, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a section's KPI panel
    Summary {
        /// Section (portfolio, allocation, cashflow)
        section: Section,
    },

    /// List a section's graphs in display order
    Graphs {
        /// Section (portfolio, allocation, cashflow)
        section: Section,
    },

    /// Print the layout a graph container computes for a graph
    Layout {
        /// Section (portfolio, allocation, cashflow)
        section: Section,
        /// Graph key (e.g. assets)
        key: String,
        /// Compute the fullscreen layout
        #[arg(long)]
        fullscreen: bool,
        /// Window inner width used for fullscreen font scaling
        #[arg(long, default_value = "1920")]
        viewport_width: f64,
        /// Container content width
        #[arg(long, default_value = "800")]
        width: f64,
        /// Container content height, title strip included
        #[arg(long, default_value = "435")]
        height: f64,
    },

    /// Fetch a drill-down figure
    Details {
        /// Graph id (e.g. liquidity_horizon)
        graph_id: String,
        /// Asset sub-type (a trace name of the graph)
        #[arg(short, long)]
        sub_type: Option<String>,
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

    let (mut config, search) = match &cli.config {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("Cannot load config from {}", path.display()))?;
            (config, None)
        }
        None => {
            let loaded = Config::load_default_reporting();
            (loaded.config.clone(), Some(loaded))
        }
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if cli.mock {
        config.dev = DevConfig::new(true, true);
    }

    init_logging(&config);
    if let Some(search) = &search {
        search.log();
    }
    tracing::debug!(base_url = %config.api.base_url, mocking = config.dev.mocking_enabled(), "Configuration resolved");

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Cannot write {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let api = api::connect(&config);

    match cli.command {
        Commands::Summary { section } => {
            let Some(panel) = section.summary_panel() else {
                bail!("{} has no summary panel", section);
            };
            let state = LoadState::from(api.fetch_summary(section).await);
            print_panel(panel, &state, cli.format)?;
            if let Some(message) = state.error() {
                bail!("{}", message);
            }
        }

        Commands::Graphs { section } => {
            let summary = async {
                match section.summary_panel() {
                    Some(_) => Some(api.fetch_summary(section).await),
                    None => None,
                }
            };
            let (graphs, summary) = tokio::join!(api.fetch_graphs(section), summary);

            if let (Some(panel), Some(summary)) = (section.summary_panel(), summary) {
                if let Err(e) = &summary {
                    tracing::warn!("Summary fetch failed for {}: {}", section, e);
                }
                print_panel(panel, &LoadState::from(summary), cli.format)?;
                if cli.format == OutputFormat::Table {
                    println!();
                }
            }

            match section.page_view(graphs) {
                LoadState::Ready(placed) => match cli.format {
                    OutputFormat::Json => {
                        let rows: Vec<_> = placed
                            .iter()
                            .map(|graph| {
                                json!({
                                    "key": graph.key,
                                    "title": section.title_text(&graph.key),
                                    "traces": graph.figure.trace_count(),
                                    "types": graph.figure.trace_types(),
                                })
                            })
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&rows)?);
                    }
                    OutputFormat::Table => {
                        println!("{}", section.label());
                        if placed.is_empty() {
                            println!("No graphs available.");
                        } else {
                            println!("{:<28} {:<32} {:>6}  {}", "Key", "Title", "Traces", "Types");
                            println!("{}", "-".repeat(80));
                            for graph in &placed {
                                println!(
                                    "{:<28} {:<32} {:>6}  {}",
                                    graph.key,
                                    section.title_text(&graph.key),
                                    graph.figure.trace_count(),
                                    graph.figure.trace_types().join(", ")
                                );
                            }
                        }
                    }
                },
                LoadState::Failed(message) => {
                    tracing::warn!("Graphs fetch failed for {}: {}", section, message);
                    bail!("{}", message);
                }
                LoadState::Loading => {}
            }
        }

        Commands::Layout {
            section,
            key,
            fullscreen,
            viewport_width,
            width,
            height,
        } => {
            let graphs = api.fetch_graphs(section).await?;
            let figure = match graphs.figure(&key) {
                Some(figure) => figure?,
                None => bail!("{} has no graph '{}'", section, key),
            };

            let mut graph = GraphContainer::new(figure);
            graph.set_viewport_width(viewport_width);
            graph.resize(ContainerSize::new(width, height));
            if fullscreen {
                graph.activate_title();
            }
            let layout = graph
                .current_layout()
                .context("Container width must be positive")?;

            match cli.format {
                OutputFormat::Json => {
                    let out = json!({"data": graph.data(), "layout": layout});
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                OutputFormat::Table => {
                    println!("Graph:      {}", section.title_text(&key));
                    println!("Mode:       {:?}", graph.mode());
                    println!("Font scale: {}", graph.font_scale());
                    if let Some(plot) = graph.plot_size() {
                        println!("Plot size:  {} x {}", plot.width, plot.height);
                    }
                    println!();
                    println!("{}", serde_json::to_string_pretty(&layout)?);
                }
            }
        }

        Commands::Details { graph_id, sub_type } => {
            let figure = api.fetch_details(&graph_id, sub_type.as_deref()).await?;
            print_figure(
                &pages::details_title(&graph_id, sub_type.as_deref()),
                &figure,
                cli.format,
            )?;
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Install the tracing subscriber; logs go to stderr
fn init_logging(config: &Config) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone());
    let json = config.logging.is_json();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn print_panel(
    panel: SummaryPanel,
    state: &LoadState<Summary>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let view = panel.view(state);

    if format == OutputFormat::Json {
        let out = match &view {
            PanelView::Loading(text) => json!({"panel": panel.heading(), "loading": text}),
            PanelView::Error(message) => json!({"panel": panel.heading(), "error": message}),
            PanelView::Grid(rows) => json!({
                "panel": panel.heading(),
                "rows": rows
                    .iter()
                    .map(|row| json!({"label": row.label, "value": row.display_value()}))
                    .collect::<Vec<_>>(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", panel.heading());
    match view {
        PanelView::Loading(text) => println!("  {}", text),
        PanelView::Error(message) => println!("  {}", message),
        PanelView::Grid(rows) => {
            for row in rows {
                println!("  {:<22} {}", row.label, row.display_value());
            }
        }
    }
    Ok(())
}

fn print_figure(title: &str, figure: &Figure, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let out = json!({"title": title, "figure": figure});
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            println!("{}", title);
            println!("{}", "-".repeat(title.chars().count().max(20)));
            println!("Traces: {}", figure.trace_count());
            for (i, trace) in figure.data.iter().enumerate() {
                let kind = trace.get("type").and_then(|v| v.as_str()).unwrap_or("scatter");
                let name = trace.get("name").and_then(|v| v.as_str()).unwrap_or_default();
                println!("  {}: {} {}", i, kind, name);
            }
        }
    }
    Ok(())
}
