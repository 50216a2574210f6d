use analytics::{format_value, ExecutiveSummary, NO_DATA};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use core_types::{MetricResult, MetricSet, MetricStatus};
use serde_json::Value;
use std::path::PathBuf;
use web_server::{handlers::run_analysis, models::AnalyzeRequest};

/// The main entry point for the Pyra financial analysis application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_settings()?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                settings.server.host = host;
            }
            if let Some(port) = args.port {
                settings.server.port = port;
            }
            web_server::run_server(settings).await
        }
        Commands::Analyze(args) => handle_analyze(args, settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Financial ratio analysis: ten classified metrics and an executive summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Analyze the figures in a JSON file and print the result.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.host` from the configuration.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port` from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// A full analyze request, or just the raw values object.
    file: PathBuf,

    #[arg(long)]
    company: Option<String>,

    /// Reporting period label (e.g., "2024-Q4").
    #[arg(long)]
    period: Option<String>,

    /// ISO currency code; defaults to `analysis.default_currency`.
    #[arg(long)]
    currency: Option<String>,

    /// Print the response body as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

async fn handle_analyze(args: AnalyzeArgs, settings: configuration::Settings) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let document: Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", args.file.display()))?;
    let request = build_request(document, &args)?;

    let state = web_server::build_state(settings).await;
    let response = run_analysis(&state, request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", metrics_table(&response.metrics));
    println!();
    print_executive(&response.executive);
    if let Some(ai) = &response.ai {
        println!("\n{}", ai.summary);
    }
    if let Some(id) = response.id {
        println!("\nSaved as {id}");
    }
    Ok(())
}

/// Turns the file contents plus the command-line flags into a request.
fn build_request(document: Value, args: &AnalyzeArgs) -> anyhow::Result<AnalyzeRequest> {
    let mut document = match document {
        Value::Object(map) if map.contains_key("values") => map,
        values @ Value::Object(_) => {
            let mut map = serde_json::Map::new();
            map.insert("values".to_string(), values);
            map
        }
        _ => anyhow::bail!("Expected a JSON object"),
    };

    for (field, value) in [
        ("company", &args.company),
        ("period", &args.period),
        ("currency", &args.currency),
    ] {
        if let Some(value) = value {
            document.insert(field.to_string(), Value::String(value.clone()));
        }
    }

    serde_json::from_value(Value::Object(document)).context("Invalid analyze request")
}

fn metrics_table(metrics: &MetricSet) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value", "Status", "Formula"]);

    for metric in metrics.iter() {
        table.add_row(vec![
            Cell::new(metric.label),
            Cell::new(display_value(metric)),
            Cell::new(metric.status).fg(status_color(metric.status)),
            Cell::new(metric.formula),
        ]);
    }
    table
}

fn display_value(metric: &MetricResult) -> String {
    match metric.value {
        Some(value) => format!("{}{}", format_value(value), metric.unit.unwrap_or_default()),
        None => NO_DATA.to_string(),
    }
}

fn status_color(status: MetricStatus) -> Color {
    match status {
        MetricStatus::Red => Color::Red,
        MetricStatus::Yellow => Color::Yellow,
        MetricStatus::Green => Color::Green,
    }
}

fn print_executive(executive: &ExecutiveSummary) {
    println!("{}", executive.headline);
    for bullet in &executive.bullets {
        println!("  • {bullet}");
    }
}
