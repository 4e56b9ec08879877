use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dcgrid_core::item::PlacedItem;
use dcgrid_core::template::Palette;
use dcgrid_engine::{Designer, DesignerConfig};
use dcgrid_stats::AggregateStats;
use tracing_subscriber::EnvFilter;

mod script;

use script::Intent;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "dcgrid", about = "Data center layout simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an intent script and print the resulting layout.
    Run {
        /// Module metadata table.
        #[arg(long, default_value = "data/modules.csv")]
        modules: PathBuf,
        /// Palette file (TOML or JSON). Defaults to the built-in palette.
        #[arg(long)]
        palette: Option<PathBuf>,
        /// Designer config file (RON, TOML or JSON).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Stop at the first rejected intent instead of continuing.
        #[arg(long)]
        strict: bool,
        script: PathBuf,
    },
    /// List the templates in a palette.
    Palette {
        #[arg(long)]
        palette: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn load_palette(path: Option<&Path>) -> Result<Palette> {
    match path {
        Some(path) => dcgrid_data::load_palette(path)
            .with_context(|| format!("loading palette {}", path.display())),
        None => dcgrid_data::builtin_palette().context("building the built-in palette"),
    }
}

fn load_config(path: Option<&Path>) -> Result<DesignerConfig> {
    match path {
        Some(path) => dcgrid_data::deserialize_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(DesignerConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_item(item: &PlacedItem, designer: &Designer) {
    let at = item
        .position
        .map(|p| format!("({}, {})", p.row, p.col))
        .unwrap_or_else(|| "-".to_string());
    println!("{} {at}", item.id);
    if let Some(view) = designer.inspect(&item.id) {
        for badge in &view.badges {
            println!("    {badge}");
        }
    }
}

fn print_stats(stats: &AggregateStats) {
    println!(
        "power:   {:>6} generated {:>6} consumed {:>6} net",
        stats.power_generation,
        stats.power_consumption,
        stats.net_power()
    );
    println!(
        "water:   {:>6} generated {:>6} consumed {:>6} net",
        stats.water_generation,
        stats.water_consumption,
        stats.net_water()
    );
    println!(
        "thermal: {:>6} cooling   {:>6} heat     {:>6} net",
        stats.cooling_capacity,
        stats.heat_generation,
        stats.net_thermal()
    );
    println!(
        "savings: power {} water {} heat {}",
        stats.power_savings, stats.water_savings, stats.heat_reduction
    );
    println!(
        "compute: storage {} processing {} protected {}",
        stats.storage_capacity, stats.processing_power, stats.protected_components
    );
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn apply(designer: &mut Designer, intent: &Intent) -> Result<String, dcgrid_core::PlacementError> {
    let outcome = match intent {
        Intent::Place { template, row, col } => designer.place(template, *row, *col)?,
        Intent::Move { id, row, col } => {
            designer.begin_drag(id)?;
            designer.move_item(id, *row, *col)?
        }
        Intent::Remove { id } => designer.remove(id)?,
        Intent::Rotate { id } => designer.rotate(id)?,
        Intent::Viewport {
            width,
            height,
            cell,
        } => {
            designer.fit_viewport(*width, *height, *cell);
            let dims = designer.dimensions();
            return Ok(format!("canvas {}x{}", dims.rows, dims.cols));
        }
    };
    let note = if outcome.status_changed { " (statuses updated)" } else { "" };
    Ok(format!("{}{note}", outcome.id))
}

fn run(
    modules: &Path,
    palette: Option<&Path>,
    config: Option<&Path>,
    strict: bool,
    script_path: &Path,
) -> Result<()> {
    let catalog = dcgrid_data::load_catalog_lossy(modules);
    let palette = load_palette(palette)?;
    let config = load_config(config)?;
    let text = std::fs::read_to_string(script_path)
        .with_context(|| format!("reading script {}", script_path.display()))?;
    let intents = script::parse(&text)
        .with_context(|| format!("parsing script {}", script_path.display()))?;

    tracing::info!(
        modules = catalog.len(),
        templates = palette.len(),
        intents = intents.len(),
        "run.start"
    );

    let mut designer = Designer::new(config, palette, catalog);
    let mut rejected = 0usize;
    for (line, intent) in &intents {
        match apply(&mut designer, intent) {
            Ok(summary) => println!("{line:>4}: ok       {summary}"),
            Err(e) => {
                rejected += 1;
                println!("{line:>4}: rejected {e}");
                if strict {
                    anyhow::bail!("line {line}: {e}");
                }
            }
        }
    }

    println!();
    for item in designer.items() {
        print_item(item, &designer);
    }
    println!();
    print_stats(&designer.aggregate_stats());

    tracing::info!(
        items = designer.items().len(),
        rejected,
        revision = designer.revision(),
        "run.done"
    );
    Ok(())
}

fn list_palette(path: Option<&Path>) -> Result<()> {
    let palette = load_palette(path)?;
    for t in palette.iter() {
        println!(
            "{:<24} {:<24} {:>2}x{:<2} {:<18} {}",
            t.id.as_str(),
            t.label,
            t.footprint.width,
            t.footprint.height,
            t.kind.name(),
            t.category
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            modules,
            palette,
            config,
            strict,
            script,
        } => run(
            &modules,
            palette.as_deref(),
            config.as_deref(),
            strict,
            &script,
        ),
        Commands::Palette { palette } => list_palette(palette.as_deref()),
    }
}
