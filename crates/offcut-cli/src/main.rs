use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use offcut_core::{
    render_svg, CanvasConfig, Inventory, LeftoverCalculator, LeftoverStatus, OffcutError, Packer,
    PieceRequest,
};
use serde::{de::DeserializeOwned, Deserialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "offcut")]
#[command(about = "Offcut tracker - leftover sheet accounting and canvas packing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute leftover pieces for every stock sheet
    Leftovers {
        /// Inventory file with products, stock and orders (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Place pieces on the visualizer canvas
    Pack {
        /// Pack file with canvas settings and pieces (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Re-place everything largest-first after adding
        #[arg(long)]
        arrange: bool,

        /// Output file for the layout (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write an SVG drawing of the canvas
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

/// Input document of the `pack` command
#[derive(Deserialize)]
struct PackFile {
    #[serde(default)]
    canvas: CanvasConfig,
    pieces: Vec<PieceRequest>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Leftovers { input, output } => {
            leftovers_command(input, output)?;
        }
        Commands::Pack {
            input,
            arrange,
            output,
            svg,
        } => {
            pack_command(input, arrange, output, svg)?;
        }
    }

    Ok(())
}

/// Reads YAML for `.yaml`/`.yml`, JSON for anything else.
fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );
    let document = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(document)
}

fn write_or_print<T: serde::Serialize>(value: &T, output: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn leftovers_command(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "🔍 Loading inventory...".bright_blue());

    let inventory: Inventory = load_document(&input)?;

    println!(
        "  {} stock sheets",
        inventory.stock.len().to_string().bright_white().bold()
    );
    println!(
        "  {} orders",
        inventory.orders.len().to_string().bright_white().bold()
    );
    println!();

    let report = LeftoverCalculator::from_inventory(&inventory).calculate();

    println!("{}", "📊 Leftovers:".bright_yellow().bold());
    for piece in &report.pieces {
        let status = match piece.status {
            LeftoverStatus::Available => "available".bright_green(),
            LeftoverStatus::Used => "used".bright_red(),
        };
        println!(
            "    • {} ({}) {:.4} m² left, {:.1}% used [{}]",
            piece.sheet_id.bright_white(),
            piece.product_name,
            piece.remaining_area,
            piece.utilization_percent(),
            status
        );
    }
    println!();
    println!(
        "  Total leftover area: {} m²",
        format!("{:.4}", report.summary.total_remaining_area).bright_white()
    );
    println!(
        "  Available: {}  Used: {}",
        report.summary.available_count.to_string().bright_green(),
        report.summary.used_count.to_string().bright_red()
    );

    if !report.diagnostics.is_empty() {
        println!(
            "  {} sheets skipped or malformed (see log)",
            report.diagnostics.len().to_string().yellow()
        );
    }
    println!();

    write_or_print(&report, output)
}

fn pack_command(
    input: PathBuf,
    arrange: bool,
    output: Option<PathBuf>,
    svg: Option<PathBuf>,
) -> Result<()> {
    println!("{}", "🔍 Loading pieces...".bright_blue());

    let pack: PackFile = load_document(&input)?;
    let mut packer = Packer::new(pack.canvas)?;

    for piece in &pack.pieces {
        match packer.add_piece(piece) {
            Ok(rect) => println!(
                "  {} {} @ ({}, {})",
                "+".bright_green(),
                rect.label,
                rect.x,
                rect.y
            ),
            Err(err @ OffcutError::NoRoom { .. }) => {
                println!("  {} {}x{}: {}", "✗".bright_red(), piece.width, piece.height, err);
            }
            Err(err) => return Err(err.into()),
        }
    }

    if arrange {
        println!();
        println!("{}", "🚀 Auto-arranging...".bright_blue());
        for rect in packer.auto_arrange() {
            println!("  {} {} no longer fits", "✗".bright_red(), rect.label);
        }
    }

    println!();
    println!(
        "  Pieces placed: {}",
        packer.len().to_string().bright_white().bold()
    );
    println!(
        "  Utilization: {}%",
        packer.utilization_label().bright_white()
    );
    println!();

    if let Some(svg_path) = svg {
        let drawing = render_svg(packer.rectangles(), packer.config())?;
        std::fs::write(&svg_path, drawing)?;
        println!(
            "{} Saved SVG to {}",
            "✅".bright_green(),
            svg_path.display().to_string().bright_white()
        );
    }

    write_or_print(&packer.snapshot(), output)
}
