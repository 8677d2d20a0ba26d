//! runoffcn CLI - SCS Curve Number raster toolkit

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use runoffcn_algorithms::algebra::{
    binary_op, reclassify_assign, reclassify_ranges, BinaryOp, RangeEntry,
};
use runoffcn_algorithms::curve_number::{
    curve_number, run_pipeline, CoverClass, PipelineConfig, SoilGroup, DEFAULT_AGRICULTURE,
    DEFAULT_LAND_COVER, DEFAULT_SOIL_GROUP,
};
use runoffcn_core::io::{read_geotiff, write_geotiff, GeoTiffOptions};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "runoffcn")]
#[command(author, version, about = "SCS Curve Number raster toolkit", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a raster file
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Reclassify raster values using a lookup table
    Reclass {
        /// Input raster
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Assign mode: "new;old;..." pairs. Range mode: "new;min;max;..." triples
        #[arg(short, long)]
        table: String,
        /// Exact-value matching instead of ranges
        #[arg(short, long)]
        assign: bool,
    },
    /// Cell-wise math between two rasters
    Math {
        /// First input raster
        input1: PathBuf,
        /// Second input raster
        input2: PathBuf,
        /// Output file
        output: PathBuf,
        /// Operation: add, subtract, multiply, divide
        #[arg(short, long)]
        op: String,
    },
    /// Run the full Curve Number pipeline on a working directory
    CurveNumber {
        /// Directory holding the input rasters; outputs land here too
        #[arg(short, long)]
        work_dir: PathBuf,
        /// Land cover raster file name (class codes 1-8)
        #[arg(long, default_value = DEFAULT_LAND_COVER)]
        land_cover: String,
        /// Agriculture mask raster file name (values 0/10)
        #[arg(long, default_value = DEFAULT_AGRICULTURE)]
        agriculture: String,
        /// Hydrologic soil group raster file name (codes 1/10/100/1000)
        #[arg(long, default_value = DEFAULT_SOIL_GROUP)]
        soil_group: String,
    },
    /// Print the Curve Number lookup table
    Table,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_raster(path: &PathBuf) -> Result<runoffcn_core::Raster<f64>> {
    let pb = spinner("Reading raster...");
    let raster: runoffcn_core::Raster<f64> =
        read_geotiff(path, None).with_context(|| format!("Failed to read {}", path.display()))?;
    pb.finish_and_clear();
    info!("Input: {} x {}", raster.cols(), raster.rows());
    Ok(raster)
}

fn write_result(raster: &runoffcn_core::Raster<f64>, path: &PathBuf) -> Result<()> {
    let pb = spinner("Writing output...");
    write_geotiff(raster, path, Some(GeoTiffOptions::default()))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, path: &PathBuf, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn parse_binary_op(s: &str) -> Result<BinaryOp> {
    match s.to_lowercase().as_str() {
        "add" | "+" => Ok(BinaryOp::Add),
        "subtract" | "sub" | "-" => Ok(BinaryOp::Subtract),
        "multiply" | "mul" | "*" => Ok(BinaryOp::Multiply),
        "divide" | "div" | "/" => Ok(BinaryOp::Divide),
        _ => anyhow::bail!(
            "Unknown operation: {}. Use add, subtract, multiply, divide.",
            s
        ),
    }
}

/// Parse "new;old;new;old;..." into assign-mode pairs
fn parse_assign_table(s: &str) -> Result<Vec<(f64, f64)>> {
    let values = parse_values(s)?;
    if values.is_empty() || values.len() % 2 != 0 {
        anyhow::bail!("Assign table needs new;old pairs, got {} values", values.len());
    }
    Ok(values.chunks(2).map(|c| (c[0], c[1])).collect())
}

/// Parse "new;min;max;new;min;max;..." into range entries
fn parse_range_table(s: &str) -> Result<Vec<RangeEntry>> {
    let values = parse_values(s)?;
    if values.is_empty() || values.len() % 3 != 0 {
        anyhow::bail!(
            "Range table needs new;min;max triples, got {} values",
            values.len()
        );
    }
    Ok(values
        .chunks(3)
        .map(|c| RangeEntry::new(c[0], c[1], c[2]))
        .collect())
}

fn parse_values(s: &str) -> Result<Vec<f64>> {
    s.split(';')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid table value: {}", v))
        })
        .collect()
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let raster = read_raster(&input)?;
            let (rows, cols) = raster.shape();
            let bounds = raster.bounds();
            let stats = raster.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            println!("Cell size: {}", raster.cell_size());
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                bounds.0, bounds.1, bounds.2, bounds.3
            );
            if let Some(crs) = raster.crs() {
                println!("CRS: {}", crs);
            }
            if let Some(nodata) = raster.nodata() {
                println!("NoData: {}", nodata);
            }
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            println!(
                "  Valid cells: {} ({:.1}%)",
                stats.valid_count,
                100.0 * stats.valid_count as f64 / raster.len() as f64
            );
        }

        Commands::Reclass {
            input,
            output,
            table,
            assign,
        } => {
            let raster = read_raster(&input)?;
            let start = Instant::now();
            let result = if assign {
                let pairs = parse_assign_table(&table)?;
                reclassify_assign(&raster, &pairs).context("Failed to reclassify")?
            } else {
                let entries = parse_range_table(&table)?;
                reclassify_ranges(&raster, &entries).context("Failed to reclassify")?
            };
            let elapsed = start.elapsed();
            write_result(&result, &output)?;
            done("Reclassified raster", &output, elapsed);
        }

        Commands::Math {
            input1,
            input2,
            output,
            op,
        } => {
            let op = parse_binary_op(&op)?;
            let a = read_raster(&input1)?;
            let b = read_raster(&input2)?;
            let start = Instant::now();
            let result = binary_op(&a, &b, op).context("Failed to apply operation")?;
            let elapsed = start.elapsed();
            write_result(&result, &output)?;
            done("Result", &output, elapsed);
        }

        Commands::CurveNumber {
            work_dir,
            land_cover,
            agriculture,
            soil_group,
        } => {
            let config = PipelineConfig {
                work_dir,
                land_cover,
                agriculture,
                soil_group,
            };
            let start = Instant::now();
            let outputs = run_pipeline(&config).context("Curve Number pipeline failed")?;
            let elapsed = start.elapsed();
            done("Curve Number raster", &outputs.cn_values, elapsed);
        }

        Commands::Table => {
            print!("{:<14}", "Cover class");
            for soil in SoilGroup::ALL {
                print!(" {:>5}", soil.letter());
            }
            println!();
            for cover in CoverClass::ALL {
                print!("{:<14}", cover.name());
                for soil in SoilGroup::ALL {
                    match curve_number(cover, soil) {
                        Some(cn) => print!(" {:>5}", cn),
                        None => print!(" {:>5}", "-"),
                    }
                }
                println!();
            }
            println!();
            println!("Soil groups: A=1, B=10, C=100, D=1000 (raster codes)");
        }
    }

    Ok(())
}
