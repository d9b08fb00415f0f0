//! zorder-region CLI demo
//!
//! Encode/decode Morton coordinates, decompose a box into its interval
//! list, and run region set algebra on saved region files.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zorder_region::aabb::AABB;
use zorder_region::error::{Error, Result};
use zorder_region::morton::{Dim2, Morton2D};
use zorder_region::region::Region;

#[derive(Parser)]
#[command(name = "zorder-region")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Morton (Z-order) interval decomposition and region algebra", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode (x, y) into a single Morton code
    Encode { x: u32, y: u32 },

    /// Decode a Morton code back into (x, y)
    Decode { code: u64 },

    /// Decompose an axis-aligned box [min, max] into its Morton intervals
    Decompose {
        min: u64,
        max: u64,
        /// Emit one interval per Morton-aligned cell instead of coalescing
        /// adjacent cells into runs
        #[arg(long)]
        cells: bool,
    },

    /// Apply a set operation to two saved region files
    RegionOp {
        /// union, intersect, or difference
        op: String,
        a: PathBuf,
        b: PathBuf,
    },
}

fn load_region(path: &PathBuf) -> Result<Region<Dim2>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::InvalidRegionJson {
        path: path.clone(),
        source,
    })
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { x, y } => {
            let code = Morton2D::encode([x, y]);
            println!("{}", code.raw());
        }
        Commands::Decode { code } => {
            let [x, y] = Morton2D::from_raw(code).decode();
            println!("{x} {y}");
        }
        Commands::Decompose { min, max, cells } => {
            if min > max {
                return Err(Error::InvalidRange { min, max });
            }
            let aabb: AABB<Dim2> = AABB::new(min, max);
            let region = if cells { aabb.to_cells() } else { aabb.to_intervals() };
            for iv in &region.intervals {
                println!("{} {}", iv.start, iv.end);
            }
        }
        Commands::RegionOp { op, a, b } => {
            let ra = load_region(&a)?;
            let rb = load_region(&b)?;
            let result = match op.as_str() {
                "union" => ra.union(&rb),
                "intersect" => ra.intersection(&rb),
                "difference" => ra.difference(&rb),
                other => return Err(Error::UnknownOperation(other.to_string())),
            };
            let text = serde_json::to_string_pretty(&result).expect("Region serializes infallibly");
            println!("{text}");
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
