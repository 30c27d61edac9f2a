// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `orrery`: run geometry queries on shapes and primitives written in the
//! canonical text format.
//!
//! ```text
//! orrery intersect "Sphere[Radius 1]" "Ray[StartPoint <0, 0, -5> | Direction <0, 0, 1>]"
//! first <0, 0, -1>
//! second <0, 0, 1>
//! ```
//!
//! Logging goes to stderr and is filtered with `RUST_LOG` (default `warn`).

use std::io::Write;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use orrery_core::FormatConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod operand;

use operand::Operand;

#[derive(Parser, Debug)]
#[command(name = "orrery", author, version, about = "Deterministic 3D geometry queries")]
struct Cli {
    /// Fixed number of decimal places in printed numbers.
    #[arg(long, global = true)]
    precision: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Where a line, ray or segment crosses a shape or plane, or where two planes meet.
    Intersect { a: Operand, b: Operand },
    /// Shortest distance between two operands.
    Distance { a: Operand, b: Operand },
    /// Point on the first operand closest to the second.
    Closest { a: Operand, b: Operand },
    /// A line, ray or segment bounced off a shape or plane.
    Reflect { a: Operand, b: Operand },
    /// Incident angle of a line on a shape or plane, or the angle between two planes.
    Angle { a: Operand, b: Operand },
    /// Rotate a location, plane, line, ray or segment.
    Rotate {
        operand: Operand,
        /// Rotation axis as `<x, y, z>`.
        #[arg(long, default_value = "<0, 1, 0>")]
        axis: String,
        /// Rotation angle in degrees.
        #[arg(long, allow_negative_numbers = true)]
        degrees: f32,
    },
    /// Cut a segment or sphere with a plane.
    Split { a: Operand, b: Operand },
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("installing tracing subscriber: {err}"))
}

fn run(cli: Cli) -> Result<Vec<String>> {
    let config = cli
        .precision
        .map_or_else(FormatConfig::default, |precision| {
            FormatConfig::default().with_precision(precision)
        });
    match cli.command {
        Command::Intersect { a, b } => commands::intersect(a, b, &config),
        Command::Distance { a, b } => commands::distance(a, b, &config),
        Command::Closest { a, b } => commands::closest(a, b, &config),
        Command::Reflect { a, b } => commands::reflect(a, b, &config),
        Command::Angle { a, b } => commands::angle(a, b, &config),
        Command::Rotate {
            operand,
            axis,
            degrees,
        } => commands::rotate(operand, &axis, degrees, &config),
        Command::Split { a, b } => commands::split(a, b, &config),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;
    let lines = run(cli)?;
    let mut out = std::io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
