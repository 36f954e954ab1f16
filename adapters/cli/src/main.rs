#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that walks an entity across a level file.
//!
//! The binary stands in for the game's input and rendering collaborators: it
//! loads a RON level description, issues a single pointer-move request, and
//! reports every navigation tick on stdout until the entity arrives, stalls,
//! or exhausts its tick budget.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_crawl_core::{CellCoord, GridPosition};
use dungeon_crawl_system_movement::PointerNavigator;
use dungeon_crawl_world::{LevelSpec, NavigationContext};

/// Walks an entity across a dungeon level toward a pointer target.
#[derive(Debug, Parser)]
#[command(name = "dungeon-crawl", version)]
struct Args {
    /// Path to the RON level description.
    map: PathBuf,

    /// Cell the entity starts on, written as `column,row`.
    #[arg(long, default_value = "2,2", value_parser = parse_cell)]
    start: CellCoord,

    /// Cell the pointer targets, written as `column,row`.
    #[arg(long, value_parser = parse_cell)]
    target: CellCoord,

    /// Pixels travelled per tick.
    #[arg(long, default_value_t = 4.0, value_parser = parse_positive)]
    speed: f32,

    /// Side length of a tile in pixels.
    #[arg(long, default_value_t = 32.0, value_parser = parse_positive)]
    tile_length: f32,

    /// Ticks simulated before giving up.
    #[arg(long, default_value_t = 400)]
    max_ticks: u32,
}

fn parse_cell(value: &str) -> Result<CellCoord, String> {
    let (column, row) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `column,row`, got `{value}`"))?;
    let column = column
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("could not parse column `{column}`"))?;
    let row = row
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("could not parse row `{row}`"))?;
    Ok(CellCoord::new(column, row))
}

fn parse_positive(value: &str) -> Result<f32, String> {
    let parsed = value
        .parse::<f32>()
        .map_err(|_| format!("could not parse `{value}` as a number"))?;
    if parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("`{value}` must be a positive number"))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let text = fs::read_to_string(&args.map)
        .with_context(|| format!("reading level file {}", args.map.display()))?;
    let spec: LevelSpec = ron::from_str(&text)
        .with_context(|| format!("parsing level file {}", args.map.display()))?;
    let context = NavigationContext::from_spec(spec).context("building the level tile map")?;
    let map = context.map();

    println!(
        "loaded {}x{} level; walking from ({}, {}) toward ({}, {})",
        map.columns(),
        map.rows(),
        args.start.column(),
        args.start.row(),
        args.target.column(),
        args.target.row(),
    );

    let mut position = GridPosition::new(
        args.start.column() as f32 * args.tile_length,
        args.start.row() as f32 * args.tile_length,
        args.tile_length,
    );
    let mut navigator = PointerNavigator::new(&position);

    for tick in 0..args.max_ticks {
        if navigator.arrived(args.target) {
            println!("arrived on tick {tick}");
            return Ok(());
        }

        let step = navigator
            .advance(map, &position, args.target)
            .context("planning the next hop")?;
        let (dx, dy) = step.displacement(args.speed);
        position = position.translated(dx, dy);

        println!(
            "tick {tick:>4}: vertex=({}, {}) direction=({}, {}) position=({:.1}, {:.1})",
            navigator.vertex().column(),
            navigator.vertex().row(),
            step.dx(),
            step.dy(),
            position.x(),
            position.y(),
        );

        if navigator.arrived(args.target) {
            println!("arrived on tick {tick}");
            return Ok(());
        }

        if step.is_zero() {
            println!(
                "no path to ({}, {}); holding position",
                args.target.column(),
                args.target.row()
            );
            return Ok(());
        }
    }

    println!("tick budget exhausted before reaching the target");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_cell, parse_positive};
    use dungeon_crawl_core::CellCoord;

    #[test]
    fn cells_parse_from_comma_pairs() {
        assert_eq!(parse_cell("4,7"), Ok(CellCoord::new(4, 7)));
        assert_eq!(parse_cell(" 4 , 7 "), Ok(CellCoord::new(4, 7)));
    }

    #[test]
    fn malformed_cells_are_rejected() {
        assert!(parse_cell("4").is_err());
        assert!(parse_cell("a,b").is_err());
        assert!(parse_cell("-1,2").is_err());
    }

    #[test]
    fn scales_must_be_positive() {
        assert_eq!(parse_positive("32"), Ok(32.0));
        assert_eq!(parse_positive("0.5"), Ok(0.5));
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-4").is_err());
        assert!(parse_positive("NaN").is_err());
    }
}
