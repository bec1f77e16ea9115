#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates and prints Gem Caverns maps.

use anyhow::Context;
use clap::Parser;
use gem_caverns_core::{Command, GeneratorConfig};
use gem_caverns_rendering::render_text_map;
use gem_caverns_system_bootstrap::Bootstrap;
use gem_caverns_world::{self as world, query, World};

/// Carves one cave with the requested parameters and prints it as glyphs.
#[derive(Debug, Parser)]
#[command(name = "gem-caverns", about = "Generate and inspect Gem Caverns maps")]
struct Args {
    /// Seed for the world's random stream; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of the square map measured in tiles.
    #[arg(long, default_value_t = 100)]
    map_size: i32,

    /// Carve budget: wall-to-floor conversions for the generation cycle.
    #[arg(long, default_value_t = 1200)]
    floors: u32,

    /// Number of gems scattered onto the carved floor.
    #[arg(long, default_value_t = 3)]
    gems: u32,
}

/// Entry point for the Gem Caverns command-line interface.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = GeneratorConfig::new(args.map_size, args.floors, args.gems)
        .context("rejected generator configuration")?
        .with_seed(seed);

    let mut world = World::with_config(config);
    let mut events = Vec::new();
    world::apply(&mut world, Command::Generate, &mut events);

    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner(&world));
    println!("seed: {seed}");
    print!("{}", render_text_map(&bootstrap.tile_view(&world)));
    println!(
        "carved {} floors with {} carvers; {} gems placed",
        query::floors_carved(&world),
        query::carver_count(&world),
        query::gems_remaining(&world),
    );

    Ok(())
}
