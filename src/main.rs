use crate::analysis::degree::summarize;
use crate::core::clock::SystemClock;
use crate::core::memory::estimate_dataset_memory;
use crate::export::csv::{write_follows, write_persons};
use crate::generate::identity::Vocabulary;
use crate::generate::{DEFAULT_MAX_FOLLOWERS, DEFAULT_SEED, DatasetConfig, generate};
use crate::ingest::csv::load_dataset;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub mod analysis;
pub mod core;
pub mod export;
pub mod generate;
pub mod ingest;

/// Generate a reproducible persons/follows dataset as two CSV tables.
#[derive(Parser)]
#[command(name = "followgen", version)]
struct Args {
    /// Destination CSV for the persons table
    #[arg(long, value_name = "PATH", default_value = "data/persons.csv", env = "FOLLOWGEN_PERSONS_OUT")]
    persons_out: PathBuf,

    /// Destination CSV for the follows table
    #[arg(long, value_name = "PATH", default_value = "data/follows.csv", env = "FOLLOWGEN_FOLLOWS_OUT")]
    follows_out: PathBuf,

    /// Random seed to make the dataset reproducible
    #[arg(
        long,
        default_value_t = DEFAULT_SEED as i64,
        allow_negative_numbers = true,
        env = "FOLLOWGEN_SEED"
    )]
    seed: i64,

    /// Upper bound of followers assigned to each person (negative means 0)
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_FOLLOWERS as i64,
        allow_negative_numbers = true,
        env = "FOLLOWGEN_MAX_FOLLOWERS"
    )]
    max_followers: i64,

    /// Read the written tables back and log a degree summary
    #[arg(long)]
    inspect: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = DatasetConfig::new(args.seed, args.max_followers);
    let clock = SystemClock;

    let dataset = generate(&cfg, &Vocabulary::default(), &clock);
    let mem = estimate_dataset_memory(&dataset.persons, &dataset.follows);
    debug!(persons = mem.persons, follows = mem.follows, bytes = mem.bytes, "dataset in memory");

    let persons = write_persons(&args.persons_out, &dataset.persons)?;
    let follows = write_follows(&args.follows_out, &dataset.follows)?;

    println!("Generated {} persons -> {}", persons, args.persons_out.display());
    println!("Generated {} follows -> {}", follows, args.follows_out.display());

    if args.inspect {
        if let Some(loaded) = load_dataset(&args.persons_out, &args.follows_out, &clock)? {
            let summary = summarize(&loaded.graph);
            info!(
                persons = loaded.persons.len(),
                registered = loaded.registry.len(),
                skipped_rows = loaded.person_stats.skipped + loaded.follow_stats.skipped,
                nodes = summary.nodes,
                edges = summary.edges,
                max_in_degree = summary.max_in_degree,
                max_out_degree = summary.max_out_degree,
                isolated = summary.isolated,
                mean_in_degree = summary.mean_in_degree,
                "dataset summary"
            );
        }
    }

    Ok(())
}
