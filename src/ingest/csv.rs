use crate::core::clock::Clock;
use crate::core::graph::{Graph, GraphBuilder};
use crate::core::ids::{NodeId, NodeRegistry, PersonId};
use crate::core::model::{Person, parse_timestamp};
use anyhow::Context;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub parsed: u64,
    pub skipped: u64,
}

pub struct LoadedDataset {
    pub persons: Vec<Person>,
    pub registry: NodeRegistry,
    pub graph: Graph,
    pub person_stats: IngestStats,
    pub follow_stats: IngestStats,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<BufReader<R>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(reader))
}

/// Reads the persons table. Rows that are too short, carry a non-numeric id,
/// repeat an id or have a blank name are skipped. A bad `spam_score` becomes
/// 0.0 and a bad `last_seen` becomes the clock's current instant.
pub fn read_persons<R: Read, C: Clock + ?Sized>(
    reader: R,
    registry: &mut NodeRegistry,
    clock: &C,
) -> anyhow::Result<(Vec<Person>, IngestStats)> {
    let mut csv_reader = csv_reader(reader);
    let mut stats = IngestStats::default();
    let mut persons = Vec::new();

    for maybe_record in csv_reader.records() {
        match maybe_record {
            Ok(record) if record.len() >= 4 => {
                let Ok(id) = record[0].parse::<PersonId>() else {
                    debug!(row = ?record, "skipping person with invalid id");
                    stats.skipped += 1;
                    continue;
                };
                let name = &record[1];
                if name.is_empty() || registry.get(id).is_some() {
                    debug!(id, "skipping blank or repeated person");
                    stats.skipped += 1;
                    continue;
                }
                registry.get_or_insert(id)?;
                persons.push(Person {
                    id,
                    name: name.to_string(),
                    spam_score: record[2].parse::<f64>().unwrap_or(0.0),
                    last_seen: parse_timestamp(&record[3]).unwrap_or_else(|| clock.now()),
                });
                stats.parsed += 1;
            }
            _ => stats.skipped += 1,
        }
    }

    Ok((persons, stats))
}

pub fn read_follows<R: Read, C: Clock + ?Sized>(
    reader: R,
    registry: &NodeRegistry,
    builder: &mut GraphBuilder,
    clock: &C,
) -> anyhow::Result<IngestStats> {
    let mut csv_reader = csv_reader(reader);
    let mut stats = IngestStats::default();
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();

    for maybe_record in csv_reader.records() {
        match maybe_record {
            Ok(record) if record.len() >= 5 => {
                let endpoints = record[1]
                    .parse::<PersonId>()
                    .ok()
                    .and_then(|src| registry.get(src))
                    .zip(record[2].parse::<PersonId>().ok().and_then(|dst| registry.get(dst)));
                let Some((src, dst)) = endpoints else {
                    debug!(row = ?record, "skipping follow with unknown endpoint");
                    stats.skipped += 1;
                    continue;
                };
                if src == dst || !seen.insert((src, dst)) {
                    stats.skipped += 1;
                    continue;
                }
                let quality = record[3].parse::<f64>().unwrap_or(0.0);
                let last_seen = parse_timestamp(&record[4]).unwrap_or_else(|| clock.now());
                builder.add_edge(src, dst, quality, last_seen);
                stats.parsed += 1;
            }
            _ => stats.skipped += 1,
        }
    }

    Ok(stats)
}

pub fn load_dataset<C: Clock + ?Sized>(
    persons_path: &Path,
    follows_path: &Path,
    clock: &C,
) -> anyhow::Result<Option<LoadedDataset>> {
    if !persons_path.exists() || !follows_path.exists() {
        info!(
            persons = %persons_path.display(),
            follows = %follows_path.display(),
            "dataset files not found, nothing to load"
        );
        return Ok(None);
    }

    let mut registry = NodeRegistry::new();
    let persons_file = File::open(persons_path)
        .with_context(|| format!("opening {}", persons_path.display()))?;
    let (persons, person_stats) = read_persons(persons_file, &mut registry, clock)
        .with_context(|| format!("reading persons from {}", persons_path.display()))?;
    info!(parsed = person_stats.parsed, skipped = person_stats.skipped, "persons loaded");

    let mut builder = GraphBuilder::new(registry.len());
    let follows_file = File::open(follows_path)
        .with_context(|| format!("opening {}", follows_path.display()))?;
    let follow_stats = read_follows(follows_file, &registry, &mut builder, clock)
        .with_context(|| format!("reading follows from {}", follows_path.display()))?;
    info!(parsed = follow_stats.parsed, skipped = follow_stats.skipped, "follows loaded");

    Ok(Some(LoadedDataset {
        persons,
        registry,
        graph: builder.freeze(),
        person_stats,
        follow_stats,
    }))
}
