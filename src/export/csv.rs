use crate::core::model::{FOLLOW_COLUMNS, Follow, PERSON_COLUMNS, Person};
use anyhow::Context;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub fn write_persons(path: &Path, persons: &[Person]) -> anyhow::Result<usize> {
    write_table(path, &PERSON_COLUMNS, persons)
        .with_context(|| format!("writing persons table to {}", path.display()))
}

pub fn write_follows(path: &Path, follows: &[Follow]) -> anyhow::Result<usize> {
    write_table(path, &FOLLOW_COLUMNS, follows)
        .with_context(|| format!("writing follows table to {}", path.display()))
}

fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> anyhow::Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let written = write_rows(BufWriter::new(file), headers, rows)?;
    info!(path = %path.display(), rows = written, "table written");
    Ok(written)
}

pub fn write_rows<W: Write, T: Serialize>(
    writer: W,
    headers: &[&str],
    rows: &[T],
) -> anyhow::Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(headers)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(rows.len())
}
