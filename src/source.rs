//! Word-list and JSONL record stream I/O.

use crate::types::{PipelineError, Result, WordEmbedding};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read a word list: one word per line, trimmed, blank lines skipped.
pub fn read_words(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| PipelineError::Source(format!("failed to open {}: {}", path.display(), e)))?;

    let mut words = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| {
            PipelineError::Source(format!("failed to read {}: {}", path.display(), e))
        })?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Write records as JSONL, one object per line.
///
/// Returns the number of records written.
pub fn write_records(path: impl AsRef<Path>, records: &[WordEmbedding]) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        PipelineError::Source(format!("failed to create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(writer, "{}", line).map_err(|e| {
            PipelineError::Source(format!("failed to write {}: {}", path.display(), e))
        })?;
    }
    writer
        .flush()
        .map_err(|e| PipelineError::Source(format!("failed to write {}: {}", path.display(), e)))?;
    Ok(records.len())
}

/// Open a JSONL record stream lazily.
///
/// Line read failures yield `Source`; malformed lines yield `Parse` so the
/// loader can skip them and keep going.
pub fn record_stream(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<WordEmbedding>>> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| PipelineError::Source(format!("failed to open {}: {}", display, e)))?;

    Ok(BufReader::new(file)
        .lines()
        .enumerate()
        .filter_map(move |(idx, line)| match line {
            Err(e) => Some(Err(PipelineError::Source(format!(
                "failed to read {}: {}",
                display, e
            )))),
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(match serde_json::from_str::<WordEmbedding>(&line) {
                Ok(record) => Ok(record),
                Err(e) => Err(PipelineError::Parse(format!("line {}: {}", idx + 1, e))),
            }),
        }))
}
