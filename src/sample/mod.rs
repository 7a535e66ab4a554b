//! Sampling runs over delimited record streams.
//!
//! A run reads every record from the input once, keeps a fixed-size uniform
//! sample in a [`Reservoir`], and writes the sample in input order. Memory is
//! bounded by the sample size plus one record buffer.

mod config;
mod reservoir;

pub use config::SampleFileConfig;
pub use reservoir::{Reservoir, SlotIndex};

use crate::input::{open_input, open_output, Compression};
use crate::progress::{ByteCounter, ProgressReader};
use crate::records::{determine_buffer_size, Delimiter, RecordReader};
use crate::rng::{self, RandomRange};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Number of records sampled when nothing else is configured
pub const DEFAULT_COUNT: usize = 25;

/// Configuration for a sampling run
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Input file (None for stdin)
    pub input: Option<PathBuf>,
    /// Output file (None for stdout)
    pub output: Option<PathBuf>,
    /// Number of records to keep
    pub count: usize,
    /// Random seed for reproducibility (None draws one from the OS)
    pub seed: Option<i64>,
    /// Record delimiter for both input and output
    pub delimiter: Delimiter,
    /// Buffer output writes
    pub buffered: bool,
    /// Show a progress spinner on stderr
    pub progress: bool,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            count: DEFAULT_COUNT,
            seed: None,
            delimiter: Delimiter::Newline,
            buffered: true,
            progress: false,
        }
    }
}

/// Statistics from a sampling run
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct SampleStats {
    /// Records read from the input
    pub records_seen: u64,
    /// Records written to the output
    pub records_sampled: u64,
    /// Bytes taken from the input before decompression
    pub bytes_read: u64,
    /// Seed the generator was built from
    pub seed: i64,
    /// Decompression applied to the input
    pub compression: Compression,
}

/// Run a sampling pass as described by `config`
pub fn run(config: SampleConfig) -> anyhow::Result<SampleStats> {
    let seed = rng::resolve_seed(config.seed);
    let input = open_input(config.input.as_deref())?;
    let sink = open_output(config.output.as_deref())?;
    let counter = ByteCounter::default();
    let compression = input.compression;

    let progress_bar = if config.progress {
        Some(new_progress_bar(input.size)?)
    } else {
        None
    };

    let mut raw = ProgressReader::new(input.reader, counter.clone());
    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        raw = raw.with_callback(move |bytes| pb_clone.set_position(bytes));
    }
    let reader: Box<dyn Read> = compression.wrap_reader(Box::new(raw))?;

    let records = RecordReader::with_capacity(
        determine_buffer_size(input.size),
        reader,
        config.delimiter,
    );

    let mut reservoir: Reservoir<Vec<u8>, _> = Reservoir::new(config.count, rng::seeded(seed));
    fill_reservoir(&mut reservoir, records).context("read error")?;

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    let stats = SampleStats {
        records_seen: reservoir.total_seen(),
        records_sampled: reservoir.len() as u64,
        bytes_read: counter.get(),
        seed,
        compression,
    };

    let sample = reservoir.into_items();
    let delimiter = config.delimiter.byte();

    let written = if config.buffered {
        let mut writer = BufWriter::new(sink);
        write_records(&mut writer, &sample, delimiter)
            .and_then(|_| writer.into_inner().map_err(|e| e.into_error()))
            .and_then(|sink| sink.finish())
    } else {
        let mut sink = sink;
        write_records(&mut sink, &sample, delimiter).and_then(|_| sink.finish())
    };
    written.context("write error")?;

    Ok(stats)
}

/// Offer every record to the reservoir.
///
/// The record buffer is reused between reads and only copied when the
/// reservoir actually keeps the record.
pub fn fill_reservoir<R: Read, G: RandomRange>(
    reservoir: &mut Reservoir<Vec<u8>, G>,
    mut records: RecordReader<R>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    while records.read_record(&mut buf)? {
        if let Some(slot) = reservoir.offer_slot() {
            reservoir.commit(slot, buf.clone());
        }
    }
    Ok(())
}

/// Sample `count` items from an in-memory sequence, returning them in input order
pub fn sample_records<T, I, G>(records: I, count: usize, rng: G) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    G: RandomRange,
{
    let mut reservoir = Reservoir::new(count, rng);
    for record in records {
        reservoir.offer(record);
    }
    reservoir.into_items()
}

fn write_records<W: Write>(writer: &mut W, records: &[Vec<u8>], delimiter: u8) -> std::io::Result<()> {
    for record in records {
        writer.write_all(record)?;
        writer.write_all(&[delimiter])?;
    }
    writer.flush()
}

fn new_progress_bar(total: Option<u64>) -> anyhow::Result<ProgressBar> {
    let pb = match total {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {msg}",
                )?
                .progress_chars("█▓▒░  ")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] {bytes} ({bytes_per_sec}) {msg}",
                )?
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
            pb
        }
    };
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Sampling...");
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_reservoir_matches_eager_offer() {
        let input = b"r0\nr1\nr2\nr3\nr4\nr5\nr6\nr7\nr8\nr9\n".to_vec();

        let mut deferred: Reservoir<Vec<u8>, _> = Reservoir::new(3, rng::seeded(9));
        fill_reservoir(
            &mut deferred,
            RecordReader::new(input.as_slice(), Delimiter::Newline),
        )
        .unwrap();

        let eager = sample_records(
            RecordReader::new(input.as_slice(), Delimiter::Newline).map(|r| r.unwrap()),
            3,
            rng::seeded(9),
        );

        assert_eq!(deferred.total_seen(), 10);
        assert_eq!(deferred.into_items(), eager);
    }

    #[test]
    fn test_write_records_appends_delimiter() {
        let mut out = Vec::new();
        write_records(&mut out, &[b"a".to_vec(), Vec::new(), b"c".to_vec()], 0).unwrap();
        assert_eq!(out, b"a\0\0c\0");
    }
}
