//! Opening record sources and sinks.
//!
//! Input comes from stdin or a file; files are decompressed on the fly based
//! on their extension. Output goes to stdout or a file that is synced to disk
//! when the run finishes.

use anyhow::Context;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Compression format detected from file extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl Compression {
    /// Detect compression format from file extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("gz" | "gzip") => Compression::Gzip,
            Some("bz2" | "bzip2") => Compression::Bzip2,
            Some("xz" | "lzma") => Compression::Xz,
            Some("zst" | "zstd") => Compression::Zstd,
            _ => Compression::None,
        }
    }

    /// Wrap a reader with the appropriate decompressor
    pub fn wrap_reader<'a>(&self, reader: Box<dyn Read + 'a>) -> io::Result<Box<dyn Read + 'a>> {
        Ok(match self {
            Compression::None => reader,
            Compression::Gzip => Box::new(flate2::read::MultiGzDecoder::new(reader)),
            Compression::Bzip2 => Box::new(bzip2::read::BzDecoder::new(reader)),
            Compression::Xz => Box::new(xz2::read::XzDecoder::new(reader)),
            Compression::Zstd => Box::new(zstd::stream::read::Decoder::new(reader)?),
        })
    }
}

/// Same names as the serialized form, for the `--progress` summary.
impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Bzip2 => "bzip2",
            Compression::Xz => "xz",
            Compression::Zstd => "zstd",
        })
    }
}

/// A raw input stream plus its on-disk size, when there is one.
pub struct Input {
    pub reader: Box<dyn Read>,
    pub size: Option<u64>,
    pub compression: Compression,
}

/// Open `path`, or stdin when `path` is `None`.
pub fn open_input(path: Option<&Path>) -> anyhow::Result<Input> {
    let Some(path) = path else {
        return Ok(Input {
            reader: Box::new(io::stdin().lock()),
            size: None,
            compression: Compression::None,
        });
    };

    let file = File::open(path)
        .with_context(|| format!("unable to open input file {}", path.display()))?;
    let size = file.metadata().ok().map(|m| m.len());

    Ok(Input {
        reader: Box::new(file),
        size,
        compression: Compression::from_path(path),
    })
}

/// Where sampled records are written.
pub enum Sink {
    Stdout(io::StdoutLock<'static>),
    File(File),
}

impl Sink {
    /// Flush, and for files make sure the data reached the disk.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Sink::Stdout(mut out) => out.flush(),
            Sink::File(mut file) => {
                file.flush()?;
                file.sync_all()
            }
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(out) => out.write(buf),
            Sink::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.flush(),
            Sink::File(file) => file.flush(),
        }
    }
}

/// Create (truncating) `path`, or lock stdout when `path` is `None`.
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Sink> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("unable to open output file {}", path.display()))?;
            Ok(Sink::File(file))
        }
        None => Ok(Sink::Stdout(io::stdout().lock())),
    }
}
