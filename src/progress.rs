//! Byte-count tracking for input streams.
//!
//! `ProgressReader` sits between the raw input and any decompressor, so the
//! count reflects bytes taken from the file or pipe. The count is shared
//! through a [`ByteCounter`] handle that outlives the reader, and an optional
//! callback can drive a progress bar.

use std::cell::Cell;
use std::io::Read;
use std::rc::Rc;

/// Shared, single-threaded running total of bytes read.
#[derive(Debug, Clone, Default)]
pub struct ByteCounter(Rc<Cell<u64>>);

impl ByteCounter {
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    fn add(&self, n: u64) -> u64 {
        let total = self.0.get() + n;
        self.0.set(total);
        total
    }
}

/// A reader wrapper that tracks bytes read and calls a progress callback.
pub struct ProgressReader<R: Read> {
    reader: R,
    counter: ByteCounter,
    callback: Option<Box<dyn Fn(u64)>>,
}

impl<R: Read> ProgressReader<R> {
    /// Wrap `reader`, adding every successful read to `counter`.
    pub fn new(reader: R, counter: ByteCounter) -> Self {
        Self {
            reader,
            counter,
            callback: None,
        }
    }

    /// Also call `callback` with the running total after each read.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64) + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.reader.read(buf)?;
        let total = self.counter.add(n as u64);
        if let Some(cb) = &self.callback {
            cb(total);
        }
        Ok(n)
    }
}
