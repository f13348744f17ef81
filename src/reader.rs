//! Sequential reader for fixed-size record capture files.
use crate::error::TelemetryError;
use crate::packet::PacketDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Owns one open capture file and a single sequential cursor over it.
///
/// The handle is held for the reader's lifetime and released on drop, on
/// every exit path, whether or not a read pass ever ran. A reader is
/// single-pass: after [`read_all`](Self::read_all) it is exhausted and a
/// fresh pass requires reopening the path. Not meant to be shared; one
/// reader, one cursor, one source.
#[derive(Debug)]
pub struct PacketReader {
    path: PathBuf,
    file: BufReader<File>,
    exhausted: bool,
}

impl PacketReader {
    /// Open `path` for sequential reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TelemetryError> {
        let path = path.as_ref().to_path_buf();
        let file = BufReader::new(File::open(&path)?);
        Ok(Self { path, file, exhausted: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that the source length is an exact multiple of `record_size`,
    /// returning the total length in bytes. Runs before any decode attempt;
    /// a zero-length source is valid (zero records).
    pub fn validate(&self, record_size: usize) -> Result<u64, TelemetryError> {
        let found = self.file.get_ref().metadata()?.len();
        let expected = record_size as u64;
        if expected == 0 || found % expected != 0 {
            return Err(TelemetryError::SizeMismatch { expected, found });
        }
        Ok(found)
    }

    /// Validate, then read and decode every record in file order.
    ///
    /// Chunks are `record_size` bytes each, gap-free and non-overlapping from
    /// offset 0 to end of file; the output preserves file order, which
    /// downstream time-series consumers rely on. The first decode failure is
    /// propagated immediately with no partial result and no skipping. A short
    /// final read is treated as end-of-stream, since validation already
    /// guaranteed exact divisibility.
    ///
    /// Single-pass: a second call fails with [`TelemetryError::Exhausted`].
    pub fn read_all<D: PacketDecoder>(
        &mut self,
        decoder: &D,
    ) -> Result<Vec<D::Packet>, TelemetryError> {
        if self.exhausted {
            return Err(TelemetryError::Exhausted);
        }
        let record_size = decoder.record_size();
        let total = self.validate(record_size)?;
        self.exhausted = true;

        let mut packets = Vec::with_capacity((total / record_size as u64) as usize);
        let mut chunk = vec![0u8; record_size];
        loop {
            let filled = read_chunk(&mut self.file, &mut chunk)?;
            if filled < record_size {
                break; // end of stream
            }
            packets.push(decoder.decode(&chunk)?);
        }
        Ok(packets)
    }
}

/// Fill `buf` from `r`, looping over partial reads; returns the number of
/// bytes actually read (less than `buf.len()` only at end of stream).
fn read_chunk<R: Read>(r: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = r.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
