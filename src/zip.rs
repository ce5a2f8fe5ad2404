//! Hand-assembled PKZIP archive writer (store method only).
//!
//! Produces a complete archive in one growable byte buffer: local file
//! headers with entry data, the central directory, and the end record.
//! Entry offsets are recorded against the buffer length right before each
//! local header is emitted, which is the invariant readers depend on to
//! locate entries. No compression is applied; entries use the store
//! method, an explicit simplicity choice.

use crate::crc32::crc32;
use crate::error::{Error, Result};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use std::collections::HashSet;

const LOCAL_FILE_HEADER_SIG: u32 = 0x0403_4B50;
const CENTRAL_DIR_HEADER_SIG: u32 = 0x0201_4B50;
const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4B50;

/// Version-made-by: Unix host, PKZIP 2.0.
const VERSION_MADE_BY: u16 = 0x0314;
/// Minimum version needed to extract a stored entry.
const VERSION_NEEDED: u16 = 20;

/// One file to be stored in the archive.
#[derive(Debug, Clone)]
pub struct ZipEntry {
    /// Forward-slash separated UTF-8 path within the archive
    pub path: String,
    /// Raw entry bytes, stored uncompressed
    pub data: Vec<u8>,
}

/// Builder for an uncompressed ZIP archive.
pub struct ZipWriter {
    entries: Vec<ZipEntry>,
    paths: HashSet<String>,
    timestamp: NaiveDateTime,
}

impl ZipWriter {
    /// Create a writer stamped with the current wall-clock time.
    ///
    /// The timestamp lands in the DOS date/time fields of every header,
    /// so archive bytes vary run-to-run even for identical input.
    pub fn new() -> Self {
        Self::with_timestamp(Local::now().naive_local())
    }

    /// Create a writer with a fixed timestamp.
    pub fn with_timestamp(timestamp: NaiveDateTime) -> Self {
        Self {
            entries: Vec::new(),
            paths: HashSet::new(),
            timestamp,
        }
    }

    /// Queue an entry. Paths must be unique within one archive.
    pub fn add(&mut self, path: impl Into<String>, data: Vec<u8>) -> Result<()> {
        let path = path.into();
        if !self.paths.insert(path.clone()) {
            return Err(Error::DuplicateArchivePath(path));
        }
        self.entries.push(ZipEntry { path, data });
        Ok(())
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries have been queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assemble the archive bytes.
    pub fn finish(self) -> Vec<u8> {
        let (dos_date, dos_time) = dos_date_time(&self.timestamp);
        let mut out: Vec<u8> = Vec::new();

        // Local segments: header + name + data, recording where each began
        let mut records: Vec<(u32, u32)> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let offset = out.len() as u32;
            let crc = crc32(&entry.data);
            records.push((crc, offset));

            put_u32(&mut out, LOCAL_FILE_HEADER_SIG);
            put_u16(&mut out, VERSION_NEEDED);
            put_u16(&mut out, 0); // flags
            put_u16(&mut out, 0); // method: stored
            put_u16(&mut out, dos_time);
            put_u16(&mut out, dos_date);
            put_u32(&mut out, crc);
            put_u32(&mut out, entry.data.len() as u32); // compressed size
            put_u32(&mut out, entry.data.len() as u32); // uncompressed size
            put_u16(&mut out, entry.path.len() as u16);
            put_u16(&mut out, 0); // extra field length
            out.extend_from_slice(entry.path.as_bytes());
            out.extend_from_slice(&entry.data);
        }

        // Central directory, one header per entry in the same order
        let central_start = out.len() as u32;
        for (entry, &(crc, offset)) in self.entries.iter().zip(&records) {
            put_u32(&mut out, CENTRAL_DIR_HEADER_SIG);
            put_u16(&mut out, VERSION_MADE_BY);
            put_u16(&mut out, VERSION_NEEDED);
            put_u16(&mut out, 0); // flags
            put_u16(&mut out, 0); // method: stored
            put_u16(&mut out, dos_time);
            put_u16(&mut out, dos_date);
            put_u32(&mut out, crc);
            put_u32(&mut out, entry.data.len() as u32);
            put_u32(&mut out, entry.data.len() as u32);
            put_u16(&mut out, entry.path.len() as u16);
            put_u16(&mut out, 0); // extra field length
            put_u16(&mut out, 0); // comment length
            put_u16(&mut out, 0); // disk number start
            put_u16(&mut out, 0); // internal attributes
            put_u32(&mut out, 0); // external attributes
            put_u32(&mut out, offset);
            out.extend_from_slice(entry.path.as_bytes());
        }
        let central_size = out.len() as u32 - central_start;

        // End of central directory record
        put_u32(&mut out, END_OF_CENTRAL_DIR_SIG);
        put_u16(&mut out, 0); // this disk
        put_u16(&mut out, 0); // disk with central directory start
        put_u16(&mut out, self.entries.len() as u16);
        put_u16(&mut out, self.entries.len() as u16);
        put_u32(&mut out, central_size);
        put_u32(&mut out, central_start);
        put_u16(&mut out, 0); // comment length

        log::debug!(
            "zip: {} entries, {} bytes, central directory at {}",
            self.entries.len(),
            out.len(),
            central_start
        );
        out
    }
}

impl Default for ZipWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a timestamp into packed DOS (date, time) fields.
///
/// Years before 1980 are floored at 1980; seconds have 2-second
/// resolution, as the format requires.
fn dos_date_time(ts: &NaiveDateTime) -> (u16, u16) {
    let year = (ts.year().max(1980) - 1980) as u16;
    let date = (year << 9) | ((ts.month() as u16) << 5) | ts.day() as u16;
    let time =
        ((ts.hour() as u16) << 11) | ((ts.minute() as u16) << 5) | (ts.second() as u16 / 2);
    (date, time)
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}
