//! Append-only Log Store
//!
//! File-backed durability for queued messages. Each record is one base64
//! encoded payload per line, so arbitrary binary content (including newline
//! and NUL bytes) survives line-oriented storage. The file is opened in
//! append mode for writes and read sequentially for recovery; it is never
//! rewritten or truncated.
//!
//! Known limitation: records are never removed, not even for messages that
//! were already consumed. A long-running instance accumulates stale entries,
//! and a restart replays every historical record. Compaction is out of scope.

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::message::Message;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Append-only, newline-delimited record file
///
/// The persistence worker is the only writer; recovery is the only reader.
/// The file is created lazily on the first append.
#[derive(Debug)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a batch of messages as one sequence of writes
    ///
    /// Writes one encoded line per message and ensures the data is durably
    /// flushed to the underlying medium before returning. An empty batch is
    /// a no-op and does not create the file.
    pub fn append(&self, batch: &[Message]) -> QueueResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);

        for message in batch {
            writer.write_all(encode_record(message.payload()).as_bytes())?;
            writer.write_all(b"\n")?;
        }

        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }

    /// Read every record from the beginning of the store, in file order
    ///
    /// A missing file is the normal first-run case and yields an empty
    /// sequence. A record that fails to decode is skipped with a warning and
    /// replay continues with the remaining records.
    pub fn replay(&self) -> QueueResult<Vec<Message>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "log store {} does not exist yet, starting with empty queue",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut messages = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            match decode_record(&line, index + 1) {
                Ok(payload) => messages.push(Message::new(payload)),
                Err(e) => log::warn!("skipping unreadable record during recovery: {e}"),
            }
        }

        Ok(messages)
    }
}

/// Encode a payload into the line-safe record alphabet
fn encode_record(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}

/// Decode one record line back into payload bytes
fn decode_record(line: &str, line_number: usize) -> QueueResult<Vec<u8>> {
    STANDARD
        .decode(line)
        .map_err(|source| QueueError::MalformedRecord {
            line: line_number,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_codec_round_trips_reserved_bytes() {
        let payloads: &[&[u8]] = &[b"", b"plain text", b"line\nbreak", b"\x00\x01\xff", b"|||"];

        for payload in payloads {
            let encoded = encode_record(payload);
            assert!(!encoded.contains('\n'));
            assert_eq!(decode_record(&encoded, 1).unwrap(), *payload);
        }
    }

    #[test]
    fn test_replay_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("absent.log"));

        assert!(store.replay().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_then_replay_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("messages.log"));

        let batch = vec![
            Message::from_text("one"),
            Message::new(b"two\nwith newline".to_vec()),
            Message::from_text("three"),
        ];
        store.append(&batch).unwrap();

        let replayed = store.replay().unwrap();
        assert_eq!(replayed, batch);
    }

    #[test]
    fn test_append_only_grows_across_batches() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("messages.log"));

        store.append(&[Message::from_text("a")]).unwrap();
        store
            .append(&[Message::from_text("b"), Message::from_text("c")])
            .unwrap();

        let replayed = store.replay().unwrap();
        let texts: Vec<_> = replayed.iter().map(|m| m.text().into_owned()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn test_replay_skips_malformed_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.log");
        let store = LogStore::new(&path);

        store
            .append(&[Message::from_text("good"), Message::from_text("also good")])
            .unwrap();
        // Inject a line that is not valid base64 between two valid records.
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines: Vec<&str> = contents.lines().collect();
        lines.insert(1, "!!! not a record !!!");
        std::fs::write(&path, lines.join("\n") + "\n").unwrap();

        let replayed = store.replay().unwrap();
        assert_eq!(replayed.len(), 2);
        assert_eq!(replayed[0].payload(), b"good");
        assert_eq!(replayed[1].payload(), b"also good");
    }
}
