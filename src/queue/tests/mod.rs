//! Test modules for the durable staging queue
//!
//! Suites are organised by functional area: in-memory semantics, batch
//! persistence, crash recovery, concurrency, lifecycle and edge cases.

mod concurrent;

use std::path::Path;
use std::time::{Duration, Instant};

/// Raw record lines currently present in a store file
pub fn store_lines(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}

/// Decode one store line back into payload bytes
pub fn decode_line(line: &str) -> Vec<u8> {
    use base64::Engine as _;
    base64::engine::general_purpose::STANDARD
        .decode(line)
        .expect("store line should be valid base64")
}

/// Wait until the store holds exactly `expected` lines
///
/// Panics if the store overshoots the expected count or if it has not
/// reached it within a generous deadline.
pub async fn wait_for_line_count(path: &Path, expected: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let lines = store_lines(path);
        assert!(
            lines.len() <= expected,
            "store has {} lines, expected at most {}",
            lines.len(),
            expected
        );
        if lines.len() == expected {
            return;
        }
        assert!(
            Instant::now() < deadline,
            "store never reached {} lines (currently {})",
            expected,
            lines.len()
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
