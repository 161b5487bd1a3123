//! Recorded position traces.
//!
//! # CSV format
//!
//! One row per fix, in the order received.  `heading` may be empty.
//!
//! ```csv
//! lat,lng,timestamp_ms,heading
//! 37.4979,127.0276,0,
//! 37.4981,127.0277,1000,12.5
//! ```
//!
//! Coordinates are not validated here; the session rejects bad fixes and the
//! driver skips them, the same as live input.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::debug;

use nav_track::Fix;

use crate::{RuntimeError, RuntimeResult};

#[derive(Deserialize)]
struct FixRecord {
    lat:          f64,
    lng:          f64,
    timestamp_ms: u64,
    heading:      Option<f64>,
}

/// Load a fix trace from a CSV file.
pub fn load_fixes_csv(path: &Path) -> RuntimeResult<Vec<Fix>> {
    let file = std::fs::File::open(path)?;
    load_fixes_reader(file)
}

/// Like [`load_fixes_csv`] but accepts any `Read` source.
pub fn load_fixes_reader<R: Read>(reader: R) -> RuntimeResult<Vec<Fix>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut fixes = Vec::new();
    for result in csv_reader.deserialize::<FixRecord>() {
        let row = result.map_err(|e| RuntimeError::Replay(e.to_string()))?;
        let mut fix = Fix::new(row.lat, row.lng, row.timestamp_ms);
        fix.heading_hint = row.heading;
        fixes.push(fix);
    }
    Ok(fixes)
}

/// Feed `fixes` into `tx`, sleeping the recorded gap between consecutive
/// timestamps divided by `speedup`.  Returns the number of fixes sent.
///
/// A `speedup` of zero or less sends everything immediately.  Dropping the
/// sender when done is the caller's signal that the trace ended.
pub async fn replay_fixes(fixes: Vec<Fix>, tx: mpsc::Sender<Fix>, speedup: f64) -> RuntimeResult<usize> {
    let mut prev_ts: Option<u64> = None;
    let mut sent = 0;
    for fix in fixes {
        if let Some(prev) = prev_ts {
            let gap_ms = fix.timestamp_ms.saturating_sub(prev);
            if speedup > 0.0 && gap_ms > 0 {
                tokio::time::sleep(Duration::from_secs_f64(gap_ms as f64 / 1000.0 / speedup)).await;
            }
        }
        prev_ts = Some(fix.timestamp_ms);
        tx.send(fix).await.map_err(|_| RuntimeError::ChannelClosed("fix"))?;
        sent += 1;
    }
    debug!(sent, "replay finished");
    Ok(sent)
}
