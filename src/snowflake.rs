use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// Relay epoch: 2025-01-01T00:00:00Z
const EPOCH: u64 = 1_735_689_600_000;

static LAST_ID: AtomicU64 = AtomicU64::new(0);

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(EPOCH)
}

/// Time-ordered id for push connections: milliseconds since the relay epoch
/// in the high bits, a per-millisecond sequence in the low 22. Ids are
/// strictly increasing within the process.
pub fn generate() -> String {
    let base = now_ms().saturating_sub(EPOCH) << 22;
    let mut prev = LAST_ID.load(Ordering::SeqCst);
    loop {
        let next = base.max(prev + 1);
        match LAST_ID.compare_exchange_weak(prev, next, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => return next.to_string(),
            Err(actual) => prev = actual,
        }
    }
}
