//! Timestamp source for note writes
//!
//! Readings are truncated to microseconds (the stored precision) and are
//! strictly increasing within the process, even when the wall clock is
//! coarse or steps backwards. A reading is taken before the write lock,
//! so writers that race may commit out of order; `NoteRepo::update`
//! guards the stored value against that.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

/// Last timestamp handed out, in microseconds since the epoch
static LAST_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current time, strictly after every previous call.
pub fn now() -> DateTime<Utc> {
    let wall = Utc::now().timestamp_micros();
    let mut last = LAST_MICROS.load(Ordering::Relaxed);

    loop {
        let next = wall.max(last.saturating_add(1));
        match LAST_MICROS.compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return DateTime::from_timestamp_micros(next).unwrap_or_else(Utc::now),
            Err(current) => last = current,
        }
    }
}

/// Fixed-width text form used in the `notes` table.
///
/// Always six fractional digits and a `Z` suffix, so string comparison in
/// SQL orders the same way as time does.
pub fn to_column(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_increasing() {
        let mut prev = now();
        for _ in 0..1_000 {
            let next = now();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn microsecond_precision() {
        let ts = now();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn column_format_is_fixed_width() {
        let whole = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let fractional = DateTime::from_timestamp_micros(1_700_000_000_000_001).unwrap();

        assert_eq!(to_column(whole), "2023-11-14T22:13:20.000000Z");
        assert_eq!(to_column(fractional), "2023-11-14T22:13:20.000001Z");
        assert!(to_column(whole) < to_column(fractional));
    }

    #[test]
    fn column_format_parses_back() {
        let ts = now();
        let parsed = DateTime::parse_from_rfc3339(&to_column(ts)).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), ts);
    }
}
