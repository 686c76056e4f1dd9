//! Session statistics.
//!
//! Running counters over every attempt (total, ok, err) plus a rolling
//! window of response latencies used for the average-latency display. The
//! window is advisory: evicting old samples never affects the counters.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of latency samples retained in the rolling window.
pub const MAX_LATENCY_SAMPLES: usize = 50;

/// Running counters and the rolling latency window.
///
/// Invariant: `total == ok + err`. The window holds at most
/// [`MAX_LATENCY_SAMPLES`] entries, oldest evicted first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    total: u64,
    ok: u64,
    err: u64,
    times: VecDeque<u64>,
}

impl Stats {
    /// Creates zeroed statistics with an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one attempt.
    ///
    /// # Arguments
    ///
    /// * `success` - The attempt's outcome classification
    /// * `elapsed_ms` - Latency sample; present only when a response arrived
    pub fn record(&mut self, success: bool, elapsed_ms: Option<u64>) {
        self.total += 1;
        if success {
            self.ok += 1;
        } else {
            self.err += 1;
        }
        if let Some(elapsed) = elapsed_ms {
            self.times.push_back(elapsed);
            if self.times.len() > MAX_LATENCY_SAMPLES {
                self.times.pop_front();
            }
        }
    }

    /// Mean of the current window, rounded to the nearest millisecond.
    ///
    /// Returns `None` when the window is empty - "no data" is distinct from
    /// an average of zero.
    pub fn average(&self) -> Option<u64> {
        if self.times.is_empty() {
            return None;
        }
        let sum: u64 = self.times.iter().sum();
        let mean = sum as f64 / self.times.len() as f64;
        Some(mean.round() as u64)
    }

    /// Resets all counters and empties the window.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Total number of recorded attempts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of attempts classified ok.
    pub fn ok(&self) -> u64 {
        self.ok
    }

    /// Number of attempts classified err.
    pub fn err(&self) -> u64 {
        self.err
    }

    /// The retained latency samples, oldest first.
    pub fn times(&self) -> impl Iterator<Item = u64> + '_ {
        self.times.iter().copied()
    }

    /// Number of retained latency samples.
    pub fn sample_count(&self) -> usize {
        self.times.len()
    }

    /// Checks the structural invariants.
    ///
    /// Deserialized state can violate them; the persistence gateway treats
    /// an inconsistent snapshot as corruption.
    pub fn is_consistent(&self) -> bool {
        self.total == self.ok + self.err && self.times.len() <= MAX_LATENCY_SAMPLES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counters() {
        let mut stats = Stats::new();
        stats.record(true, Some(10));
        stats.record(false, Some(30));
        stats.record(false, None);

        assert_eq!(stats.total(), 3);
        assert_eq!(stats.ok(), 1);
        assert_eq!(stats.err(), 2);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_total_always_equals_ok_plus_err() {
        let mut stats = Stats::new();
        for i in 0..137 {
            stats.record(i % 3 == 0, if i % 5 == 0 { None } else { Some(i) });
            assert_eq!(stats.total(), stats.ok() + stats.err());
        }
    }

    #[test]
    fn test_window_cap_is_fifo() {
        let mut stats = Stats::new();
        for i in 0..MAX_LATENCY_SAMPLES as u64 + 10 {
            stats.record(true, Some(i));
        }

        assert_eq!(stats.sample_count(), MAX_LATENCY_SAMPLES);
        // The first ten samples were evicted.
        assert_eq!(stats.times().next(), Some(10));
        assert_eq!(stats.times().last(), Some(MAX_LATENCY_SAMPLES as u64 + 9));
    }

    #[test]
    fn test_no_sample_recorded_without_latency() {
        let mut stats = Stats::new();
        stats.record(false, None);
        assert_eq!(stats.sample_count(), 0);
        assert_eq!(stats.err(), 1);
    }

    #[test]
    fn test_average_empty_is_none() {
        assert_eq!(Stats::new().average(), None);
    }

    #[test]
    fn test_average_zero_is_not_no_data() {
        let mut stats = Stats::new();
        stats.record(true, Some(0));
        assert_eq!(stats.average(), Some(0));
    }

    #[test]
    fn test_average_rounds_to_nearest() {
        let mut stats = Stats::new();
        stats.record(true, Some(10));
        stats.record(true, Some(11));
        // 10.5 rounds up.
        assert_eq!(stats.average(), Some(11));

        let mut stats = Stats::new();
        stats.record(true, Some(10));
        stats.record(true, Some(10));
        stats.record(true, Some(11));
        // 10.33... rounds down.
        assert_eq!(stats.average(), Some(10));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut stats = Stats::new();
        stats.record(true, Some(42));
        stats.clear();

        assert_eq!(stats.total(), 0);
        assert_eq!(stats.ok(), 0);
        assert_eq!(stats.err(), 0);
        assert_eq!(stats.average(), None);
    }

    #[test]
    fn test_inconsistent_snapshot_detected() {
        let corrupt: Stats =
            serde_json::from_str(r#"{"total":5,"ok":1,"err":1,"times":[]}"#).unwrap();
        assert!(!corrupt.is_consistent());

        let valid: Stats =
            serde_json::from_str(r#"{"total":2,"ok":1,"err":1,"times":[3,4]}"#).unwrap();
        assert!(valid.is_consistent());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut stats = Stats::new();
        stats.record(true, Some(7));
        stats.record(false, None);

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: Stats = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, stats);
    }
}
