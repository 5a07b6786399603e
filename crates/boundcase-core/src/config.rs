//! Configuration for test-case generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Options for one generation call.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `max-synth-length`,
/// `sample-attempts`), matching the CLI's option file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GenerateOptions {
    /// Seed for every random choice. Same seed, same cases.
    pub seed: u64,
    /// Upper bound on synthesized string lengths. Default: 20.
    pub max_synth_length: usize,
    /// Half-width of the sampling range used in place of a missing numeric
    /// bound. Default: 1e10.
    pub unbounded_span: f64,
    /// Valid value emitted for `finite` numbers. Default: 1e6.
    pub finite_sentinel: f64,
    /// Attempts for rejection-sampling loops (regex synthesis, non-matches,
    /// non-multiples) before giving up with a warning. Default: 1000.
    pub sample_attempts: usize,
    /// Clock anchor for calendar boundary cases. `None` reads the system
    /// clock once per call.
    pub now: Option<DateTime<Utc>>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            max_synth_length: 20,
            unbounded_span: 1e10,
            finite_sentinel: 1_000_000.0,
            sample_attempts: 1000,
            now: None,
        }
    }
}

impl GenerateOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_options_serde_round_trip() {
        let opts = GenerateOptions {
            seed: 42,
            max_synth_length: 12,
            ..GenerateOptions::default()
        };

        let json = serde_json::to_string(&opts).unwrap();
        assert!(json.contains("\"max-synth-length\""));
        assert!(json.contains("\"sample-attempts\""));

        let deserialized: GenerateOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, opts);
    }

    #[test]
    fn test_partial_options_fill_defaults() {
        let opts: GenerateOptions = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
        assert_eq!(opts.seed, 9);
        assert_eq!(opts.max_synth_length, 20);
        assert_eq!(opts.finite_sentinel, 1_000_000.0);
    }
}
