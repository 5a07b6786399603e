//! Warnings emitted when a generator degrades instead of producing a case.

use serde::{Deserialize, Serialize};

/// A case the generator wanted to emit but could not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// Dotted field path of the schema node (empty at the root).
    pub path: String,
    /// Classification of the warning.
    pub kind: WarningKind,
    /// Human-readable description.
    pub message: String,
}

/// Classification of generation warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WarningKind {
    /// No string matching the pattern could be synthesized.
    RegexSynthesis {
        /// The pattern source.
        pattern: String,
    },
    /// A rejection-sampling loop ran out of attempts.
    SamplingExhausted {
        /// What was being sampled (e.g. "regex non-match").
        target: String,
    },
}
