//! Leaf generators and the per-call generation context.
//!
//! A leaf generator turns one primitive schema node into candidate cases.
//! It never decides validity itself: every candidate goes through
//! [`case`](crate::oracle::case) and the dispatcher filters the result into
//! the requested bucket.

mod boolean;
mod enumeration;
mod number;
mod string;
mod window;

use chrono::{DateTime, Utc};
use tracing::warn;

pub use boolean::BooleanGenerator;
pub use enumeration::EnumGenerator;
pub use number::NumberGenerator;
pub use string::StringGenerator;
pub use window::{DateWindowGenerator, TimeWindowGenerator};

use crate::config::GenerateOptions;
use crate::error::GenerateError;
use crate::oracle::TestCase;
use crate::random::CaseRng;
use crate::schema::Schema;
use crate::warning::{Warning, WarningKind};

/// Produces valid and invalid candidates for one schema kind.
pub trait LeafGenerator: Send + Sync {
    fn valid(&self, schema: &Schema, ctx: &mut GenContext) -> Result<Vec<TestCase>, GenerateError>;

    fn invalid(&self, schema: &Schema, ctx: &mut GenContext)
        -> Result<Vec<TestCase>, GenerateError>;
}

/// State owned by a single generation call.
#[derive(Debug)]
pub struct GenContext {
    pub rng: CaseRng,
    /// Clock anchor for calendar cases, read once per call.
    pub now: DateTime<Utc>,
    pub options: GenerateOptions,
    path: Vec<String>,
    warnings: Vec<Warning>,
}

impl GenContext {
    pub fn new(options: &GenerateOptions) -> Self {
        Self {
            rng: CaseRng::seeded(options.seed),
            now: options.now.unwrap_or_else(Utc::now),
            options: options.clone(),
            path: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Dotted path of the node being generated, empty at the root.
    pub fn path(&self) -> String {
        self.path.join(".")
    }

    /// Path for diagnostics, `(root)` when empty.
    pub fn location(&self) -> String {
        if self.path.is_empty() {
            "(root)".to_string()
        } else {
            self.path()
        }
    }

    /// Run `f` with `field` appended to the path.
    pub fn scoped<T>(&mut self, field: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(field.to_string());
        let result = f(self);
        self.path.pop();
        result
    }

    /// Record a degradation and log it.
    pub fn warn(&mut self, kind: WarningKind, message: impl Into<String>) {
        let warning = Warning {
            path: self.path(),
            kind,
            message: message.into(),
        };
        warn!(path = %warning.path, kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    pub(crate) fn mismatch(&self, expected: &'static str, schema: &Schema) -> GenerateError {
        GenerateError::KindMismatch {
            expected,
            found: schema.kind_name().to_string(),
            path: self.location(),
        }
    }
}

/// Round to two decimals, half away from zero.
///
/// The epsilon nudge keeps values like `1.005` from rounding down because of
/// their binary representation.
pub(crate) fn round2(x: f64) -> f64 {
    if !x.is_finite() || x.abs() >= 1e15 {
        return x;
    }
    ((x + x.signum() * f64::EPSILON) * 100.0).round() / 100.0
}

/// Round a multiple to the decimal precision of its step (`0.30000000000000004`
/// becomes `0.3` for a step of `0.1`).
pub(crate) fn round_to_step(n: f64, step: f64) -> f64 {
    let scale = 10f64.powi(crate::schema::decimals(step) as i32);
    let scaled = n * scale;
    if !scaled.is_finite() {
        return n;
    }
    scaled.round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.0 + 0.01), 1.01);
        assert_eq!(round2(10.0 - 0.01), 9.99);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(1e308), 1e308);
        assert_eq!(round2(-1e300), -1e300);
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(3.0 * 0.1, 0.1), 0.3);
        assert_eq!(round_to_step(0.7000000000000001, 0.05), 0.7);
        assert_eq!(round_to_step(15.0, 5.0), 15.0);
        assert_eq!(round_to_step(1e308, 0.5), 1e308);
    }

    #[test]
    fn test_scoped_path() {
        let mut ctx = GenContext::new(&GenerateOptions::default());
        assert_eq!(ctx.location(), "(root)");
        let inner = ctx.scoped("user", |ctx| ctx.scoped("name", |ctx| ctx.path()));
        assert_eq!(inner, "user.name");
        assert_eq!(ctx.path(), "");
    }

    #[test]
    fn test_warn_records_path() {
        let mut ctx = GenContext::new(&GenerateOptions::default());
        ctx.scoped("code", |ctx| {
            ctx.warn(
                WarningKind::RegexSynthesis {
                    pattern: "^x$".to_string(),
                },
                "no match",
            )
        });
        let warnings = ctx.into_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "code");
    }
}
