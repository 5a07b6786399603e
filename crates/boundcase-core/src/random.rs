//! The seeded random source injected into every generation call.
//!
//! All randomness flows through [`CaseRng`]: numeric sampling, fake format
//! examples and regex synthesis. Two calls with the same seed produce the
//! same cases.

use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::{Config as ProptestConfig, RngAlgorithm, TestRng, TestRunner};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::schema::{Pattern, StringFormat};

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NANOID: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

const FIRST_NAMES: &[&str] = &["ada", "grace", "alan", "linus", "barbara", "edsger"];
const DOMAINS: &[&str] = &["example.com", "example.org", "test.dev", "mail.example.net"];
const PATHS: &[&str] = &["", "/docs", "/api/v1/items", "/users/42", "/search?q=rust"];
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

const EMOJI: &[&str] = &["😀", "🎉", "🚀", "🌟", "🔥", "👍", "🦀", "🍕"];

/// Seeded random source.
#[derive(Debug, Clone)]
pub struct CaseRng {
    rng: StdRng,
}

impl CaseRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform float in `[low, high]`.
    ///
    /// Ranges whose width overflows `f64` are sampled by interpolation
    /// between the bounds instead.
    pub fn float_in(&mut self, low: f64, high: f64) -> f64 {
        if low.is_nan() || high.is_nan() || low >= high {
            return low;
        }
        if (high - low).is_finite() {
            return self.rng.gen_range(low..=high);
        }
        let t: f64 = self.rng.gen_range(0.0..=1.0);
        (low * (1.0 - t) + high * t).clamp(low, high)
    }

    /// Uniform integer-valued float in `[ceil(low), floor(high)]`, if any exists.
    ///
    /// Past the safe-integer range every float is already integral, so such
    /// bounds fall back to float sampling.
    pub fn int_in(&mut self, low: f64, high: f64) -> Option<f64> {
        let (low, high) = (low.ceil(), high.floor());
        if low > high {
            return None;
        }
        if low.abs() > MAX_SAFE_INTEGER || high.abs() > MAX_SAFE_INTEGER {
            return Some(self.float_in(low, high).round().clamp(low, high));
        }
        Some(self.rng.gen_range(low as i64..=high as i64) as f64)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn from_alphabet(&mut self, alphabet: &[u8], len: usize) -> String {
        (0..len)
            .map(|_| char::from(alphabet[self.rng.gen_range(0..alphabet.len())]))
            .collect()
    }

    pub fn lowercase(&mut self, len: usize) -> String {
        self.from_alphabet(LOWERCASE, len)
    }

    pub fn alphanumeric(&mut self, len: usize) -> String {
        self.from_alphabet(ALPHANUMERIC, len)
    }

    pub fn email(&mut self) -> String {
        let name = self.pick(FIRST_NAMES);
        let number: u16 = self.rng.gen_range(1..1000);
        let domain = self.pick(DOMAINS);
        format!("{}{}@{}", name, number, domain)
    }

    pub fn url(&mut self) -> String {
        let domain = self.pick(DOMAINS);
        let path = self.pick(PATHS);
        format!("https://www.{}{}", domain, path)
    }

    pub fn uuid(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string()
    }

    pub fn emoji(&mut self) -> String {
        self.pick(EMOJI).to_string()
    }

    pub fn ip(&mut self) -> String {
        let octets: [u8; 4] = self.rng.gen();
        std::net::Ipv4Addr::from(octets).to_string()
    }

    /// A well-formed identifier for the id-like formats.
    pub fn id(&mut self, format: StringFormat) -> String {
        match format {
            StringFormat::Cuid => format!("c{}", self.from_alphabet(&ALPHANUMERIC[26..], 24)),
            StringFormat::Ulid => self.from_alphabet(CROCKFORD, 26),
            StringFormat::Nanoid => self.from_alphabet(NANOID, 21),
            _ => {
                let head = self.lowercase(1);
                format!("{}{}", head, self.from_alphabet(&ALPHANUMERIC[26..], 23))
            }
        }
    }

    /// Synthesize a string matching `pattern` with at most `max_len` characters.
    ///
    /// Leading `^` and trailing `$` are stripped before synthesis. Fails when
    /// the pattern cannot be synthesized or no sample within `attempts` fits.
    pub fn regex_match(
        &mut self,
        pattern: &Pattern,
        max_len: usize,
        attempts: usize,
    ) -> Result<String, String> {
        let normalized = normalize_pattern_for_generation(pattern.as_str())?;
        let strategy = proptest::string::string_regex(&format!("(?-u:{normalized})"))
            .or_else(|_| proptest::string::string_regex(&normalized))
            .map_err(|err| format!("pattern cannot be synthesized: {err}"))?;

        let mut runner = self.test_runner();
        for _ in 0..attempts {
            let Ok(tree) = strategy.new_tree(&mut runner) else {
                continue;
            };
            let candidate = tree.current();
            if candidate.chars().count() <= max_len && pattern.is_match(&candidate) {
                return Ok(candidate);
            }
        }
        Err(format!(
            "no match of at most {max_len} characters found in {attempts} attempts"
        ))
    }

    fn test_runner(&mut self) -> TestRunner {
        let config = ProptestConfig {
            rng_algorithm: RngAlgorithm::ChaCha,
            ..ProptestConfig::default()
        };
        let seed: [u8; 32] = self.rng.gen();
        let rng = TestRng::from_seed(config.rng_algorithm, &seed);
        TestRunner::new_with_rng(config, rng)
    }
}

fn normalize_pattern_for_generation(pattern: &str) -> Result<String, String> {
    if contains_boundary_escape(pattern) {
        return Err(
            "pattern uses boundary escapes which are unsupported for string generation"
                .to_string(),
        );
    }
    let bytes = pattern.as_bytes();
    let mut start = 0;
    let mut end = bytes.len();
    if bytes.first() == Some(&b'^') {
        start = 1;
    }
    if end > start && bytes[end - 1] == b'$' && !is_escaped(bytes, end - 1) {
        end -= 1;
    }
    Ok(pattern[start..end].to_string())
}

fn contains_boundary_escape(pattern: &str) -> bool {
    let bytes = pattern.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'\\' {
            match bytes.get(idx + 1) {
                Some(b'b' | b'B' | b'A' | b'Z' | b'z' | b'G') => return true,
                Some(_) => idx += 2,
                None => break,
            }
        } else {
            idx += 1;
        }
    }
    false
}

fn is_escaped(bytes: &[u8], idx: usize) -> bool {
    bytes[..idx]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
        % 2
        == 1
}
