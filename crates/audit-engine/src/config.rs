//! Configuration for the audit pipeline
//!
//! One value is shared by every entry point (HTTP server and CLI), so the
//! thresholds and caps cannot differ between surfaces.

use std::str::FromStr;
use std::time::Duration;

use crate::error::AuditError;

/// Minimum clause length in characters (clauses must be strictly longer)
pub const DEFAULT_MIN_CLAUSE_LEN: usize = 20;
pub const DEFAULT_MAX_CLAUSES: usize = 50;
pub const DEFAULT_RISK_THRESHOLD: f64 = 0.35;
pub const DEFAULT_SAFE_THRESHOLD: f64 = 0.50;
pub const DEFAULT_SAFE_POINTS_CAP: usize = 10;
pub const DEFAULT_SUMMARY_PREFIX_LEN: usize = 3000;
pub const DEFAULT_SUMMARY_MAX_LEN: usize = 130;
pub const DEFAULT_SUMMARY_MIN_LEN: usize = 30;
pub const DEFAULT_SUMMARY_FALLBACK: &str = "Analysis complete, but summary generation timed out.";
pub const DEFAULT_CLASSIFY_CONCURRENCY: usize = 4;
pub const DEFAULT_CLASSIFY_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_SUMMARY_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_DOCUMENT_DEADLINE_MS: u64 = 300_000;

/// Threshold policy and resource limits for one analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AuditConfig {
    /// Candidates with this many characters or fewer are not clauses
    pub min_clause_len: usize,
    /// Clauses beyond this count are dropped before classification
    pub max_clauses: usize,
    /// Risk-labelled clauses must score strictly above this
    pub risk_threshold: f64,
    /// Remaining clauses must score strictly above this to count as safe
    pub safe_threshold: f64,
    /// Number of safe points kept in the report
    pub safe_points_cap: usize,
    /// Characters of document text handed to the summarizer
    pub summary_prefix_len: usize,
    pub summary_max_len: usize,
    pub summary_min_len: usize,
    /// Summary text used when the summarizer cannot produce one
    pub summary_fallback: String,
    /// Classification requests in flight at once
    pub classify_concurrency: usize,
    pub classify_timeout_ms: u64,
    pub summary_timeout_ms: u64,
    /// Upper bound on a whole document analysis
    pub document_deadline_ms: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            min_clause_len: DEFAULT_MIN_CLAUSE_LEN,
            max_clauses: DEFAULT_MAX_CLAUSES,
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            safe_threshold: DEFAULT_SAFE_THRESHOLD,
            safe_points_cap: DEFAULT_SAFE_POINTS_CAP,
            summary_prefix_len: DEFAULT_SUMMARY_PREFIX_LEN,
            summary_max_len: DEFAULT_SUMMARY_MAX_LEN,
            summary_min_len: DEFAULT_SUMMARY_MIN_LEN,
            summary_fallback: DEFAULT_SUMMARY_FALLBACK.to_string(),
            classify_concurrency: DEFAULT_CLASSIFY_CONCURRENCY,
            classify_timeout_ms: DEFAULT_CLASSIFY_TIMEOUT_MS,
            summary_timeout_ms: DEFAULT_SUMMARY_TIMEOUT_MS,
            document_deadline_ms: DEFAULT_DOCUMENT_DEADLINE_MS,
        }
    }
}

impl AuditConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults. Recognized variables:
    /// - AUDIT_MIN_CLAUSE_LEN, AUDIT_MAX_CLAUSES
    /// - AUDIT_RISK_THRESHOLD, AUDIT_SAFE_THRESHOLD, AUDIT_SAFE_POINTS_CAP
    /// - AUDIT_SUMMARY_PREFIX_LEN, AUDIT_SUMMARY_MAX_LEN, AUDIT_SUMMARY_MIN_LEN
    /// - AUDIT_SUMMARY_FALLBACK
    /// - AUDIT_CLASSIFY_CONCURRENCY
    /// - AUDIT_CLASSIFY_TIMEOUT_MS, AUDIT_SUMMARY_TIMEOUT_MS, AUDIT_DOCUMENT_DEADLINE_MS
    pub fn from_env() -> Result<Self, AuditError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuditError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            min_clause_len: parse_or(&lookup, "AUDIT_MIN_CLAUSE_LEN", defaults.min_clause_len)?,
            max_clauses: parse_or(&lookup, "AUDIT_MAX_CLAUSES", defaults.max_clauses)?,
            risk_threshold: parse_or(&lookup, "AUDIT_RISK_THRESHOLD", defaults.risk_threshold)?,
            safe_threshold: parse_or(&lookup, "AUDIT_SAFE_THRESHOLD", defaults.safe_threshold)?,
            safe_points_cap: parse_or(&lookup, "AUDIT_SAFE_POINTS_CAP", defaults.safe_points_cap)?,
            summary_prefix_len: parse_or(
                &lookup,
                "AUDIT_SUMMARY_PREFIX_LEN",
                defaults.summary_prefix_len,
            )?,
            summary_max_len: parse_or(&lookup, "AUDIT_SUMMARY_MAX_LEN", defaults.summary_max_len)?,
            summary_min_len: parse_or(&lookup, "AUDIT_SUMMARY_MIN_LEN", defaults.summary_min_len)?,
            summary_fallback: lookup("AUDIT_SUMMARY_FALLBACK").unwrap_or(defaults.summary_fallback),
            classify_concurrency: parse_or(
                &lookup,
                "AUDIT_CLASSIFY_CONCURRENCY",
                defaults.classify_concurrency,
            )?,
            classify_timeout_ms: parse_or(
                &lookup,
                "AUDIT_CLASSIFY_TIMEOUT_MS",
                defaults.classify_timeout_ms,
            )?,
            summary_timeout_ms: parse_or(
                &lookup,
                "AUDIT_SUMMARY_TIMEOUT_MS",
                defaults.summary_timeout_ms,
            )?,
            document_deadline_ms: parse_or(
                &lookup,
                "AUDIT_DOCUMENT_DEADLINE_MS",
                defaults.document_deadline_ms,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that every field is within its meaningful range
    pub fn validate(&self) -> Result<(), AuditError> {
        for (name, value) in [
            ("risk_threshold", self.risk_threshold),
            ("safe_threshold", self.safe_threshold),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(AuditError::InvalidConfig(format!(
                    "{} must be in (0, 1), got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("max_clauses", self.max_clauses),
            ("safe_points_cap", self.safe_points_cap),
            ("summary_prefix_len", self.summary_prefix_len),
            ("summary_max_len", self.summary_max_len),
            ("classify_concurrency", self.classify_concurrency),
        ] {
            if value == 0 {
                return Err(AuditError::InvalidConfig(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }

        if self.summary_min_len > self.summary_max_len {
            return Err(AuditError::InvalidConfig(format!(
                "summary_min_len ({}) exceeds summary_max_len ({})",
                self.summary_min_len, self.summary_max_len
            )));
        }

        for (name, value) in [
            ("classify_timeout_ms", self.classify_timeout_ms),
            ("summary_timeout_ms", self.summary_timeout_ms),
            ("document_deadline_ms", self.document_deadline_ms),
        ] {
            if value == 0 {
                return Err(AuditError::InvalidConfig(format!("{} must be > 0", name)));
            }
        }

        Ok(())
    }

    pub fn classify_timeout(&self) -> Duration {
        Duration::from_millis(self.classify_timeout_ms)
    }

    pub fn summary_timeout(&self) -> Duration {
        Duration::from_millis(self.summary_timeout_ms)
    }

    pub fn document_deadline(&self) -> Duration {
        Duration::from_millis(self.document_deadline_ms)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AuditError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AuditError::InvalidConfig(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AuditConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.risk_threshold, 0.35);
        assert_eq!(config.safe_threshold, 0.50);
        assert_eq!(config.max_clauses, 50);
        assert_eq!(config.safe_points_cap, 10);
    }

    #[test]
    fn test_empty_lookup_yields_defaults() {
        let config = AuditConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AuditConfig::default());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = AuditConfig::from_lookup(lookup_from(&[
            ("AUDIT_RISK_THRESHOLD", "0.40"),
            ("AUDIT_MAX_CLAUSES", " 30 "),
            ("AUDIT_SAFE_POINTS_CAP", "8"),
            ("AUDIT_SUMMARY_FALLBACK", "No summary."),
        ]))
        .unwrap();

        assert_eq!(config.risk_threshold, 0.40);
        assert_eq!(config.max_clauses, 30);
        assert_eq!(config.safe_points_cap, 8);
        assert_eq!(config.summary_fallback, "No summary.");
    }

    #[test]
    fn test_unparseable_value_rejected() {
        let result = AuditConfig::from_lookup(lookup_from(&[("AUDIT_MAX_CLAUSES", "many")]));
        assert!(matches!(
            result,
            Err(AuditError::InvalidConfig(msg)) if msg.contains("AUDIT_MAX_CLAUSES")
        ));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = AuditConfig {
            risk_threshold: 1.0,
            ..AuditConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AuditConfig {
            safe_threshold: 0.0,
            ..AuditConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_bounds_rejected() {
        let config = AuditConfig {
            summary_min_len: 200,
            summary_max_len: 100,
            ..AuditConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = AuditConfig {
            classify_concurrency: 0,
            ..AuditConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
