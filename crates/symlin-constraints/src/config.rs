//! Extraction configuration.

/// How the sign of each extracted row is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SignConvention {
    /// Negate a row when its first nonzero coefficient is a negative
    /// number, so that `a = b` and `b = a` extract to the same row.
    /// Rows whose leading coefficient has no determinable sign are kept.
    #[default]
    LeadingPositive,
    /// Keep every row as `left - right`.
    AsWritten,
}

/// Configuration for linear system extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Sign rule applied to each row.
    pub sign: SignConvention,
}

impl ExtractionConfig {
    /// Returns a configuration with the given sign rule.
    #[must_use]
    pub fn with_sign(mut self, sign: SignConvention) -> Self {
        self.sign = sign;
        self
    }
}
