//! Sampling configuration for the two attempts.

use crate::client::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Token budget and temperature for one model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvocationParams {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for InvocationParams {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Configuration for extraction attempts.
///
/// The number of attempts is not configurable: one primary call and at most
/// one repair call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Parameters for the primary call (default: 900 tokens, temperature 0.2).
    pub primary: InvocationParams,
    /// Parameters for the repair call (default: 900 tokens, temperature 0.0).
    pub repair: InvocationParams,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            primary: InvocationParams::default(),
            repair: InvocationParams {
                max_tokens: DEFAULT_MAX_TOKENS,
                temperature: 0.0,
            },
        }
    }
}

impl ExtractionConfig {
    /// Set the primary call parameters.
    #[must_use]
    pub const fn with_primary(mut self, params: InvocationParams) -> Self {
        self.primary = params;
        self
    }

    /// Set the repair call parameters.
    #[must_use]
    pub const fn with_repair(mut self, params: InvocationParams) -> Self {
        self.repair = params;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_defaults_to_zero_temperature() {
        let config = ExtractionConfig::default();
        assert_eq!(config.primary.max_tokens, 900);
        assert!((config.primary.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.repair.max_tokens, 900);
        assert!(config.repair.temperature.abs() < f32::EPSILON);
    }
}
