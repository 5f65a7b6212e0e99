// ABOUTME: Environment-driven client settings and nutrition formula tables
// ABOUTME: ApiConfig, RetryConfig, and the BMR/activity/portion coefficient structs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the data client and the nutrition formulas.
//!
//! Client settings come from the environment with documented defaults; the
//! formula tables are plain serde structs whose `Default` impls carry the
//! published coefficients, so alternate coefficient sets can be injected in
//! tests without touching the arithmetic.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::ActivityLevel;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Settings for the HTTP data client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend API (no trailing slash)
    pub base_url: String,
    /// Per-request timeout; an exceeded deadline cancels the in-flight request
    pub timeout: Duration,
    /// Retry policy for idempotent reads
    pub retry: RetryConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Build configuration from the environment, falling back to defaults.
    ///
    /// Reads `NUTRILOG_API_BASE_URL`, `NUTRILOG_HTTP_TIMEOUT_SECS`,
    /// `NUTRILOG_RETRY_MAX_ATTEMPTS`, and `NUTRILOG_RETRY_BASE_DELAY_MS`.
    /// Unset or unparseable values fall back to the documented defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("NUTRILOG_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let timeout = std::env::var("NUTRILOG_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS), Duration::from_secs);
        let max_retries = std::env::var("NUTRILOG_RETRY_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(RetryConfig::DEFAULT_MAX_RETRIES);
        let base_delay = std::env::var("NUTRILOG_RETRY_BASE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map_or(
                Duration::from_millis(RetryConfig::DEFAULT_BASE_DELAY_MS),
                Duration::from_millis,
            );

        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
            retry: RetryConfig {
                max_retries,
                base_delay,
            },
        }
    }
}

/// Retry policy for the read path.
///
/// Backoff growth is linear, not exponential: the delay before attempt `n`
/// (1-based, `n >= 2`) is `base_delay * n`. Tests depend on this exact
/// progression, so do not introduce jitter here.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Additional attempts beyond the first (0 = no retries)
    pub max_retries: u32,
    /// Base delay unit for the linear backoff
    pub base_delay: Duration,
}

impl RetryConfig {
    /// Default retry budget: 3 extra attempts
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    /// Default backoff base delay: 1 second
    pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;

    /// Delay to wait before running attempt `attempt` (1-based).
    ///
    /// Attempt 1 runs immediately; attempt `n >= 2` waits `base_delay * n`.
    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            Duration::ZERO
        } else {
            self.base_delay * attempt
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(Self::DEFAULT_BASE_DELAY_MS),
        }
    }
}

/// All formula tables used by the aggregator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Harris-Benedict BMR coefficients
    pub bmr: BmrConfig,
    /// Activity multipliers for TDEE
    pub activity_factors: ActivityFactorsConfig,
    /// Meal-portion multipliers for TDEE
    pub portion_factors: PortionFactorsConfig,
}

/// Harris-Benedict (revised) BMR coefficients.
///
/// male:   `88.362 + 13.397*weight + 4.799*height - 5.677*age`
/// female: `447.593 + 9.247*weight + 3.098*height - 4.330*age`
///
/// Results are intentionally not clamped; implausible inputs may yield a
/// negative BMR and callers must not assume non-negativity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Male base constant (88.362)
    pub male_base: f64,
    /// Male weight coefficient, kcal per kg (13.397)
    pub male_weight_coef: f64,
    /// Male height coefficient, kcal per cm (4.799)
    pub male_height_coef: f64,
    /// Male age coefficient, kcal per year, subtracted (5.677)
    pub male_age_coef: f64,
    /// Female base constant (447.593)
    pub female_base: f64,
    /// Female weight coefficient, kcal per kg (9.247)
    pub female_weight_coef: f64,
    /// Female height coefficient, kcal per cm (3.098)
    pub female_height_coef: f64,
    /// Female age coefficient, kcal per year, subtracted (4.330)
    pub female_age_coef: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            male_base: 88.362,
            male_weight_coef: 13.397,
            male_height_coef: 4.799,
            male_age_coef: 5.677,
            female_base: 447.593,
            female_weight_coef: 9.247,
            female_height_coef: 3.098,
            female_age_coef: 4.330,
        }
    }
}

/// Activity-level multipliers applied to BMR
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Light activity (1.375)
    pub light: f64,
    /// Moderate activity (1.55)
    pub moderate: f64,
    /// Heavy activity (1.725)
    pub heavy: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for the given activity level
    #[must_use]
    pub fn factor_for(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Heavy => self.heavy,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            light: 1.375,
            moderate: 1.55,
            heavy: 1.725,
        }
    }
}

/// Meal-portion-count multipliers applied after the activity factor.
///
/// The profile form allows portion counts up to 10, but only 1-5 have defined
/// multipliers; everything else takes the explicit default arm (1.0). The
/// table is deliberately not extended beyond 5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortionFactorsConfig {
    /// One portion per day (0.8)
    pub one: f64,
    /// Two portions per day (0.9)
    pub two: f64,
    /// Three portions per day (1.0)
    pub three: f64,
    /// Four portions per day (1.1)
    pub four: f64,
    /// Five portions per day (1.2)
    pub five: f64,
    /// Fallback for counts outside 1-5 (1.0)
    pub default: f64,
}

impl PortionFactorsConfig {
    /// Multiplier for the given portion count, with the default arm for
    /// anything outside 1-5
    #[must_use]
    pub fn factor_for(&self, portion_count: u8) -> f64 {
        match portion_count {
            1 => self.one,
            2 => self.two,
            3 => self.three,
            4 => self.four,
            5 => self.five,
            _ => self.default,
        }
    }
}

impl Default for PortionFactorsConfig {
    fn default() -> Self {
        Self {
            one: 0.8,
            two: 0.9,
            three: 1.0,
            four: 1.1,
            five: 1.2,
            default: 1.0,
        }
    }
}
