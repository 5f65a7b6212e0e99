// ABOUTME: Daily-nutrition aggregation and resilient data client for a food-logging backend
// ABOUTME: Library root declaring the module graph and crate-wide lint policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Nutrilog
//!
//! Client-side core for a food-logging application: fetches user profiles and
//! meal-log entries from the backend HTTP API with enforced timeouts and a
//! bounded retry policy, then derives the daily nutrition view (calorie
//! target, consumed, remaining, per-category totals) from those inputs.
//!
//! The backend, durable storage, and the image classifier are external
//! collaborators; this crate owns only the fetch layer and the derived-state
//! computation. All timestamps are civil date-times in UTC+7 (WIB), matching
//! the convention the backend uses when stamping entries at write time.
//!
//! ## Modules
//!
//! - **client**: HTTP access layer with timeout enforcement, structured error
//!   classification, and linear-backoff retry for idempotent reads
//! - **aggregator**: BMR/TDEE/BMI arithmetic, meal-time bucketing, and the
//!   per-day aggregation that produces [`models::DailyNutritionView`]
//! - **models**: wire and domain types for profiles and meal-log entries
//! - **config**: environment-driven client settings and formula tables
//! - **errors**: error taxonomy with transient/terminal classification
//! - **timezone**: fixed UTC+7 civil clock helpers

/// BMR/TDEE/BMI computation and daily aggregation
pub mod aggregator;

/// Resilient HTTP data client and transport seam
pub mod client;

/// Environment-driven configuration and formula lookup tables
pub mod config;

/// Error taxonomy for client and aggregation failures
pub mod errors;

/// Profile, meal-log, and derived-view data models
pub mod models;

/// Fixed UTC+7 (WIB) civil date-time helpers
pub mod timezone;
