// ABOUTME: Derived daily-nutrition view model produced by the aggregator
// ABOUTME: Transient per-request state, recomputed on every view and never persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::MealCategory;

/// One classified meal-log entry as rendered in the daily view
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewItem {
    /// Food name
    pub name: String,
    /// Whole-kcal energy (truncated per entry)
    pub kcal: u32,
    /// Wall-clock time of the entry, absent for date-only stamps
    pub time: Option<NaiveTime>,
    /// Meal-time bucket
    pub category: MealCategory,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
}

/// The daily nutrition view: fully derived from a profile plus one day's
/// meal-log entries, owned transiently by the requesting view and discarded
/// after render.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyNutritionView {
    /// The civil WIB date this view covers
    pub date: NaiveDate,
    /// Calorie target from TDEE (or the neutral default without a profile)
    pub target_kcal: i64,
    /// Sum of consumed kcal across the day's entries
    pub consumed_kcal: u32,
    /// `target - consumed`; may be negative
    pub remaining_kcal: i64,
    /// Uncapped consumed/target ratio (0.0 when the target is non-positive)
    pub raw_ratio: f64,
    /// Display percentage of target, rounded and capped at 100
    pub percent_of_target: u8,
    /// Summed kcal per meal category; every category is present, absent ones
    /// hold 0
    pub category_totals: BTreeMap<MealCategory, u32>,
    /// The day's classified entries, in input order
    pub items: Vec<ViewItem>,
}
