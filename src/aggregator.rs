// ABOUTME: Daily-nutrition aggregation: BMR/TDEE targets, meal-time buckets, day views
// ABOUTME: Pure synchronous functions over profiles and meal-log entries, plus BMI
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily-nutrition aggregation.
//!
//! Everything here is pure and synchronous: callers fetch the profile and the
//! meal log, then derive the view. The view is recomputed on every request
//! and never persisted, so saving a new entry followed by a re-fetch always
//! reflects the addition.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{BmrConfig, NutritionConfig};
use crate::errors::NutritionError;
use crate::models::{
    DailyNutritionView, MealCategory, MealLogEntry, Sex, UserProfile, ViewItem,
};

/// Neutral calorie target used when the user has no stored profile
pub const DEFAULT_TARGET_KCAL: i64 = 2000;

/// Hour assumed for date-only stamps when classifying by meal time
pub const DEFAULT_ENTRY_HOUR: u32 = 12;

/// BMI classification bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// BMI in [18.5, 25)
    Normal,
    /// BMI in [25, 30)
    Overweight,
    /// BMI of 30 or above
    Obese,
}

/// Basal metabolic rate via the revised Harris-Benedict equations.
///
/// The result is not clamped: implausible (but positive) measurements can
/// yield a negative BMR, which flows through TDEE unchanged.
///
/// # Errors
///
/// Returns [`NutritionError::InvalidProfile`] when the profile fails its
/// preconditions (non-positive age, height, or weight, or an out-of-range
/// portion count).
pub fn compute_bmr(profile: &UserProfile, config: &BmrConfig) -> Result<f64, NutritionError> {
    profile.validate()?;
    let weight = profile.weight_kg;
    let height = profile.height_cm;
    let age = f64::from(profile.age_years);
    let bmr = match profile.sex {
        Sex::Male => {
            config.male_base + config.male_weight_coef * weight + config.male_height_coef * height
                - config.male_age_coef * age
        }
        Sex::Female => {
            config.female_base
                + config.female_weight_coef * weight
                + config.female_height_coef * height
                - config.female_age_coef * age
        }
    };
    Ok(bmr)
}

/// Total daily energy expenditure: BMR scaled by the activity and portion
/// multipliers, rounded to the nearest whole kcal.
///
/// # Errors
///
/// Returns [`NutritionError::InvalidProfile`] when the profile fails its
/// preconditions.
pub fn compute_tdee(profile: &UserProfile, config: &NutritionConfig) -> Result<i64, NutritionError> {
    let bmr = compute_bmr(profile, &config.bmr)?;
    let activity = config.activity_factors.factor_for(profile.activity);
    let portion = config.portion_factors.factor_for(profile.portion_count);
    Ok((bmr * activity * portion).round() as i64)
}

/// Daily calorie target for an optional profile.
///
/// An absent profile gets the neutral [`DEFAULT_TARGET_KCAL`]; a present one
/// gets its TDEE.
///
/// # Errors
///
/// Returns [`NutritionError::InvalidProfile`] when a present profile fails
/// its preconditions. An invalid profile is never silently defaulted.
pub fn calorie_target(
    profile: Option<&UserProfile>,
    config: &NutritionConfig,
) -> Result<i64, NutritionError> {
    match profile {
        Some(p) => compute_tdee(p, config),
        None => Ok(DEFAULT_TARGET_KCAL),
    }
}

/// Meal-time bucket for an hour of day (0-23).
///
/// 05-09 breakfast, 10-14 lunch, 15-17 snack, 18-21 dinner, everything else
/// (22-04) beverage.
#[must_use]
pub fn categorize(hour: u32) -> MealCategory {
    match hour {
        5..=9 => MealCategory::Breakfast,
        10..=14 => MealCategory::Lunch,
        15..=17 => MealCategory::Snack,
        18..=21 => MealCategory::Dinner,
        _ => MealCategory::Beverage,
    }
}

/// Build the daily nutrition view for one user and one civil WIB date.
///
/// Entries are filtered by owner and by the stamp's date portion; date-only
/// stamps classify at [`DEFAULT_ENTRY_HOUR`]. Per-entry energy is floored at
/// zero and truncated to whole kcal before summing, so the consumed total
/// equals the sum of the displayed per-item values. The category totals map
/// always carries all five buckets, absent ones at zero. `remaining_kcal` may
/// go negative; the display percentage is rounded and capped at 100, while
/// `raw_ratio` stays uncapped for callers that want the overshoot.
///
/// # Errors
///
/// Returns [`NutritionError::InvalidProfile`] when a present profile fails
/// its preconditions.
pub fn aggregate_day(
    user_id: i64,
    profile: Option<&UserProfile>,
    entries: &[MealLogEntry],
    date: NaiveDate,
    config: &NutritionConfig,
) -> Result<DailyNutritionView, NutritionError> {
    let target_kcal = calorie_target(profile, config)?;

    let mut category_totals: BTreeMap<MealCategory, u32> =
        MealCategory::ALL.iter().map(|&c| (c, 0)).collect();
    let mut items = Vec::new();
    let mut consumed_kcal: u32 = 0;

    for entry in entries {
        if entry.user_id != user_id || entry.stamp.date() != date {
            continue;
        }
        let kcal = entry.calories.max(0.0).trunc() as u32;
        let category = categorize(entry.stamp.hour_or(DEFAULT_ENTRY_HOUR));
        consumed_kcal += kcal;
        if let Some(total) = category_totals.get_mut(&category) {
            *total += kcal;
        }
        items.push(ViewItem {
            name: entry.name.clone(),
            kcal,
            time: entry.stamp.time(),
            category,
            protein: entry.protein,
            carbs: entry.carbs,
            fat: entry.fat,
        });
    }

    let raw_ratio = if target_kcal > 0 {
        f64::from(consumed_kcal) / target_kcal as f64
    } else {
        0.0
    };
    let percent_of_target = if consumed_kcal > 0 && target_kcal > 0 {
        ((raw_ratio * 100.0).round() as u64).min(100) as u8
    } else {
        0
    };

    debug!(
        user_id,
        %date,
        target_kcal,
        consumed_kcal,
        entries = items.len(),
        "aggregated daily view"
    );

    Ok(DailyNutritionView {
        date,
        target_kcal,
        consumed_kcal,
        remaining_kcal: target_kcal - i64::from(consumed_kcal),
        raw_ratio,
        percent_of_target,
        category_totals,
        items,
    })
}

/// Body-mass index with its classification band.
///
/// This is a display metric, so it fails soft: non-positive height or weight
/// yields `(0.0, None)` instead of an error.
#[must_use]
pub fn compute_bmi(profile: &UserProfile) -> (f64, Option<BmiCategory>) {
    if profile.height_cm <= 0.0 || profile.weight_kg <= 0.0 {
        return (0.0, None);
    }
    let height_m = profile.height_cm / 100.0;
    let bmi = profile.weight_kg / (height_m * height_m);
    let category = if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };
    (bmi, Some(category))
}
