// ABOUTME: Tests for the daily-nutrition aggregator: BMR/TDEE, buckets, day views, BMI
// ABOUTME: Exercises formula exactness, owner/date filtering, and display rounding rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveDate;
use nutrilog::aggregator::{
    aggregate_day, calorie_target, categorize, compute_bmi, compute_bmr, compute_tdee,
    BmiCategory, DEFAULT_TARGET_KCAL,
};
use nutrilog::config::{BmrConfig, NutritionConfig};
use nutrilog::errors::NutritionError;
use nutrilog::models::{ActivityLevel, MealCategory, Sex};

use common::{entry, reference_profile};

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn bmr_male_reference_profile() {
    // 88.362 + 13.397*70 + 4.799*170 - 5.677*25
    let bmr = compute_bmr(&reference_profile(1), &BmrConfig::default()).unwrap();
    assert!((bmr - 1700.057).abs() < 1e-9, "got {bmr}");
}

#[test]
fn bmr_female_formula() {
    let mut profile = reference_profile(1);
    profile.sex = Sex::Female;
    profile.age_years = 30;
    profile.height_cm = 160.0;
    profile.weight_kg = 55.0;
    // 447.593 + 9.247*55 + 3.098*160 - 4.330*30
    let bmr = compute_bmr(&profile, &BmrConfig::default()).unwrap();
    assert!((bmr - 1321.958).abs() < 1e-9, "got {bmr}");
}

#[test]
fn bmr_rejects_invalid_measurements() {
    let mut profile = reference_profile(1);
    profile.height_cm = 0.0;
    let err = compute_bmr(&profile, &BmrConfig::default()).unwrap_err();
    assert_eq!(
        err,
        NutritionError::InvalidProfile("height must be positive".to_owned())
    );

    let mut profile = reference_profile(1);
    profile.age_years = 0;
    assert!(compute_bmr(&profile, &BmrConfig::default()).is_err());

    let mut profile = reference_profile(1);
    profile.weight_kg = -1.0;
    assert!(compute_bmr(&profile, &BmrConfig::default()).is_err());
}

#[test]
fn bmr_is_not_clamped() {
    // A tiny body with a high age drives the formula negative; that result
    // must flow through untouched.
    let mut profile = reference_profile(1);
    profile.age_years = 90;
    profile.height_cm = 10.0;
    profile.weight_kg = 1.0;
    let bmr = compute_bmr(&profile, &BmrConfig::default()).unwrap();
    assert!(bmr < 0.0, "got {bmr}");
}

#[test]
fn tdee_scales_bmr_by_activity_and_portion() {
    // Reference BMR 1700.057, moderate (1.55), 3 portions (1.0)
    let tdee = compute_tdee(&reference_profile(1), &NutritionConfig::default()).unwrap();
    assert_eq!(tdee, 2635);
}

#[test]
fn tdee_heavy_activity_single_portion() {
    let mut profile = reference_profile(1);
    profile.activity = ActivityLevel::Heavy;
    profile.portion_count = 1;
    // 1700.057 * 1.725 * 0.8 = 2346.07866
    let tdee = compute_tdee(&profile, &NutritionConfig::default()).unwrap();
    assert_eq!(tdee, 2346);
}

#[test]
fn tdee_portion_count_outside_table_uses_default_factor() {
    let mut profile = reference_profile(1);
    profile.portion_count = 7;
    let baseline = compute_tdee(&reference_profile(1), &NutritionConfig::default()).unwrap();
    let with_seven = compute_tdee(&profile, &NutritionConfig::default()).unwrap();
    // 7 portions takes the default 1.0 arm, same as 3 portions
    assert_eq!(with_seven, baseline);
}

#[test]
fn calorie_target_without_profile_is_neutral_default() {
    let target = calorie_target(None, &NutritionConfig::default()).unwrap();
    assert_eq!(target, DEFAULT_TARGET_KCAL);
}

#[test]
fn calorie_target_never_defaults_an_invalid_profile() {
    let mut profile = reference_profile(1);
    profile.weight_kg = 0.0;
    assert!(calorie_target(Some(&profile), &NutritionConfig::default()).is_err());
}

#[test]
fn meal_time_bucket_boundaries() {
    assert_eq!(categorize(4), MealCategory::Beverage);
    assert_eq!(categorize(5), MealCategory::Breakfast);
    assert_eq!(categorize(9), MealCategory::Breakfast);
    assert_eq!(categorize(10), MealCategory::Lunch);
    assert_eq!(categorize(14), MealCategory::Lunch);
    assert_eq!(categorize(15), MealCategory::Snack);
    assert_eq!(categorize(17), MealCategory::Snack);
    assert_eq!(categorize(18), MealCategory::Dinner);
    assert_eq!(categorize(21), MealCategory::Dinner);
    assert_eq!(categorize(22), MealCategory::Beverage);
    assert_eq!(categorize(0), MealCategory::Beverage);
}

#[test]
fn empty_day_yields_zeroed_view_with_all_buckets() {
    let view = aggregate_day(1, None, &[], day("2026-08-01"), &NutritionConfig::default()).unwrap();
    assert_eq!(view.consumed_kcal, 0);
    assert_eq!(view.target_kcal, DEFAULT_TARGET_KCAL);
    assert_eq!(view.remaining_kcal, DEFAULT_TARGET_KCAL);
    assert_eq!(view.percent_of_target, 0);
    assert!(view.raw_ratio.abs() < f64::EPSILON);
    assert!(view.items.is_empty());
    assert_eq!(view.category_totals.len(), 5);
    assert!(view.category_totals.values().all(|&kcal| kcal == 0));
}

#[test]
fn aggregation_filters_by_owner_and_date() {
    let entries = vec![
        entry(1, 10, "lontong", "2026-08-01 07:30:00", 350.0),
        entry(2, 11, "soto", "2026-08-01 12:00:00", 400.0), // other user
        entry(1, 12, "bakso", "2026-07-31 12:00:00", 500.0), // other day
        entry(1, 13, "nasi goreng", "2026-08-01 19:15:00", 520.0),
    ];
    let view = aggregate_day(
        1,
        None,
        &entries,
        day("2026-08-01"),
        &NutritionConfig::default(),
    )
    .unwrap();

    assert_eq!(view.items.len(), 2);
    assert_eq!(view.consumed_kcal, 870);
    assert_eq!(view.category_totals[&MealCategory::Breakfast], 350);
    assert_eq!(view.category_totals[&MealCategory::Dinner], 520);
    assert_eq!(view.category_totals[&MealCategory::Lunch], 0);
}

#[test]
fn date_only_stamps_classify_at_noon() {
    let entries = vec![entry(1, 10, "gado-gado", "2026-08-01", 420.0)];
    let view = aggregate_day(
        1,
        None,
        &entries,
        day("2026-08-01"),
        &NutritionConfig::default(),
    )
    .unwrap();
    assert_eq!(view.items[0].category, MealCategory::Lunch);
    assert_eq!(view.items[0].time, None);
}

#[test]
fn per_entry_kcal_is_truncated_before_summing() {
    let entries = vec![
        entry(1, 10, "a", "2026-08-01 08:00:00", 100.9),
        entry(1, 11, "b", "2026-08-01 12:00:00", 200.9),
    ];
    let view = aggregate_day(
        1,
        None,
        &entries,
        day("2026-08-01"),
        &NutritionConfig::default(),
    )
    .unwrap();
    // 100 + 200, not round(301.8)
    assert_eq!(view.consumed_kcal, 300);
    assert_eq!(view.items[0].kcal, 100);
    assert_eq!(view.items[1].kcal, 200);
}

#[test]
fn negative_calories_are_floored_at_zero() {
    let entries = vec![entry(1, 10, "corrupt", "2026-08-01 08:00:00", -50.0)];
    let view = aggregate_day(
        1,
        None,
        &entries,
        day("2026-08-01"),
        &NutritionConfig::default(),
    )
    .unwrap();
    assert_eq!(view.consumed_kcal, 0);
    assert_eq!(view.items[0].kcal, 0);
}

#[test]
fn percent_rounds_and_caps_at_one_hundred() {
    // 999 / 2000 = 49.95% -> 50
    let entries = vec![entry(1, 10, "a", "2026-08-01 08:00:00", 999.0)];
    let view = aggregate_day(
        1,
        None,
        &entries,
        day("2026-08-01"),
        &NutritionConfig::default(),
    )
    .unwrap();
    assert_eq!(view.percent_of_target, 50);

    // Overshoot keeps the raw ratio but caps the display percentage
    let entries = vec![entry(1, 10, "feast", "2026-08-01 12:00:00", 2500.0)];
    let view = aggregate_day(
        1,
        None,
        &entries,
        day("2026-08-01"),
        &NutritionConfig::default(),
    )
    .unwrap();
    assert_eq!(view.percent_of_target, 100);
    assert!((view.raw_ratio - 1.25).abs() < 1e-9);
    assert_eq!(view.remaining_kcal, -500);
}

#[test]
fn aggregation_is_idempotent() {
    let entries = vec![
        entry(1, 10, "lontong", "2026-08-01 07:30:00", 350.0),
        entry(1, 11, "nasi goreng", "2026-08-01 19:15:00", 520.0),
    ];
    let config = NutritionConfig::default();
    let first = aggregate_day(1, None, &entries, day("2026-08-01"), &config).unwrap();
    let second = aggregate_day(1, None, &entries, day("2026-08-01"), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn aggregation_uses_tdee_target_when_profile_present() {
    let profile = reference_profile(1);
    let view = aggregate_day(
        1,
        Some(&profile),
        &[],
        day("2026-08-01"),
        &NutritionConfig::default(),
    )
    .unwrap();
    assert_eq!(view.target_kcal, 2635);
    assert_eq!(view.remaining_kcal, 2635);
}

#[test]
fn bmi_reference_values() {
    let mut profile = reference_profile(1);
    profile.weight_kg = 68.5;
    let (bmi, category) = compute_bmi(&profile);
    assert!((bmi - 23.702_422).abs() < 1e-3, "got {bmi}");
    assert_eq!(category, Some(BmiCategory::Normal));

    profile.weight_kg = 85.0;
    let (bmi, category) = compute_bmi(&profile);
    assert!((bmi - 29.411_764).abs() < 1e-3, "got {bmi}");
    assert_eq!(category, Some(BmiCategory::Overweight));
}

#[test]
fn bmi_band_boundaries() {
    // 1m tall makes BMI equal to weight exactly
    let mut profile = reference_profile(1);
    profile.height_cm = 100.0;

    profile.weight_kg = 18.4;
    assert_eq!(compute_bmi(&profile).1, Some(BmiCategory::Underweight));
    profile.weight_kg = 18.5;
    assert_eq!(compute_bmi(&profile).1, Some(BmiCategory::Normal));
    profile.weight_kg = 25.0;
    assert_eq!(compute_bmi(&profile).1, Some(BmiCategory::Overweight));
    profile.weight_kg = 30.0;
    assert_eq!(compute_bmi(&profile).1, Some(BmiCategory::Obese));
}

#[test]
fn bmi_fails_soft_on_missing_measurements() {
    let mut profile = reference_profile(1);
    profile.height_cm = 0.0;
    assert_eq!(compute_bmi(&profile), (0.0, None));

    let mut profile = reference_profile(1);
    profile.weight_kg = 0.0;
    assert_eq!(compute_bmi(&profile), (0.0, None));
}
