// ABOUTME: Wire and domain data models for profiles, meal logs, and derived views
// ABOUTME: Re-exports the profile, meal, and view types
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data models.
//!
//! `UserProfile` and `MealLogEntry` mirror backend rows (the wire keeps the
//! backend's Indonesian column names via serde renames); `DailyNutritionView`
//! is derived state with no persistence of its own.

mod meal;
mod profile;
mod view;

pub use meal::{LogStamp, MealCategory, MealLogEntry, NewMealLogEntry, SaveReceipt};
pub use profile::{ActivityLevel, DisplayProfile, Sex, UserProfile};
pub use view::{DailyNutritionView, ViewItem};
