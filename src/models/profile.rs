// ABOUTME: User anthropometric profile and its enumerations (sex, activity level)
// ABOUTME: Wire format mirrors the backend users/profil tables with Indonesian column names
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::errors::NutritionError;

/// Biological sex used by the BMR formula.
///
/// The wire values are the backend's form values; anything else fails
/// deserialization, which is the intended strict boundary for user input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sex {
    /// Male (higher BMR constant)
    #[serde(rename = "Laki-laki")]
    Male,
    /// Female (lower BMR constant)
    #[serde(rename = "Perempuan")]
    Female,
}

/// Self-reported activity level for the TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    /// Little or no exercise (1.375)
    Light,
    /// Light exercise a few days a week (1.55)
    Moderate,
    /// Frequent or intense exercise (1.725)
    Heavy,
}

impl ActivityLevel {
    /// Parse an activity string, falling back to `Moderate` when the value is
    /// unrecognized.
    ///
    /// This matches the backend's graceful default (factor 1.55) and is what
    /// profile reads use. Input-accepting boundaries should use
    /// [`ActivityLevel::parse_strict`] instead.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        Self::parse_strict(s).unwrap_or(Self::Moderate)
    }

    /// Parse an activity string, returning `None` for unrecognized values
    #[must_use]
    pub fn parse_strict(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ringan" | "light" => Some(Self::Light),
            "sedang" | "moderate" => Some(Self::Moderate),
            "berat" | "heavy" => Some(Self::Heavy),
            _ => None,
        }
    }

    /// Wire value stored by the backend
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Light => "ringan",
            Self::Moderate => "sedang",
            Self::Heavy => "berat",
        }
    }
}

mod activity_wire {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ActivityLevel;

    pub fn serialize<S: Serializer>(level: &ActivityLevel, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(level.wire_name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ActivityLevel, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(ActivityLevel::from_str_lossy(&raw))
    }
}

/// Anthropometric profile of a user, as stored in the backend `users` table.
///
/// All numeric fields must be positive for BMR/TDEE computation; see
/// [`UserProfile::validate`]. The aggregator tolerates an absent profile (a
/// neutral 2000 kcal target), but never an invalid one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Opaque user identifier
    #[serde(rename = "user_id")]
    pub id: i64,
    /// Biological sex
    #[serde(rename = "jenis_kelamin")]
    pub sex: Sex,
    /// Age in years
    #[serde(rename = "usia")]
    pub age_years: u32,
    /// Height in centimeters
    #[serde(rename = "tinggi_badan")]
    pub height_cm: f64,
    /// Weight in kilograms
    #[serde(rename = "berat_badan")]
    pub weight_kg: f64,
    /// Activity level; unrecognized wire values fall back to moderate
    #[serde(rename = "aktivitas", with = "activity_wire")]
    pub activity: ActivityLevel,
    /// Meals per day, 1-10 as allowed by the profile form
    #[serde(rename = "porsi_makan")]
    pub portion_count: u8,
}

impl UserProfile {
    /// Check the BMR/TDEE preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`NutritionError::InvalidProfile`] if age, height, or weight is
    /// non-positive, or the portion count is outside 1-10.
    pub fn validate(&self) -> Result<(), NutritionError> {
        if self.age_years == 0 {
            return Err(NutritionError::InvalidProfile(
                "age must be positive".to_owned(),
            ));
        }
        if self.height_cm <= 0.0 {
            return Err(NutritionError::InvalidProfile(
                "height must be positive".to_owned(),
            ));
        }
        if self.weight_kg <= 0.0 {
            return Err(NutritionError::InvalidProfile(
                "weight must be positive".to_owned(),
            ));
        }
        if !(1..=10).contains(&self.portion_count) {
            return Err(NutritionError::InvalidProfile(
                "portion count must be between 1 and 10".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Display profile (name + photo) from the backend `profil` table.
///
/// The photo is an opaque payload (base64 text in the source) and is never
/// interpreted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayProfile {
    /// Owning user identifier
    pub user_id: i64,
    /// Display name
    #[serde(rename = "nama")]
    pub name: String,
    /// Opaque photo payload
    #[serde(rename = "foto")]
    pub photo: String,
}
