// ABOUTME: Meal-log entry models, the civil LogStamp, and meal-time categories
// ABOUTME: Wire format mirrors the backend riwayat table; stamps accept three formats
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::timezone;

/// Civil timestamp of a meal-log entry.
///
/// The backend emits three shapes: RFC3339-ish with a `T` separator (possibly
/// with milliseconds and a trailing `Z`), `YYYY-MM-DD HH:MM:SS` as stored, and
/// bare `YYYY-MM-DD`. The zone suffix is ignored: the literal text is the
/// civil WIB wall-clock value by convention, never reinterpreted in another
/// zone. A date-only stamp has no time component and callers fall back to a
/// default hour when classifying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogStamp {
    /// Full civil date-time
    DateTime(NaiveDateTime),
    /// Date with no time-of-day information
    DateOnly(NaiveDate),
}

impl LogStamp {
    /// Date portion, used for day filtering
    #[must_use]
    pub fn date(self) -> NaiveDate {
        match self {
            Self::DateTime(dt) => dt.date(),
            Self::DateOnly(d) => d,
        }
    }

    /// Time portion, if the stamp carries one
    #[must_use]
    pub fn time(self) -> Option<NaiveTime> {
        match self {
            Self::DateTime(dt) => Some(dt.time()),
            Self::DateOnly(_) => None,
        }
    }

    /// Hour of day (0-23), or `default` when the stamp has no time component
    #[must_use]
    pub fn hour_or(self, default: u32) -> u32 {
        match self {
            Self::DateTime(dt) => dt.hour(),
            Self::DateOnly(_) => default,
        }
    }
}

impl FromStr for LogStamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().trim_end_matches('Z');
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self::DateTime(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
            return Ok(Self::DateTime(dt));
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d").map(Self::DateOnly)
    }
}

impl TryFrom<String> for LogStamp {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LogStamp> for String {
    fn from(stamp: LogStamp) -> Self {
        stamp.to_string()
    }
}

impl fmt::Display for LogStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::DateOnly(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Meal-time category derived from the entry's hour of day
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum MealCategory {
    /// 05:00-09:59
    Breakfast,
    /// 10:00-14:59
    Lunch,
    /// 15:00-17:59
    Snack,
    /// 18:00-21:59
    Dinner,
    /// Everything else (late night / early morning)
    Beverage,
}

impl MealCategory {
    /// All categories, in bucket order
    pub const ALL: [Self; 5] = [
        Self::Breakfast,
        Self::Lunch,
        Self::Snack,
        Self::Dinner,
        Self::Beverage,
    ];
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Snack => "snack",
            Self::Dinner => "dinner",
            Self::Beverage => "beverage",
        };
        f.write_str(label)
    }
}

/// A stored meal-log row from the backend `riwayat` table.
///
/// Macro quantities are non-negative by backend validation; the aggregator
/// still floors them at zero defensively when summing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealLogEntry {
    /// Opaque entry identifier
    pub id: i64,
    /// Owning user identifier
    pub user_id: i64,
    /// Food name from the classifier
    pub name: String,
    /// Opaque image reference, never interpreted
    pub image: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Civil WIB timestamp
    #[serde(rename = "tanggal")]
    pub stamp: LogStamp,
}

/// A meal-log entry about to be persisted via `POST /api/riwayat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMealLogEntry {
    /// Owning user identifier
    pub user_id: i64,
    /// Opaque image reference
    pub image: String,
    /// Food name
    pub name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Optional civil timestamp; filled at write time when absent
    #[serde(rename = "tanggal", skip_serializing_if = "Option::is_none")]
    pub stamp: Option<LogStamp>,
}

impl NewMealLogEntry {
    /// Check required fields and macro invariants before any network I/O.
    ///
    /// Mirrors the backend's own validation so obviously-bad requests fail
    /// locally with [`ClientError::Validation`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a non-positive user id, empty
    /// name or image, or a negative macro quantity.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.user_id <= 0 {
            return Err(ClientError::validation("user_id must be positive"));
        }
        if self.name.trim().is_empty() {
            return Err(ClientError::validation("name must not be empty"));
        }
        if self.image.trim().is_empty() {
            return Err(ClientError::validation("image must not be empty"));
        }
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ClientError::validation(format!(
                    "{field} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }

    /// Apply the write-time stamping rule.
    ///
    /// A missing stamp becomes `now` (current civil WIB date-time); a
    /// date-only stamp keeps its date and gains the current wall-clock time,
    /// exactly as the backend would fill it. A full date-time passes through.
    #[must_use]
    pub fn stamped_for_write(mut self, now: NaiveDateTime) -> Self {
        self.stamp = Some(match self.stamp {
            None => LogStamp::DateTime(now),
            Some(LogStamp::DateOnly(d)) => LogStamp::DateTime(d.and_time(now.time())),
            Some(full @ LogStamp::DateTime(_)) => full,
        });
        self
    }

    /// Convenience wrapper stamping with the current WIB clock
    #[must_use]
    pub fn stamped_now(self) -> Self {
        self.stamped_for_write(timezone::now_wib())
    }
}

/// Receipt returned by the backend after persisting a meal-log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Identifier of the stored row
    #[serde(rename = "id_riwayat")]
    pub id: i64,
    /// Timestamp the backend actually stored
    #[serde(rename = "tanggal_tersimpan")]
    pub stored_at: LogStamp,
}
