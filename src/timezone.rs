// ABOUTME: Fixed UTC+7 (WIB) civil clock used for stamping and date filtering
// ABOUTME: Keeps all timestamps in the backend's wall-clock convention
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Civil date-time helpers pinned to UTC+7.
//!
//! The backend stamps meal-log rows with Indonesian wall-clock time (WIB,
//! UTC+7) and the daily view filters on the date portion in that same zone.
//! Every "now" in this crate goes through these helpers so that stamping and
//! filtering can never disagree about which day it is.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

/// WIB offset from UTC, in seconds (UTC+7)
pub const WIB_OFFSET_SECS: i32 = 7 * 3600;

/// The fixed WIB timezone offset
#[must_use]
pub fn wib() -> FixedOffset {
    // 7h east is always a valid offset
    FixedOffset::east_opt(WIB_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current civil date-time in WIB
#[must_use]
pub fn now_wib() -> NaiveDateTime {
    Utc::now().with_timezone(&wib()).naive_local()
}

/// Current civil date in WIB
#[must_use]
pub fn today_wib() -> NaiveDate {
    now_wib().date()
}
