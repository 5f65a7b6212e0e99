// ABOUTME: Shared test helpers: a scripted transport and profile/entry builders
// ABOUTME: Lets client tests run the full classification and retry paths without a network
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use nutrilog::client::{HttpTransport, TransportError, TransportRequest, TransportResponse};
use nutrilog::models::{ActivityLevel, LogStamp, MealLogEntry, Sex, UserProfile};

/// Transport that replays a scripted queue of outcomes and records every
/// request it sees.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a JSON response with the given status
    pub fn push_json(&self, status: u16, body: &str) {
        self.script.lock().unwrap().push_back(Ok(TransportResponse {
            status,
            content_type: Some("application/json; charset=utf-8".to_owned()),
            body: body.to_owned(),
        }));
    }

    /// Queue a plain-text response with the given status
    pub fn push_text(&self, status: u16, body: &str) {
        self.script.lock().unwrap().push_back(Ok(TransportResponse {
            status,
            content_type: Some("text/plain".to_owned()),
            body: body.to_owned(),
        }));
    }

    /// Queue a wire-level failure
    pub fn push_error(&self, error: TransportError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Number of requests executed so far
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Copies of every request executed so far, in order
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("script exhausted".to_owned())))
    }
}

/// The 25y / 170cm / 70kg male reference profile used across the formula tests
pub fn reference_profile(user_id: i64) -> UserProfile {
    UserProfile {
        id: user_id,
        sex: Sex::Male,
        age_years: 25,
        height_cm: 170.0,
        weight_kg: 70.0,
        activity: ActivityLevel::Moderate,
        portion_count: 3,
    }
}

/// A meal-log entry with the given stamp and calories, fixed neutral macros
pub fn entry(user_id: i64, id: i64, name: &str, stamp: &str, calories: f64) -> MealLogEntry {
    MealLogEntry {
        id,
        user_id,
        name: name.to_owned(),
        image: format!("upload/{id}.jpg"),
        calories,
        protein: 10.0,
        carbs: 30.0,
        fat: 5.0,
        stamp: stamp.parse::<LogStamp>().unwrap(),
    }
}
