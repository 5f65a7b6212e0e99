// ABOUTME: Command-line front end for the nutrilog client and aggregator
// ABOUTME: Fetches profiles and meal logs from the backend and prints derived views
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily-nutrition CLI.
//!
//! Usage:
//! ```bash
//! # Today's aggregated view for user 3
//! cargo run --bin nutrilog -- daily --user-id 3
//!
//! # A specific civil date
//! cargo run --bin nutrilog -- daily --user-id 3 --date 2026-08-01
//!
//! # Raw meal-log history, newest first
//! cargo run --bin nutrilog -- history --user-id 3
//!
//! # Log a meal
//! cargo run --bin nutrilog -- log --user-id 3 --name "Nasi goreng" \
//!     --image upload/nasi.jpg --calories 520 --protein 14 --carbs 68 --fat 18
//!
//! # Backend liveness probe
//! cargo run --bin nutrilog -- health
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nutrilog::aggregator::{aggregate_day, compute_bmi};
use nutrilog::client::ApiClient;
use nutrilog::config::{ApiConfig, NutritionConfig};
use nutrilog::errors::ClientError;
use nutrilog::models::{LogStamp, NewMealLogEntry, UserProfile};
use nutrilog::timezone;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "nutrilog",
    about = "Daily-nutrition aggregation over the food-logging backend",
    version
)]
struct NutrilogArgs {
    #[command(subcommand)]
    command: NutrilogCommand,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum NutrilogCommand {
    /// Fetch a user's profile and meal log, then print the daily view
    Daily {
        /// User identifier
        #[arg(long)]
        user_id: i64,

        /// Civil WIB date (YYYY-MM-DD), defaulting to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print a user's full meal-log history, newest first
    History {
        /// User identifier
        #[arg(long)]
        user_id: i64,
    },

    /// Persist a new meal-log entry
    Log {
        /// User identifier
        #[arg(long)]
        user_id: i64,

        /// Food name
        #[arg(long)]
        name: String,

        /// Image reference
        #[arg(long)]
        image: String,

        /// Energy in kcal
        #[arg(long)]
        calories: f64,

        /// Protein in grams
        #[arg(long, default_value = "0")]
        protein: f64,

        /// Carbohydrates in grams
        #[arg(long, default_value = "0")]
        carbs: f64,

        /// Fat in grams
        #[arg(long, default_value = "0")]
        fat: f64,

        /// Civil timestamp override; stamped with the current WIB clock when
        /// omitted
        #[arg(long)]
        stamp: Option<LogStamp>,
    },

    /// Probe backend liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = NutrilogArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let client = ApiClient::new(ApiConfig::from_env());

    match args.command {
        NutrilogCommand::Daily { user_id, date } => daily(&client, user_id, date).await,
        NutrilogCommand::History { user_id } => history(&client, user_id).await,
        NutrilogCommand::Log {
            user_id,
            name,
            image,
            calories,
            protein,
            carbs,
            fat,
            stamp,
        } => {
            log_meal(
                &client,
                NewMealLogEntry {
                    user_id,
                    image,
                    name,
                    calories,
                    protein,
                    carbs,
                    fat,
                    stamp,
                },
            )
            .await
        }
        NutrilogCommand::Health => health(&client).await,
    }
}

async fn daily(client: &ApiClient, user_id: i64, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(timezone::today_wib);

    // Profile and meal log are independent reads
    let (profile, entries) = tokio::join!(client.get_user(user_id), client.fetch_meal_log(user_id));

    let profile = match profile {
        Ok(profile) => Some(profile),
        Err(ClientError::NotFound { .. }) => {
            warn!(user_id, "no stored profile, using the neutral calorie target");
            None
        }
        Err(error) => return Err(error).context("failed to fetch user profile"),
    };
    let entries = entries.context("failed to fetch meal log")?;

    let config = NutritionConfig::default();
    let view = aggregate_day(user_id, profile.as_ref(), &entries, date, &config)
        .context("failed to aggregate the daily view")?;

    println!("{}", serde_json::to_string_pretty(&view)?);
    if let Some(profile) = &profile {
        print_bmi(profile);
    }
    Ok(())
}

async fn history(client: &ApiClient, user_id: i64) -> Result<()> {
    let entries = client
        .fetch_meal_log(user_id)
        .await
        .context("failed to fetch meal log")?;
    info!(user_id, entries = entries.len(), "fetched meal-log history");
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

async fn log_meal(client: &ApiClient, entry: NewMealLogEntry) -> Result<()> {
    let receipt = client
        .save_meal_log(entry)
        .await
        .context("failed to save meal-log entry")?;
    info!(id = receipt.id, stored_at = %receipt.stored_at, "meal-log entry saved");
    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}

async fn health(client: &ApiClient) -> Result<()> {
    if client.health_check().await {
        println!("backend is up");
        Ok(())
    } else {
        anyhow::bail!("backend is unreachable")
    }
}

fn print_bmi(profile: &UserProfile) {
    let (bmi, category) = compute_bmi(profile);
    match category {
        Some(category) => println!("BMI: {bmi:.1} ({category:?})"),
        None => println!("BMI: unavailable (missing measurements)"),
    }
}
