//! Prints one week of a clinician's slots as laid out by their availability rules.
//!
//! Usage: `slot-preview <clinician-id> [YYYY-MM-DD] [--resolved]`
//!
//! With `--resolved` the week shows slot statuses from the booking system
//! instead of a rule-only preview.

use std::{env, sync::Arc};

use chrono::{Local, NaiveDate};
use clinicslots_api::config::parse_log_level;
use clinicslots_client::{config::ClientConfig, load_week, preview_week, ApiClient};
use clinicslots_core::{
    calendar::WeekView,
    session::{MemoryTokenStorage, Session},
    time::format_time_range,
};
use color_eyre::eyre::{eyre, Result, WrapErr};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

fn print_week(view: &WeekView) -> Result<()> {
    println!("Week of {}", view.start);
    for day in &view.days {
        println!(
            "\n{} ({} of {} open)",
            day.date.format("%A %Y-%m-%d"),
            day.availability.available_count,
            day.slots.len()
        );
        for slot in &day.slots {
            println!(
                "  {:<22} {:<9} {}",
                format_time_range(&slot.start_time, &slot.end_time)?,
                slot.status.as_str(),
                slot.mode.as_str()
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Initialize logging
    let level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args: Vec<String> = env::args().skip(1).collect();
    let resolved = args.iter().any(|arg| arg == "--resolved");
    let mut positional = args.iter().filter(|arg| !arg.starts_with("--"));

    let clinician_id = positional
        .next()
        .ok_or_else(|| eyre!("usage: slot-preview <clinician-id> [YYYY-MM-DD] [--resolved]"))?
        .parse::<Uuid>()
        .wrap_err("clinician id must be a UUID")?;
    let anchor = match positional.next() {
        Some(raw) => {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").wrap_err("date must be YYYY-MM-DD")?
        }
        None => Local::now().date_naive(),
    };

    let config = ClientConfig::from_env()?;
    let session = Arc::new(Session::new(MemoryTokenStorage::new()));
    let client = ApiClient::new(&config, session)?;

    if let (Ok(email), Ok(password)) = (env::var("STAFF_EMAIL"), env::var("STAFF_PASSWORD")) {
        client.sign_in(&email, &password).await?;
    }

    info!("Loading week of {} for clinician {}", anchor, clinician_id);
    let view = if resolved {
        load_week(&client, clinician_id, anchor).await?
    } else {
        preview_week(&client, clinician_id, anchor).await?
    };

    print_week(&view)
}
