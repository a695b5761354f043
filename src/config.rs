use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Weekday;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub api_prefix: String,
    pub db_max_connections: u32,
    pub log_dir: String,

    // Rate limiting
    pub rate_reports_per_min: u32,
    pub rate_tracking_per_min: u32,

    // Analytics
    pub weekly_off_days: Vec<Weekday>,
    pub report_concurrency: usize,
    pub holiday_cache_ttl: Duration,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key}={raw:?} is invalid: {e}")),
        Err(_) => Ok(default),
    }
}

/// Parses a comma-separated weekday list such as `Sat,Sun` or `friday, saturday`.
pub fn parse_weekly_off(raw: &str) -> Result<Vec<Weekday>> {
    let mut days = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day: Weekday = part
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown weekday '{part}'"))?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if days.len() == 7 {
        bail!("every day of the week cannot be a weekly-off day");
    }
    Ok(days)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let weekly_off_days = parse_weekly_off(
            &env::var("WEEKLY_OFF_DAYS").unwrap_or_else(|_| "Sat,Sun".to_string()),
        )
        .context("WEEKLY_OFF_DAYS")?;

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            db_max_connections: or_default("DB_MAX_CONNECTIONS", 10)?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),

            rate_reports_per_min: or_default("RATE_REPORTS_PER_MIN", 120)?,
            rate_tracking_per_min: or_default("RATE_TRACKING_PER_MIN", 600)?,

            weekly_off_days,
            report_concurrency: or_default("REPORT_CONCURRENCY", 8)?,
            holiday_cache_ttl: Duration::from_secs(or_default("HOLIDAY_CACHE_TTL_SECS", 3600)?),
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "mysql://localhost/test".to_string(),
            jwt_secret: "test-secret".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            api_prefix: "/api".to_string(),
            db_max_connections: 1,
            log_dir: "logs".to_string(),
            rate_reports_per_min: 1000,
            rate_tracking_per_min: 1000,
            weekly_off_days: vec![Weekday::Sat, Weekday::Sun],
            report_concurrency: 2,
            holiday_cache_ttl: Duration::from_secs(60),
        }
    }
}
