use axum::Json;
use chrono::{Days, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::instrument;

const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    date: NaiveDate,
    temperature_c: i32,
    temperature_f: i32,
    summary: &'static str,
}

impl WeatherForecast {
    fn new(date: NaiveDate, temperature_c: i32, summary: &'static str) -> Self {
        WeatherForecast {
            date,
            temperature_c,
            temperature_f: 32 + (temperature_c as f64 / 0.5556) as i32,
            summary,
        }
    }
}

/// Demo forecast stub for the next five days, drawn fresh on every call.
#[instrument(skip_all)]
pub async fn weather_forecast() -> Json<Vec<WeatherForecast>> {
    Json(forecasts(Utc::now().date_naive()))
}

fn forecasts(today: NaiveDate) -> Vec<WeatherForecast> {
    let mut rng = rand::rng();

    (1..=5)
        .filter_map(|day| today.checked_add_days(Days::new(day)))
        .map(|date| {
            let temperature_c = rng.random_range(-20..55);
            WeatherForecast::new(date, temperature_c, SUMMARIES[rng.random_range(0..SUMMARIES.len())])
        })
        .collect()
}
