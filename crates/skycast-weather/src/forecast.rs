//! Placeholder forecast synthesis.
//!
//! The API call only returns current conditions, so the hourly and daily
//! lists are generated from that single reading: condition text is sampled
//! from fixed pools and temperatures follow a fixed offset pattern. None of
//! it is a real prediction. Rows are always rendered in Celsius; only the
//! current-conditions line follows the unit preference.

use chrono::{Duration, NaiveDateTime};
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::types::{ForecastEntry, TemperatureUnit, WeatherSnapshot};

pub const HOURLY_ENTRIES: usize = 24;
pub const DAILY_ENTRIES: usize = 7;

const NIGHT: &[&str] = &[
    "Clear Night",
    "Partly Cloudy Night",
    "Overcast Night",
    "Rainy Night",
    "Snowfall Night",
    "Windy Night",
];

const MORNING: &[&str] = &[
    "Clear Morning",
    "Foggy Morning",
    "Partly Cloudy Morning",
    "Rainy Morning",
];

const DAY: &[&str] = &["Sunny", "Partly Cloudy", "Cloudy", "Rainy", "Snowfall", "Windy"];

const EVENING: &[&str] = &[
    "Clear Evening",
    "Partly Cloudy Evening",
    "Overcast Evening",
    "Rainy Evening",
    "Windy Evening",
];

const DAILY: &[&str] = &[
    "Sunny",
    "Partly Cloudy",
    "Cloudy",
    "Overcast",
    "Rainy",
    "Snowfall",
    "Windy",
];

/// Which forecast list is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForecastTab {
    #[default]
    Hours,
    Days,
}

/// Description pool for the entry at `index`. Buckets follow the entry
/// index, not the wall-clock hour of its label.
fn hourly_pool(index: usize) -> &'static [&'static str] {
    match index {
        0..=8 => NIGHT,
        9..=11 => MORNING,
        12..=17 => DAY,
        _ => EVENING,
    }
}

fn pick<R: RngCore + ?Sized>(pool: &[&str], rng: &mut R) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

/// 24 hourly entries starting at the hour of `start`.
///
/// Entry `i` is `base + (i mod 5)` degrees Celsius.
pub fn synthesize_hourly<R: RngCore + ?Sized>(
    snapshot: &WeatherSnapshot,
    start: NaiveDateTime,
    rng: &mut R,
) -> Vec<ForecastEntry> {
    (0..HOURLY_ENTRIES)
        .map(|i| {
            let at = start + Duration::hours(i as i64);
            ForecastEntry {
                label: at.format("%H:00").to_string(),
                condition_text: pick(hourly_pool(i), rng),
                temperature_display: celsius(snapshot.temperature_celsius + (i % 5) as f64),
            }
        })
        .collect()
}

/// 7 daily entries, one per calendar day starting with the date of `start`.
///
/// Entry `i` is `base + (i mod 10)` degrees Celsius.
pub fn synthesize_daily<R: RngCore + ?Sized>(
    snapshot: &WeatherSnapshot,
    start: NaiveDateTime,
    rng: &mut R,
) -> Vec<ForecastEntry> {
    let today = start.date();
    (0..DAILY_ENTRIES)
        .map(|i| {
            let day = today + Duration::days(i as i64);
            ForecastEntry {
                label: day.format("%a, %d %b").to_string(),
                condition_text: pick(DAILY, rng),
                temperature_display: celsius(snapshot.temperature_celsius + (i % 10) as f64),
            }
        })
        .collect()
}

fn celsius(value: f64) -> String {
    TemperatureUnit::Celsius.format(value)
}

/// Generate the list for `tab`
pub fn synthesize<R: RngCore + ?Sized>(
    tab: ForecastTab,
    snapshot: &WeatherSnapshot,
    start: NaiveDateTime,
    rng: &mut R,
) -> Vec<ForecastEntry> {
    match tab {
        ForecastTab::Hours => synthesize_hourly(snapshot, start, rng),
        ForecastTab::Days => synthesize_daily(snapshot, start, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snapshot(temp: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: "Aqtobe".into(),
            region: "Aqtobe".into(),
            country: "Kazakhstan".into(),
            latitude: 50.28,
            longitude: 57.17,
            temperature_celsius: temp,
            condition_text: "Sunny".into(),
            condition_icon: String::new(),
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(22, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_hourly_count_and_temperatures() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..3 {
            let entries = synthesize_hourly(&snapshot(20.0), start(), &mut rng);
            assert_eq!(entries.len(), HOURLY_ENTRIES);
            for (i, e) in entries.iter().enumerate() {
                assert_eq!(e.temperature_display, format!("{:.1}°C", 20.0 + (i % 5) as f64));
            }
        }
    }

    #[test]
    fn test_hourly_labels_wrap_midnight() {
        let mut rng = StdRng::seed_from_u64(1);
        let entries = synthesize_hourly(&snapshot(0.0), start(), &mut rng);
        assert_eq!(entries[0].label, "22:00");
        assert_eq!(entries[1].label, "23:00");
        assert_eq!(entries[2].label, "00:00");
        assert_eq!(entries[23].label, "21:00");
    }

    #[test]
    fn test_hourly_conditions_come_from_index_bucket() {
        let mut rng = StdRng::seed_from_u64(42);
        let entries = synthesize_hourly(&snapshot(5.0), start(), &mut rng);
        for (i, e) in entries.iter().enumerate() {
            assert!(
                hourly_pool(i).contains(&e.condition_text.as_str()),
                "entry {} has {:?}",
                i,
                e.condition_text
            );
        }
        assert!(NIGHT.contains(&entries[8].condition_text.as_str()));
        assert!(MORNING.contains(&entries[9].condition_text.as_str()));
        assert!(DAY.contains(&entries[17].condition_text.as_str()));
        assert!(EVENING.contains(&entries[18].condition_text.as_str()));
    }

    #[test]
    fn test_daily_count_labels_and_temperatures() {
        let mut rng = StdRng::seed_from_u64(3);
        let entries = synthesize_daily(&snapshot(-2.5), start(), &mut rng);
        assert_eq!(entries.len(), DAILY_ENTRIES);
        assert_eq!(entries[0].label, "Mon, 05 Jan");
        assert_eq!(entries[6].label, "Sun, 11 Jan");
        for (i, e) in entries.iter().enumerate() {
            assert_eq!(e.temperature_display, format!("{:.1}°C", -2.5 + (i % 10) as f64));
            assert!(DAILY.contains(&e.condition_text.as_str()));
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let a = synthesize_hourly(&snapshot(10.0), start(), &mut StdRng::seed_from_u64(99));
        let b = synthesize_hourly(&snapshot(10.0), start(), &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_synthesize_dispatches_on_tab() {
        let mut rng = StdRng::seed_from_u64(0);
        let snap = snapshot(1.0);
        assert_eq!(synthesize(ForecastTab::Hours, &snap, start(), &mut rng).len(), 24);
        assert_eq!(synthesize(ForecastTab::Days, &snap, start(), &mut rng).len(), 7);
    }
}
