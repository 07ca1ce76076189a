use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{DecodeError, MappingError};

pub const UNKNOWN: &str = "Unknown";
pub const EPOCH_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

pub const RANK_STAT: &str = "rank";
pub const CHAMPIONSHIP_POINTS_STAT: &str = "championshipPts";
pub const POINTS_STAT: &str = "points";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub athlete: Athlete,
    pub stats: Vec<Stat>,
    pub team: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: String,
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
    pub flag: Option<Flag>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Flag {
    pub alt: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    pub name: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub value: Value,
    pub location: Option<String>,
    #[serde(rename = "race_date")]
    pub race_date: Option<String>,
}

impl Stat {
    /// Numeric value of the stat; exports carry either numbers or numeric strings.
    ///
    /// Numbers pass through as written, so `575` stays an integer on the wire.
    pub fn number(&self) -> Option<Number> {
        match &self.value {
            Value::Number(n) => Some(n.clone()),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .map(Number::from)
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
            }
            _ => None,
        }
    }

    /// The value as a whole number that fits in an `i64`.
    pub fn whole_number(&self) -> Option<i64> {
        let number = self.number()?;
        if let Some(value) = number.as_i64() {
            return Some(value);
        }
        let value = number.as_f64()?;
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
        (value.fract() == 0.0 && in_range).then_some(value as i64)
    }
}

impl Entry {
    pub fn stat(&self, name: &str) -> Option<&Stat> {
        self.stats.iter().find(|stat| stat.name == name)
    }

    fn required_stat(&self, name: &str) -> Result<&Stat, MappingError> {
        self.stat(name)
            .ok_or_else(|| MappingError::MissingStat(name.to_string()))
    }

    fn team_or_unknown(&self) -> String {
        self.team.clone().unwrap_or_else(|| UNKNOWN.to_string())
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DriverRecord {
    pub driver_id: String,
    pub driver_name: String,
    pub abbreviation: String,
    pub nationality: String,
    pub href: String,
    pub team: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RaceRecord {
    pub race_id: String,
    pub race_name: String,
    pub race_date: String,
    pub location: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StandingRecord {
    pub race_id: String,
    pub race_name: String,
    pub race_date: String,
    pub driver_id: String,
    pub driver_name: String,
    pub team: String,
    pub position: i64,
    pub points: Number,
}

/// Decodes raw entries into [`Entry`], stopping at the first one that does not fit.
pub fn decode_entries(entries: Vec<Value>) -> Result<Vec<Entry>, DecodeError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).map_err(|source| DecodeError { index, source })
        })
        .collect()
}

pub fn driver_record(entry: &Entry) -> Result<DriverRecord, MappingError> {
    let athlete = &entry.athlete;
    let flag = athlete
        .flag
        .as_ref()
        .ok_or(MappingError::MissingField("athlete.flag"))?;

    Ok(DriverRecord {
        driver_id: athlete.id.clone(),
        driver_name: required(&athlete.display_name, "athlete.displayName")?,
        abbreviation: required(&athlete.abbreviation, "athlete.abbreviation")?,
        nationality: required(&flag.alt, "athlete.flag.alt")?,
        href: required(&flag.href, "athlete.flag.href")?,
        team: entry.team_or_unknown(),
    })
}

/// Builds a race row from a stat.
///
/// The export has no race schedule, so every stat other than rank and
/// championship points is stored as a "race" keyed by the stat name.
pub fn race_record(stat: &Stat) -> Result<RaceRecord, MappingError> {
    Ok(RaceRecord {
        race_id: stat.name.clone(),
        race_name: required(&stat.display_name, "displayName")?,
        race_date: normalize_race_date(stat.race_date.as_deref()),
        location: stat.location.clone().unwrap_or_else(|| UNKNOWN.to_string()),
    })
}

/// Builds a standings row from an entry.
///
/// `race_id` is the name of the first stat and `race_name` the rank stat's
/// display name; neither points at a row produced by [`race_record`].
pub fn standing_record(entry: &Entry) -> Result<StandingRecord, MappingError> {
    let first = entry
        .stats
        .first()
        .ok_or(MappingError::MissingField("stats[0]"))?;
    let rank = entry.required_stat(RANK_STAT)?;
    let position = rank
        .whole_number()
        .ok_or_else(|| MappingError::NonNumericStat(RANK_STAT.to_string()))?;
    let points_stat = entry
        .stat(CHAMPIONSHIP_POINTS_STAT)
        .map_or_else(|| entry.required_stat(POINTS_STAT), Ok)?;
    let points = points_stat
        .number()
        .ok_or_else(|| MappingError::NonNumericStat(points_stat.name.clone()))?;

    Ok(StandingRecord {
        race_id: first.name.clone(),
        race_name: rank
            .display_name
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        race_date: EPOCH_TIMESTAMP.to_string(),
        driver_id: entry.athlete.id.clone(),
        driver_name: required(&entry.athlete.display_name, "athlete.displayName")?,
        team: entry.team_or_unknown(),
        position,
        points,
    })
}

/// Turns a race date into a full UTC timestamp.
///
/// Plain dates get midnight UTC appended; absent, `"Unknown"` or unreadable
/// dates fall back to the epoch.
pub fn normalize_race_date(date: Option<&str>) -> String {
    let date = match date.map(str::trim) {
        None | Some("") | Some(UNKNOWN) => return EPOCH_TIMESTAMP.to_string(),
        Some(date) => date,
    };

    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| EPOCH_TIMESTAMP.to_string());
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(date) {
        return timestamp
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true);
    }

    warn!("Unrecognized race date {:?}, using {}", date, EPOCH_TIMESTAMP);
    EPOCH_TIMESTAMP.to_string()
}

fn required(field: &Option<String>, path: &'static str) -> Result<String, MappingError> {
    field.clone().ok_or(MappingError::MissingField(path))
}
