use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged play session. Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub coins_before: u64,
    pub coins_after: u64,
    pub coins_earned: u64,
    pub play_count: u64,
    pub tsum_used: String,
    pub memo: String,
}

/// A submitted record before validation. `date` falls back to today when
/// absent; optional fields default to 0/empty.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub coins_before: u64,
    pub coins_after: u64,
    #[serde(default)]
    pub play_count: u64,
    #[serde(default)]
    pub tsum_used: String,
    #[serde(default)]
    pub memo: String,
}

/// The sidebar form as posted by a browser without JavaScript. Everything
/// arrives as text; empty optional fields are empty strings.
#[derive(Debug, Deserialize)]
pub struct RecordForm {
    pub date: String,
    pub coins_before: String,
    pub coins_after: String,
    #[serde(default)]
    pub play_count: String,
    #[serde(default)]
    pub tsum_used: String,
    #[serde(default)]
    pub memo: String,
}

impl RecordForm {
    pub fn into_candidate(self) -> Result<Candidate, String> {
        let date = match self.date.trim() {
            "" => None,
            raw => Some(
                raw.parse::<NaiveDate>()
                    .map_err(|_| format!("invalid date: {raw}"))?,
            ),
        };
        let coins_before = parse_count("coins_before", &self.coins_before)?;
        let coins_after = parse_count("coins_after", &self.coins_after)?;
        let play_count = match self.play_count.trim() {
            "" => 0,
            raw => parse_count("play_count", raw)?,
        };

        Ok(Candidate {
            date,
            coins_before,
            coins_after,
            play_count,
            tsum_used: self.tsum_used.trim().to_string(),
            memo: self.memo.trim().to_string(),
        })
    }
}

fn parse_count(field: &str, raw: &str) -> Result<u64, String> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| format!("{field} must be a non-negative integer"))
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub coins_earned: u64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub coins_earned: u64,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub total_earned: u64,
    pub daily: Vec<DailyPoint>,
    pub monthly: Vec<MonthlyPoint>,
    pub records: Vec<Record>,
}
