use crate::models::{DailyPoint, Dashboard, MonthlyPoint, Record};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Aggregates the full record list for the main panel: total earned,
/// per-day and per-month sums (ascending), and the table rows sorted by
/// date descending. The sort is stable, so same-day rows keep their
/// insertion order.
pub fn build_dashboard(records: &[Record]) -> Dashboard {
    let mut total_earned = 0u64;
    let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut monthly: BTreeMap<String, u64> = BTreeMap::new();

    for record in records {
        total_earned = total_earned.saturating_add(record.coins_earned);

        let day = daily.entry(record.date).or_default();
        *day = day.saturating_add(record.coins_earned);

        let month = monthly.entry(month_key(record.date)).or_default();
        *month = month.saturating_add(record.coins_earned);
    }

    let mut table = records.to_vec();
    table.sort_by(|a, b| b.date.cmp(&a.date));

    Dashboard {
        total_earned,
        daily: daily
            .into_iter()
            .map(|(date, coins_earned)| DailyPoint { date, coins_earned })
            .collect(),
        monthly: monthly
            .into_iter()
            .map(|(month, coins_earned)| MonthlyPoint {
                month,
                coins_earned,
            })
            .collect(),
        records: table,
    }
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
