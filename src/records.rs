use crate::models::{Candidate, Record};
use chrono::NaiveDate;
use thiserror::Error;

/// The one rule the form itself cannot enforce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("coins after ({after}) cannot be lower than coins before ({before})")]
pub struct ValidationError {
    pub before: u64,
    pub after: u64,
}

/// Turns a submitted candidate into a full record, deriving `coins_earned`
/// and filling the optional fields. Nothing is persisted here.
pub fn build_record(
    candidate: Candidate,
    fallback_date: NaiveDate,
) -> Result<Record, ValidationError> {
    if candidate.coins_after < candidate.coins_before {
        return Err(ValidationError {
            before: candidate.coins_before,
            after: candidate.coins_after,
        });
    }

    Ok(Record {
        date: candidate.date.unwrap_or(fallback_date),
        coins_before: candidate.coins_before,
        coins_after: candidate.coins_after,
        coins_earned: candidate.coins_after - candidate.coins_before,
        play_count: candidate.play_count,
        tsum_used: candidate.tsum_used,
        memo: candidate.memo,
    })
}
