use chrono::{Days, NaiveDate};

use crate::args::DATE_TOKEN_FORMAT;

/// Returns `days` consecutive calendar days starting at `start`, formatted as
/// `YYYYMMDD`. Stops early if the calendar runs out.
#[must_use]
pub fn date_tokens(start: NaiveDate, days: u64) -> Vec<String> {
    let capacity = usize::try_from(days).unwrap_or(usize::MAX).min(MAX_PREALLOCATED_DAYS);
    let mut tokens = Vec::with_capacity(capacity);
    let mut current = Some(start);
    for _ in 0..days {
        let Some(day) = current else {
            break;
        };
        tokens.push(day.format(DATE_TOKEN_FORMAT).to_string());
        current = day.checked_add_days(Days::new(1));
    }
    tokens
}

const MAX_PREALLOCATED_DAYS: usize = 4_096;
