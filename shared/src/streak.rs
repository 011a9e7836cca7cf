//! Check-in streaks
//!
//! A streak is a run of consecutive calendar days with a health record. The
//! current streak stays alive until the end of today: a cat checked in
//! yesterday but not yet today still has its streak counted from yesterday.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Streak numbers for one cat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
    pub checked_today: bool,
}

impl StreakSummary {
    /// Three or more days in a row
    pub fn on_fire(&self) -> bool {
        self.current >= 3
    }

    pub fn personal_best(&self) -> bool {
        self.current == self.longest && self.current > 1
    }

    /// A live streak that ends tonight unless today is checked in
    pub fn needs_check_in(&self) -> bool {
        !self.checked_today && self.current > 0
    }
}

/// Compute streaks from the days that have a record
///
/// Duplicate dates are ignored. Dates after `today` never extend the current
/// streak but do count towards the longest one.
pub fn calculate_streak(
    dates: impl IntoIterator<Item = NaiveDate>,
    today: NaiveDate,
) -> StreakSummary {
    let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let checked_today = dates.contains(&today);

    StreakSummary {
        current: current_streak(&dates, today, checked_today),
        longest: longest_streak(&dates),
        checked_today,
    }
}

fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(1))
}

fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate, checked_today: bool) -> u32 {
    let mut cursor = if checked_today {
        Some(today)
    } else {
        previous_day(today)
    };

    let mut count = 0;
    for date in dates.iter().rev() {
        let Some(expected) = cursor else { break };
        if *date == expected {
            count += 1;
            cursor = previous_day(expected);
        } else if *date < expected {
            break;
        }
    }
    count
}

fn longest_streak(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut last: Option<NaiveDate> = None;

    for date in dates {
        run = match last {
            Some(prev) if (*date - prev).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        last = Some(*date);
    }
    longest
}
