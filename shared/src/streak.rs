//! Consecutive-day logging streak

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::models::WeightEntry;

/// Number of consecutive calendar days with at least one entry, ending today
/// or yesterday in `now`'s time zone.
///
/// Entries are walked newest first. The first counted day must be today or
/// yesterday and every following day must be exactly one day earlier than the
/// previous counted day; the first gap ends the walk. Several entries on one
/// day count once. Entries dated after today are ignored.
pub fn calculate_streak<Tz: TimeZone>(entries: &[WeightEntry], now: &DateTime<Tz>) -> u32 {
    streak_as_of(entries, now.date_naive())
}

/// Streak relative to an explicit calendar date
pub fn streak_as_of(entries: &[WeightEntry], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 0;
    let mut last_counted: Option<NaiveDate> = None;

    for date in dates {
        if date > today {
            continue;
        }

        match last_counted {
            None => {
                if (today - date).num_days() > 1 {
                    break;
                }
            }
            Some(previous) if previous == date => continue,
            Some(previous) => {
                if (previous - date).num_days() != 1 {
                    break;
                }
            }
        }

        streak += 1;
        last_counted = Some(date);
    }

    streak
}
