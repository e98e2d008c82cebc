//! Statistics rules shared by every store implementation
//!
//! The record stores answer the raw counts; these helpers pin down the window,
//! the suffix and the ordering so PostgreSQL and the in-memory store agree.

use std::cmp::Ordering;

use chrono::{DateTime, Days, NaiveTime, Utc};

use crate::entities::User;

/// Length of the "recently registered" window, in days
pub const RECENT_WINDOW_DAYS: u64 = 7;

/// Default size of the longest-username ranking
pub const DEFAULT_TOP_USERS: usize = 5;

/// Window for the recent-registration count: `[start of (today - 7 days), now]`
///
/// The lower bound is truncated to midnight UTC so the comparison works on
/// calendar days rather than on the time of day of `now`.
pub fn recent_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_day = now
        .date_naive()
        .checked_sub_days(Days::new(RECENT_WINDOW_DAYS))
        .unwrap_or(chrono::NaiveDate::MIN);
    let since = start_day.and_time(NaiveTime::MIN).and_utc();
    (since, now)
}

/// Suffix matched by the email-domain percentage
#[inline]
pub fn email_domain_suffix(domain: &str) -> String {
    format!("@{domain}")
}

/// `100 * part / total`, or `0.0` for an empty population
pub fn percentage(part: i64, total: i64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Ranking order: longer usernames first, ties by ascending id
pub fn by_name_length_desc(a: &User, b: &User) -> Ordering {
    b.name_length()
        .cmp(&a.name_length())
        .then_with(|| a.id.cmp(&b.id))
}
