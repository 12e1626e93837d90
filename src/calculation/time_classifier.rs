//! Pricing regime detection.
//!
//! This module decides which rate table applies at a given local wall-clock
//! time. The three predicates are independent of each other; callers that
//! need a single regime resolve them in the fixed priority order Happy Hour,
//! Normal Hour, Fun Night through [`RegimeFlags::active_regime`].
//!
//! Between 06:00 and 08:59 none of the predicates hold. Sessions priced in
//! that window fall through to the flat per-person fallback.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::PricingRegime;

/// The outcome of every regime predicate for one point in time.
///
/// # Example
///
/// ```
/// use lounge_engine::calculation::classify;
/// use lounge_engine::models::PricingRegime;
/// use chrono::NaiveDateTime;
///
/// // 2026-01-13 is a Tuesday
/// let at = NaiveDateTime::parse_from_str("2026-01-13 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let flags = classify(at);
/// assert!(flags.is_happy_hour);
/// assert_eq!(flags.active_regime(), PricingRegime::HappyHour);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeFlags {
    /// Happy Hour predicate.
    pub is_happy_hour: bool,
    /// Normal Hour predicate.
    pub is_normal_hour: bool,
    /// Fun Night predicate.
    pub is_fun_night: bool,
}

impl RegimeFlags {
    /// Resolves the flags to the single regime that prices a session.
    pub fn active_regime(&self) -> PricingRegime {
        if self.is_happy_hour {
            PricingRegime::HappyHour
        } else if self.is_normal_hour {
            PricingRegime::Normal
        } else if self.is_fun_night {
            PricingRegime::FunNight
        } else {
            PricingRegime::Unclassified
        }
    }
}

/// Returns true on Saturday and Sunday.
pub fn is_weekend(datetime: NaiveDateTime) -> bool {
    matches!(datetime.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Happy Hour: 09:00 to 14:00 inclusive on weekdays, 09:00 to 12:00
/// inclusive on weekends. Only the exact boundary minute counts, so 14:00
/// is Happy Hour and 14:01 is not.
///
/// # Example
///
/// ```
/// use lounge_engine::calculation::is_happy_hour;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // Tuesday
/// assert!(is_happy_hour(at("2026-01-13 14:00:00")));
/// assert!(!is_happy_hour(at("2026-01-13 14:01:00")));
/// // Saturday
/// assert!(is_happy_hour(at("2026-01-17 12:00:00")));
/// assert!(!is_happy_hour(at("2026-01-17 12:01:00")));
/// ```
pub fn is_happy_hour(datetime: NaiveDateTime) -> bool {
    let hour = datetime.hour();
    let minute = datetime.minute();

    if hour < 9 {
        return false;
    }

    let closing_hour = if is_weekend(datetime) { 12 } else { 14 };
    if hour < closing_hour {
        return true;
    }
    hour == closing_hour && minute == 0
}

/// Fun Night: 21:00 through 05:59, every day of the week.
pub fn is_fun_night(datetime: NaiveDateTime) -> bool {
    let hour = datetime.hour();
    hour >= 21 || hour < 6
}

/// Normal Hour: from one minute after Happy Hour closes until 20:59.
///
/// Before 09:00 this is always false, which is what leaves the early
/// morning gap unclassified.
pub fn is_normal_hour(datetime: NaiveDateTime) -> bool {
    let hour = datetime.hour();
    let minute = datetime.minute();

    if hour >= 21 {
        return false;
    }

    let opening_hour = if is_weekend(datetime) { 12 } else { 14 };
    if hour == opening_hour {
        return minute >= 1;
    }
    hour > opening_hour
}

/// Evaluates all three predicates for `datetime`.
pub fn classify(datetime: NaiveDateTime) -> RegimeFlags {
    RegimeFlags {
        is_happy_hour: is_happy_hour(datetime),
        is_normal_hour: is_normal_hour(datetime),
        is_fun_night: is_fun_night(datetime),
    }
}
