//! Inactivity classification
//!
//! A user's last activity is the most recent `lastLoginAt` among the
//! memberships that apply (all of them, or only those of one organization).
//! Users whose last activity is missing or at/before the cutoff are inactive.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::client::models::{User, UserStatus};

/// Local date-time layouts accepted for `lastLoginAt`; the offset is split off first
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Length of the `YYYY-MM-DD` prefix; offset signs are searched after it
const DATE_LEN: usize = 10;

/// Parse an ISO-8601 timestamp; `None` for anything unparseable.
///
/// Accepts `Z`, `+hh`, `+hhmm` and `+hh:mm` offsets. Timestamps without an
/// offset, including bare dates, are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let (local, offset) = split_offset(raw)?;
    let naive = parse_local(local)?;
    match offset {
        Some(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
        None => Some(naive.and_utc()),
    }
}

fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Split a trailing UTC offset from the local part.
///
/// `None` when the suffix has an offset sign but is not a valid offset.
fn split_offset(raw: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(local) = raw.strip_suffix(['Z', 'z']) {
        return Some((local, FixedOffset::east_opt(0)));
    }

    match raw.get(DATE_LEN..).and_then(|time| time.rfind(['+', '-'])) {
        Some(pos) => {
            let (local, offset) = raw.split_at(DATE_LEN + pos);
            Some((local, Some(parse_offset(offset)?)))
        }
        None => Some((raw, None)),
    }
}

/// `+hh`, `+hhmm` or `+hh:mm` (and the `-` forms)
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let (sign, rest) = match raw.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };

    let digits = match rest.split_once(':') {
        Some((hours, minutes)) if hours.len() == 2 && minutes.len() == 2 => {
            format!("{hours}{minutes}")
        }
        Some(_) => return None,
        None => rest.to_string(),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes): (i32, i32) = match digits.len() {
        2 => (digits.parse().ok()?, 0),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Most recent login among the memberships selected by `org_filter`.
///
/// With a filter, only memberships of that organization count; a filter
/// that matches nothing yields `None`, same as a user who never logged in.
pub fn select_last_login(user: &User, org_filter: Option<&str>) -> Option<DateTime<Utc>> {
    user.org_members
        .iter()
        .filter(|m| match org_filter {
            Some(org) => m.org_id.as_deref() == Some(org),
            None => true,
        })
        .filter_map(|m| m.last_login_at.as_deref().and_then(parse_timestamp))
        .max()
}

/// Outcome of classifying one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Already disabled; never reported or touched again
    Excluded,
    Active { last_login: DateTime<Utc> },
    Inactive { last_login: Option<DateTime<Utc>> },
}

/// A user selected for deactivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InactivityRecord {
    pub id: String,
    pub email: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Threshold snapshot for one run.
///
/// `now` is fixed at construction so every user is judged against the same
/// cutoff.
#[derive(Debug, Clone)]
pub struct InactivityPolicy {
    now: DateTime<Utc>,
    threshold_days: u32,
    org_filter: Option<String>,
}

impl InactivityPolicy {
    pub fn new(now: DateTime<Utc>, threshold_days: u32, org_filter: Option<String>) -> Self {
        Self {
            now,
            threshold_days,
            org_filter,
        }
    }

    pub fn threshold_days(&self) -> u32 {
        self.threshold_days
    }

    /// Logins at or before this instant count as inactive
    pub fn cutoff(&self) -> DateTime<Utc> {
        self.now
            .checked_sub_signed(Duration::days(i64::from(self.threshold_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Classify one user
    pub fn classify(&self, user: &User) -> Classification {
        if user.status() == UserStatus::Disabled {
            return Classification::Excluded;
        }

        match select_last_login(user, self.org_filter.as_deref()) {
            Some(last_login) if last_login > self.cutoff() => Classification::Active { last_login },
            last_login => Classification::Inactive { last_login },
        }
    }

    /// Inactive users in input order.
    ///
    /// Users with neither an id nor an email are dropped.
    pub fn inactive_records(&self, users: &[User]) -> Vec<InactivityRecord> {
        users
            .iter()
            .filter_map(|user| match self.classify(user) {
                Classification::Inactive { last_login } => match user.identifier() {
                    Some(id) => Some(InactivityRecord {
                        id: id.to_string(),
                        email: user.email.clone().filter(|e| !e.is_empty()),
                        last_login,
                    }),
                    None => {
                        log::debug!("Skipping inactive user without id or email");
                        None
                    }
                },
                Classification::Excluded | Classification::Active { .. } => None,
            })
            .collect()
    }
}
