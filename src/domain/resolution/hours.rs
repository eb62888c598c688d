//! Operating-hours gate.
//!
//! Decides whether the bot is online for a given configuration. Pure
//! functions of `(spec, now)`; the pipeline short-circuits to an offline
//! result before any AI or knowledge-base call when the gate reports
//! offline, so no API quota is burned outside business hours.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::domain::bot::OperatingHoursSpec;
use crate::domain::foundation::Timestamp;

/// Pure gate over a bot's configured business hours.
pub struct OperatingHoursGate;

impl OperatingHoursGate {
    /// Returns true when the bot should respond.
    ///
    /// An absent or disabled spec is always online. A spec that fails to
    /// parse (cannot happen after load-time validation) fails open to
    /// online rather than silencing the bot.
    pub fn is_online(spec: Option<&OperatingHoursSpec>, now: Timestamp) -> bool {
        let Some(spec) = spec else { return true };
        if !spec.enabled {
            return true;
        }
        let Ok((tz, start, end)) = parse_spec(spec) else {
            return true;
        };

        let local = now.as_datetime().with_timezone(&tz).time();
        if start <= end {
            local >= start && local < end
        } else {
            // Overnight window, e.g. 22:00-06:00.
            local >= start || local < end
        }
    }

    /// Returns the next moment the bot comes online, if currently offline.
    pub fn next_opening(spec: Option<&OperatingHoursSpec>, now: Timestamp) -> Option<Timestamp> {
        let spec = spec?;
        if !spec.enabled || Self::is_online(Some(spec), now) {
            return None;
        }
        let (tz, start, _) = parse_spec(spec).ok()?;

        let local = now.as_datetime().with_timezone(&tz);
        let today_open = local.date_naive().and_time(start);
        let candidate = if local.time() < start {
            today_open
        } else {
            today_open + Duration::days(1)
        };

        resolve_local(&tz, candidate).map(Timestamp::from_datetime)
    }

    /// Human-readable offline message for the widget.
    pub fn offline_message(spec: &OperatingHoursSpec, bot_name: &str) -> String {
        format!(
            "Thanks for reaching out! {} is currently offline. Our hours are {} to {} ({}). \
             Please leave a message and we'll get back to you as soon as we're back.",
            bot_name, spec.start, spec.end, spec.timezone
        )
    }
}

fn parse_spec(spec: &OperatingHoursSpec) -> Result<(Tz, NaiveTime, NaiveTime), ()> {
    let tz = spec.tz().map_err(|_| ())?;
    let start = spec.start_time().map_err(|_| ())?;
    let end = spec.end_time().map_err(|_| ())?;
    Ok((tz, start, end))
}

/// Maps a local wall-clock time to UTC, picking the earliest instant when
/// the time is ambiguous or skipped by a DST transition.
fn resolve_local(tz: &Tz, local: chrono::NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        chrono::LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        chrono::LocalResult::Ambiguous(first, _) => Some(first.with_timezone(&Utc)),
        chrono::LocalResult::None => tz
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}
