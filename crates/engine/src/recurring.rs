use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// How often a scheduled flow repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// The occurrence after `from`. Month-end dates clamp the way calendar
    /// arithmetic does (Jan 31 + 1 month = Feb 28/29).
    #[must_use]
    pub fn next_occurrence(self, from: NaiveDate) -> NaiveDate {
        let next = match self {
            Frequency::Daily => from.checked_add_days(Days::new(1)),
            Frequency::Weekly => from.checked_add_days(Days::new(7)),
            Frequency::Monthly => from.checked_add_months(Months::new(1)),
            Frequency::Yearly => from.checked_add_months(Months::new(12)),
        };
        next.unwrap_or(from)
    }
}

impl TryFrom<&str> for Frequency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(EngineError::InvalidDraft(format!(
                "unknown frequency: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_occurrence_steps_the_calendar() {
        assert_eq!(
            Frequency::Weekly.next_occurrence(date(2026, 3, 25)),
            date(2026, 4, 1)
        );
        assert_eq!(
            Frequency::Monthly.next_occurrence(date(2026, 3, 15)),
            date(2026, 4, 15)
        );
        assert_eq!(
            Frequency::Yearly.next_occurrence(date(2026, 2, 28)),
            date(2027, 2, 28)
        );
    }

    #[test]
    fn monthly_clamps_at_month_end() {
        assert_eq!(
            Frequency::Monthly.next_occurrence(date(2026, 1, 31)),
            date(2026, 2, 28)
        );
    }
}
