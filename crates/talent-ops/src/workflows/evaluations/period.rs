use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

/// Granularity of a reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Month,
    Quarter,
}

impl PeriodKind {
    pub const fn key(self) -> &'static str {
        match self {
            PeriodKind::Month => "month",
            PeriodKind::Quarter => "quarter",
        }
    }
}

impl FromStr for PeriodKind {
    type Err = PeriodError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "month" | "monthly" => Ok(PeriodKind::Month),
            "quarter" | "quarterly" => Ok(PeriodKind::Quarter),
            other => Err(PeriodError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    pub fn containing(month: Month) -> Self {
        match month.number_from_month() {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "Q1" => Some(Quarter::Q1),
            "Q2" => Some(Quarter::Q2),
            "Q3" => Some(Quarter::Q3),
            "Q4" => Some(Quarter::Q4),
            _ => None,
        }
    }
}

/// Reporting window an evaluation covers. Stored as the pair
/// (`period`, `period_value`), e.g. `("month", "January 2025")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod", into = "RawPeriod")]
pub enum PeriodDescriptor {
    Month { month: Month, year: i32 },
    Quarter { quarter: Quarter, year: i32 },
}

impl PeriodDescriptor {
    pub fn month(month: Month, year: i32) -> Self {
        PeriodDescriptor::Month { month, year }
    }

    pub fn quarter(quarter: Quarter, year: i32) -> Self {
        PeriodDescriptor::Quarter { quarter, year }
    }

    /// Monthly window containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let month = Month::try_from(date.month() as u8).unwrap_or(Month::January);
        PeriodDescriptor::Month {
            month,
            year: date.year(),
        }
    }

    pub fn kind(&self) -> PeriodKind {
        match self {
            PeriodDescriptor::Month { .. } => PeriodKind::Month,
            PeriodDescriptor::Quarter { .. } => PeriodKind::Quarter,
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            PeriodDescriptor::Month { year, .. } | PeriodDescriptor::Quarter { year, .. } => *year,
        }
    }

    /// `"January 2025"` or `"Q1 2025"`.
    pub fn value(&self) -> String {
        match self {
            PeriodDescriptor::Month { month, year } => format!("{} {year}", month.name()),
            PeriodDescriptor::Quarter { quarter, year } => {
                format!("{} {year}", quarter.label())
            }
        }
    }

    pub fn parse(kind: PeriodKind, value: &str) -> Result<Self, PeriodError> {
        let invalid = || PeriodError::InvalidValue {
            kind,
            value: value.to_string(),
        };

        let (label, year) = value.trim().split_once(' ').ok_or_else(invalid)?;
        let year = year.trim().parse::<i32>().map_err(|_| invalid())?;

        match kind {
            PeriodKind::Month => {
                let month = Month::from_str(label).map_err(|_| invalid())?;
                Ok(PeriodDescriptor::Month { month, year })
            }
            PeriodKind::Quarter => {
                let quarter = Quarter::parse(label).ok_or_else(invalid)?;
                Ok(PeriodDescriptor::Quarter { quarter, year })
            }
        }
    }
}

impl fmt::Display for PeriodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("unknown period kind '{0}' (expected month or quarter)")]
    UnknownKind(String),
    #[error("'{value}' is not a valid {} period", .kind.key())]
    InvalidValue { kind: PeriodKind, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPeriod {
    period: PeriodKind,
    period_value: String,
}

impl TryFrom<RawPeriod> for PeriodDescriptor {
    type Error = PeriodError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        PeriodDescriptor::parse(raw.period, &raw.period_value)
    }
}

impl From<PeriodDescriptor> for RawPeriod {
    fn from(period: PeriodDescriptor) -> Self {
        RawPeriod {
            period: period.kind(),
            period_value: period.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_month_and_quarter_values() {
        assert_eq!(
            PeriodDescriptor::month(Month::January, 2025).value(),
            "January 2025"
        );
        assert_eq!(PeriodDescriptor::quarter(Quarter::Q1, 2025).value(), "Q1 2025");
    }

    #[test]
    fn parses_stored_values() {
        assert_eq!(
            PeriodDescriptor::parse(PeriodKind::Month, "March 2024"),
            Ok(PeriodDescriptor::month(Month::March, 2024))
        );
        assert_eq!(
            PeriodDescriptor::parse(PeriodKind::Quarter, "q4 2026"),
            Ok(PeriodDescriptor::quarter(Quarter::Q4, 2026))
        );
    }

    #[test]
    fn rejects_mismatched_kind_and_value() {
        assert!(PeriodDescriptor::parse(PeriodKind::Quarter, "January 2025").is_err());
        assert!(PeriodDescriptor::parse(PeriodKind::Month, "January").is_err());
        assert!(PeriodDescriptor::parse(PeriodKind::Month, "Smarch 2025").is_err());
    }

    #[test]
    fn serializes_as_period_pair() {
        let period = PeriodDescriptor::quarter(Quarter::Q2, 2025);
        let json = serde_json::to_value(period).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({ "period": "quarter", "period_value": "Q2 2025" })
        );
        let back: PeriodDescriptor = serde_json::from_value(json).expect("deserializes");
        assert_eq!(back, period);
    }

    #[test]
    fn month_of_date_and_containing_quarter() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 14).expect("valid date");
        assert_eq!(
            PeriodDescriptor::month_of(date),
            PeriodDescriptor::month(Month::August, 2025)
        );
        assert_eq!(Quarter::containing(Month::August), Quarter::Q3);
    }
}
