use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::AfipError;

/// Monthly reporting period of an IVA Turismo presentation.
///
/// Ordered chronologically (year, then month). Deserialization goes through
/// [`ReportPeriod::new`], so a loaded period is as valid as a built one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct ReportPeriod {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for ReportPeriod {
    type Error = AfipError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl ReportPeriod {
    /// Create a period; the year must have four digits and the month be 1–12.
    pub fn new(year: i32, month: u32) -> Result<Self, AfipError> {
        if !(1000..=9999).contains(&year) {
            return Err(AfipError::Numbering(format!("invalid period year {year}")));
        }
        if !(1..=12).contains(&month) {
            return Err(AfipError::Numbering(format!("invalid period month {month}")));
        }
        Ok(Self { year, month })
    }

    /// Period containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Period of a `from..=to` selection; the period is the month of `from`.
    pub fn from_range(from: NaiveDate, to: NaiveDate) -> Result<Self, AfipError> {
        if from > to {
            return Err(AfipError::Numbering(format!(
                "period start {from} is after period end {to}"
            )));
        }
        Ok(Self::from_date(from))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// `YYYYMM`, as written in the header record.
    pub fn yyyymm(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// Display name of the report, e.g. `IVA TUR 2025/06`.
    pub fn report_name(&self) -> String {
        format!("IVA TUR {:04}/{:02}", self.year, self.month)
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse a date as AFIP services emit it: `YYYY-MM-DD`, `YYYY/MM/DD` or `YYYYMMDD`.
pub fn parse_afip_date(field: &str, value: &str) -> Result<NaiveDate, AfipError> {
    let value = value.trim();
    ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| AfipError::format(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn yyyymm_and_name() {
        let p = ReportPeriod::new(2025, 6).unwrap();
        assert_eq!(p.yyyymm(), "202506");
        assert_eq!(p.report_name(), "IVA TUR 2025/06");
        assert_eq!(p.to_string(), "2025-06");
    }

    #[test]
    fn rejects_invalid_month_and_year() {
        assert!(ReportPeriod::new(2025, 0).is_err());
        assert!(ReportPeriod::new(2025, 13).is_err());
        assert!(ReportPeriod::new(25, 1).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let p: ReportPeriod = serde_json::from_str(r#"{"year":2025,"month":6}"#).unwrap();
        assert_eq!(p, ReportPeriod::new(2025, 6).unwrap());
        assert!(serde_json::from_str::<ReportPeriod>(r#"{"year":2025,"month":13}"#).is_err());
        assert!(serde_json::from_str::<ReportPeriod>(r#"{"year":25,"month":6}"#).is_err());
    }

    #[test]
    fn range_uses_start_month() {
        let p = ReportPeriod::from_range(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
        assert_eq!(p, ReportPeriod::new(2025, 6).unwrap());
        assert!(ReportPeriod::from_range(date(2025, 7, 1), date(2025, 6, 30)).is_err());
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(ReportPeriod::new(2024, 12).unwrap() < ReportPeriod::new(2025, 1).unwrap());
    }

    #[test]
    fn afip_date_formats() {
        assert_eq!(parse_afip_date("f", "2025-06-15").unwrap(), date(2025, 6, 15));
        assert_eq!(parse_afip_date("f", "2025/06/15").unwrap(), date(2025, 6, 15));
        assert_eq!(parse_afip_date("f", "20250615").unwrap(), date(2025, 6, 15));
        assert!(matches!(
            parse_afip_date("fechaEmision", "15/06/2025"),
            Err(AfipError::Format { .. })
        ));
    }
}
