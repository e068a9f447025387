use chrono::NaiveDate;
use serde::Deserialize;

use super::delivery::DayFlags;
use crate::error::ExportError;

/// Scope of an export around the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Every ordered day of the reference date's ISO week.
    Week,
    /// Only meals eaten on the reference date itself.
    Day,
}

impl ExportMode {
    pub fn parse(value: &str) -> Result<Self, ExportError> {
        match value {
            "semaine" => Ok(ExportMode::Week),
            "jour" => Ok(ExportMode::Day),
            other => Err(ExportError::InvalidMode(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExportMode::Week => "semaine",
            ExportMode::Day => "jour",
        }
    }
}

/// Body for POST /api/export/csv. Kept as raw strings so bad input maps to
/// the export error taxonomy instead of a generic deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    pub mode: String,
    pub date: String,
}

impl ExportRequest {
    pub fn parse(&self) -> Result<(NaiveDate, ExportMode), ExportError> {
        let mode = ExportMode::parse(&self.mode)?;
        let malformed = || ExportError::MalformedDate(self.date.clone());
        // chrono's %Y also takes signed and 5+ digit years.
        if !is_iso_date_shape(&self.date) {
            return Err(malformed());
        }
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| malformed())?;
        Ok((date, mode))
    }
}

/// `YYYY-MM-DD` with ASCII digits only.
fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Read-only copy of the beneficiary fields printed on a manifest line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeneficiarySnapshot {
    pub id: i64,
    pub full_name: String,
    pub delivery_location: Option<String>,
    pub mailbox_number: Option<String>,
    pub street: Option<String>,
    pub locality_complement: Option<String>,
    pub postal_code: Option<String>,
    pub locality: Option<String>,
    pub access_instructions: Option<String>,
    pub extra_instructions: Option<String>,
    pub phone: Option<String>,
    pub regime: Option<String>,
    pub route: Option<String>,
}

/// A week order as seen by the resolver.
#[derive(Debug, Clone)]
pub struct OrderedWeek {
    pub beneficiary: BeneficiarySnapshot,
    pub days: DayFlags,
}

/// One manifest line: every meal a beneficiary receives in one drop-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub delivery_date: NaiveDate,
    /// Consumption dates in the order they were bundled.
    pub consumption_dates: Vec<NaiveDate>,
    pub count: u32,
    /// `{beneficiary_id}_{DD/MM/YYYY}`
    pub reference: String,
    pub beneficiary: BeneficiarySnapshot,
}

impl ManifestRow {
    pub fn new(beneficiary: &BeneficiarySnapshot, delivery_date: NaiveDate, consumption_date: NaiveDate) -> Self {
        Self {
            delivery_date,
            consumption_dates: vec![consumption_date],
            count: 1,
            reference: format!("{}_{}", beneficiary.id, delivery_date.format("%d/%m/%Y")),
            beneficiary: beneficiary.clone(),
        }
    }

    pub fn push(&mut self, consumption_date: NaiveDate) {
        self.consumption_dates.push(consumption_date);
        self.count += 1;
    }

    pub fn route(&self) -> &str {
        self.beneficiary.route.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: &str, date: &str) -> ExportRequest {
        ExportRequest { mode: mode.into(), date: date.into() }
    }

    #[test]
    fn parses_both_modes() {
        let (date, mode) = request("semaine", "2024-03-04").parse().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(mode, ExportMode::Week);
        assert_eq!(request("jour", "2024-03-06").parse().unwrap().1, ExportMode::Day);
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = request("mois", "2024-03-04").parse().unwrap_err();
        assert!(matches!(err, ExportError::InvalidMode(m) if m == "mois"));
    }

    #[test]
    fn rejects_malformed_date() {
        for bad in ["04/03/2024", "2024-02-30", "", "demain", "2024-3-4", "2024-03-04 "] {
            let err = request("semaine", bad).parse().unwrap_err();
            assert!(matches!(err, ExportError::MalformedDate(_)), "{bad}");
        }
    }

    #[test]
    fn rejects_years_outside_four_digits() {
        let min = NaiveDate::MIN.format("%Y-%m-%d").to_string();
        let max = NaiveDate::MAX.format("%Y-%m-%d").to_string();
        for bad in [min.as_str(), max.as_str(), "-262143-01-01", "+10000-01-01", "12024-03-04", "-024-03-04"] {
            let err = request("semaine", bad).parse().unwrap_err();
            assert!(matches!(err, ExportError::MalformedDate(d) if d == bad), "{bad}");
        }
        assert!(request("jour", "0001-01-01").parse().is_ok());
        assert!(request("jour", "9999-12-31").parse().is_ok());
    }

    #[test]
    fn reference_uses_delivery_date() {
        let b = BeneficiarySnapshot { id: 12, ..Default::default() };
        let delivery = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut row = ManifestRow::new(&b, delivery, delivery);
        row.push(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(row.reference, "12_04/03/2024");
        assert_eq!(row.count, 2);
        assert_eq!(row.route(), "");
    }
}
