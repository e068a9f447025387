use std::collections::HashSet;

use chrono::{NaiveDate, Weekday as ChronoWeekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::delivery::DayFlags;
use super::manifest::{BeneficiarySnapshot, OrderedWeek};

/// A beneficiary's ordered days for one ISO week.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeeklyOrder {
    pub id: i64,
    pub beneficiary_id: i64,
    pub beneficiary_name: String,
    pub order_date: NaiveDate,
    pub iso_week: i32,
    pub iso_year: i32,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

/// One line of POST /api/orders.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLine {
    pub beneficiary_id: i64,
    #[serde(default)]
    pub monday: bool,
    #[serde(default)]
    pub tuesday: bool,
    #[serde(default)]
    pub wednesday: bool,
    #[serde(default)]
    pub thursday: bool,
    #[serde(default)]
    pub friday: bool,
    #[serde(default)]
    pub saturday: bool,
    #[serde(default)]
    pub sunday: bool,
}

/// Body for POST /api/orders: replaces every order of the given ISO week.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveWeekOrdersRequest {
    pub week: u32,
    pub year: i32,
    #[serde(default)]
    pub orders: Vec<OrderLine>,
}

impl SaveWeekOrdersRequest {
    pub fn validate(&self) -> Result<(), String> {
        // Rejects week 53 in years that only have 52.
        if NaiveDate::from_isoywd_opt(self.year, self.week, ChronoWeekday::Mon).is_none() {
            return Err(format!(
                "Semaine {} inexistante pour l'année {}",
                self.week, self.year
            ));
        }

        let mut seen = HashSet::new();
        for line in &self.orders {
            if !seen.insert(line.beneficiary_id) {
                return Err(format!(
                    "Bénéficiaire {} présent plusieurs fois",
                    line.beneficiary_id
                ));
            }
        }
        Ok(())
    }
}

/// Order joined with the beneficiary fields the manifest needs.
#[derive(Debug, Clone, FromRow)]
pub struct ExportOrderRow {
    pub beneficiary_id: i64,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
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

impl From<ExportOrderRow> for OrderedWeek {
    fn from(row: ExportOrderRow) -> Self {
        OrderedWeek {
            days: DayFlags::new([
                row.monday,
                row.tuesday,
                row.wednesday,
                row.thursday,
                row.friday,
                row.saturday,
                row.sunday,
            ]),
            beneficiary: BeneficiarySnapshot {
                id: row.beneficiary_id,
                full_name: row.full_name,
                delivery_location: row.delivery_location,
                mailbox_number: row.mailbox_number,
                street: row.street,
                locality_complement: row.locality_complement,
                postal_code: row.postal_code,
                locality: row.locality,
                access_instructions: row.access_instructions,
                extra_instructions: row.extra_instructions,
                phone: row.phone,
                regime: row.regime,
                route: row.route,
            },
        }
    }
}
