use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A meal recipient, with its regime and menu labels resolved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Beneficiary {
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
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub regime_id: Option<i64>,
    pub regime: Option<String>,
    pub menu_id: Option<i64>,
    pub menu: Option<String>,
    pub route: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for POST /api/beneficiaries and PUT /api/beneficiaries/{id}.
/// PUT replaces every field, like a fresh form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertBeneficiaryRequest {
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
    pub regime_id: Option<i64>,
    pub menu_id: Option<i64>,
    pub route: Option<String>,
}

/// Column widths accepted by the logistics partner.
pub const ADDRESS_LINE_MAX: usize = 38;
pub const POSTAL_CODE_MAX: usize = 5;
pub const INSTRUCTIONS_MAX: usize = 90;
pub const PHONE_MAX: usize = 10;
pub const ROUTE_MAX: usize = 5;

impl UpsertBeneficiaryRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty() {
            return Err("Le nom est obligatoire".into());
        }

        let limits: [(&str, Option<&str>, usize); 11] = [
            ("full_name", Some(self.full_name.as_str()), ADDRESS_LINE_MAX),
            ("delivery_location", self.delivery_location.as_deref(), ADDRESS_LINE_MAX),
            ("mailbox_number", self.mailbox_number.as_deref(), ADDRESS_LINE_MAX),
            ("street", self.street.as_deref(), ADDRESS_LINE_MAX),
            ("locality_complement", self.locality_complement.as_deref(), ADDRESS_LINE_MAX),
            ("postal_code", self.postal_code.as_deref(), POSTAL_CODE_MAX),
            ("locality", self.locality.as_deref(), ADDRESS_LINE_MAX),
            ("access_instructions", self.access_instructions.as_deref(), INSTRUCTIONS_MAX),
            ("extra_instructions", self.extra_instructions.as_deref(), INSTRUCTIONS_MAX),
            ("phone", self.phone.as_deref(), PHONE_MAX),
            ("route", self.route.as_deref(), ROUTE_MAX),
        ];

        for (field, value, max) in limits {
            if let Some(v) = value {
                if v.chars().count() > max {
                    return Err(format!("{field} : {max} caractères maximum"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UpsertBeneficiaryRequest {
        serde_json::from_value(serde_json::json!({
            "full_name": "Jeanne Martin",
            "postal_code": "75011",
            "route": "A",
            "monday": true
        }))
        .unwrap()
    }

    #[test]
    fn minimal_request_is_valid() {
        let req = request();
        assert!(req.validate().is_ok());
        assert!(req.monday);
        assert!(!req.sunday);
    }

    #[test]
    fn rejects_blank_name() {
        let mut req = request();
        req.full_name = "   ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_oversized_fields() {
        let mut req = request();
        req.postal_code = Some("750110".into());
        assert_eq!(req.validate().unwrap_err(), "postal_code : 5 caractères maximum");

        let mut req = request();
        req.route = Some("ABCDEF".into());
        assert!(req.validate().is_err());
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut req = request();
        // 38 accented characters, more than 38 bytes
        req.locality = Some("é".repeat(ADDRESS_LINE_MAX));
        assert!(req.validate().is_ok());
    }
}
