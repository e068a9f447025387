use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Dietary regime label ("Sans sel", ...), copied into the manifest metadata.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Regime {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

pub const LABEL_MAX: usize = 15;

/// Body for POST /api/regimes and POST /api/menus.
#[derive(Debug, Deserialize)]
pub struct CreateLabelRequest {
    pub name: String,
}

impl CreateLabelRequest {
    /// Trimmed name, or an error message when it is empty or too long.
    pub fn normalized_name(&self) -> Result<&str, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Le nom est obligatoire".into());
        }
        if name.chars().count() > LABEL_MAX {
            return Err(format!("Le nom ne doit pas dépasser {LABEL_MAX} caractères"));
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_bounds_names() {
        let req = CreateLabelRequest { name: "  Sans sel ".into() };
        assert_eq!(req.normalized_name().unwrap(), "Sans sel");

        let req = CreateLabelRequest { name: "".into() };
        assert!(req.normalized_name().is_err());

        let req = CreateLabelRequest { name: "Sans sel ni sucre ajouté".into() };
        assert!(req.normalized_name().is_err());
    }
}
