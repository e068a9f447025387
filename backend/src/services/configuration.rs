use std::collections::HashSet;

use sqlx::{PgExecutor, PgPool};

use crate::models::{
    delivery::{DeliveryConfigEntry, DeliveryConfigRow, DeliveryMapping},
    weekday::Weekday,
};

pub struct ConfigurationService;

impl ConfigurationService {
    /// Build the alimentary -> delivery mapping from the stored rows.
    pub async fn load_mapping<'e, E>(executor: E) -> Result<DeliveryMapping, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, DeliveryConfigRow>(
            "SELECT alimentary_day, delivery_day FROM delivery_configuration",
        )
        .fetch_all(executor)
        .await?;

        Ok(mapping_from_rows(rows))
    }

    /// Replace the whole configuration. A partial list is allowed.
    pub async fn replace(pool: &PgPool, entries: &[DeliveryConfigEntry]) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM delivery_configuration")
            .execute(&mut *tx)
            .await?;
        for entry in entries {
            sqlx::query(
                "INSERT INTO delivery_configuration (alimentary_day, delivery_day) VALUES ($1, $2)",
            )
            .bind(entry.alimentary_day.label())
            .bind(entry.delivery_day.label())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

/// Days with no row, or with an unreadable label, deliver on themselves.
pub fn mapping_from_rows(rows: Vec<DeliveryConfigRow>) -> DeliveryMapping {
    let entries = rows.into_iter().filter_map(|row| {
        match (
            Weekday::from_label(&row.alimentary_day),
            Weekday::from_label(&row.delivery_day),
        ) {
            (Some(alimentary), Some(delivery)) => Some((alimentary, delivery)),
            _ => {
                tracing::warn!(
                    "Ignoring delivery configuration row {} -> {}",
                    row.alimentary_day,
                    row.delivery_day
                );
                None
            }
        }
    });
    DeliveryMapping::from_entries(entries)
}

/// Rejects a configuration listing the same alimentary day twice.
pub fn check_unique_days(entries: &[DeliveryConfigEntry]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.alimentary_day) {
            return Err(format!("Jour {} configuré plusieurs fois", entry.alimentary_day));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(a: Weekday, d: Weekday) -> DeliveryConfigEntry {
        DeliveryConfigEntry { alimentary_day: a, delivery_day: d }
    }

    fn row(alimentary: &str, delivery: &str) -> DeliveryConfigRow {
        DeliveryConfigRow { alimentary_day: alimentary.into(), delivery_day: delivery.into() }
    }

    #[test]
    fn unreadable_or_missing_rows_fall_back_to_identity() {
        let mapping = mapping_from_rows(vec![
            row("mardi", "lundi"),
            row("mercredi", "monday"),
            row("Jeudi", "lundi"),
            row("vendredi", "vendredi"),
        ]);

        assert_eq!(mapping.delivery_day(Weekday::Tuesday), Weekday::Monday);
        assert_eq!(mapping.delivery_day(Weekday::Wednesday), Weekday::Wednesday);
        assert_eq!(mapping.delivery_day(Weekday::Thursday), Weekday::Thursday);
        // No row at all for the weekend.
        assert_eq!(mapping.delivery_day(Weekday::Saturday), Weekday::Saturday);
        assert_eq!(mapping.delivery_day(Weekday::Sunday), Weekday::Sunday);
    }

    #[test]
    fn no_rows_is_identity() {
        assert_eq!(mapping_from_rows(Vec::new()), DeliveryMapping::default());
    }

    #[test]
    fn accepts_distinct_days() {
        let entries = [entry(Weekday::Monday, Weekday::Monday), entry(Weekday::Tuesday, Weekday::Monday)];
        assert!(check_unique_days(&entries).is_ok());
    }

    #[test]
    fn rejects_repeated_day() {
        let entries = [entry(Weekday::Tuesday, Weekday::Monday), entry(Weekday::Tuesday, Weekday::Tuesday)];
        assert_eq!(check_unique_days(&entries).unwrap_err(), "Jour mardi configuré plusieurs fois");
    }
}
