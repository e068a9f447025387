use sqlx::PgPool;

use crate::models::{menu::Menu, regime::Regime};

/// Unique-name label tables (regimes, menus).
pub struct LabelService;

/// Outcome of inserting a label whose name must be unique.
pub enum CreateLabel {
    Created(i64),
    Duplicate,
}

impl LabelService {
    pub async fn list_regimes(pool: &PgPool) -> anyhow::Result<Vec<Regime>> {
        let regimes = sqlx::query_as::<_, Regime>("SELECT id, name, created_at FROM regimes ORDER BY name")
            .fetch_all(pool)
            .await?;
        Ok(regimes)
    }

    pub async fn list_menus(pool: &PgPool) -> anyhow::Result<Vec<Menu>> {
        let menus = sqlx::query_as::<_, Menu>("SELECT id, name, created_at FROM menus ORDER BY name")
            .fetch_all(pool)
            .await?;
        Ok(menus)
    }

    pub async fn create_regime(pool: &PgPool, name: &str) -> anyhow::Result<CreateLabel> {
        Self::create(pool, "regimes", name).await
    }

    pub async fn create_menu(pool: &PgPool, name: &str) -> anyhow::Result<CreateLabel> {
        Self::create(pool, "menus", name).await
    }

    /// Beneficiaries pointing at the regime fall back to no regime.
    pub async fn delete_regime(pool: &PgPool, id: i64) -> anyhow::Result<bool> {
        Self::delete(pool, "regimes", id).await
    }

    pub async fn delete_menu(pool: &PgPool, id: i64) -> anyhow::Result<bool> {
        Self::delete(pool, "menus", id).await
    }

    async fn create(pool: &PgPool, table: &str, name: &str) -> anyhow::Result<CreateLabel> {
        let id: Option<i64> = sqlx::query_scalar(&format!(
            "INSERT INTO {table} (name) VALUES ($1) ON CONFLICT (name) DO NOTHING RETURNING id"
        ))
        .bind(name)
        .fetch_optional(pool)
        .await?;
        Ok(match id {
            Some(id) => CreateLabel::Created(id),
            None => CreateLabel::Duplicate,
        })
    }

    async fn delete(pool: &PgPool, table: &str, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
