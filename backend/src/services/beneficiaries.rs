use sqlx::PgPool;

use crate::models::beneficiary::{Beneficiary, UpsertBeneficiaryRequest};

const SELECT_BENEFICIARY: &str = "SELECT b.id, b.full_name, b.delivery_location, b.mailbox_number, b.street,
            b.locality_complement, b.postal_code, b.locality,
            b.access_instructions, b.extra_instructions, b.phone,
            b.monday, b.tuesday, b.wednesday, b.thursday, b.friday, b.saturday, b.sunday,
            b.regime_id, r.name AS regime, b.menu_id, m.name AS menu,
            b.route, b.is_active, b.created_at, b.updated_at
     FROM beneficiaries b
     LEFT JOIN regimes r ON r.id = b.regime_id
     LEFT JOIN menus m ON m.id = b.menu_id";

pub struct BeneficiaryService;

impl BeneficiaryService {
    pub async fn list_active(pool: &PgPool) -> anyhow::Result<Vec<Beneficiary>> {
        let beneficiaries = sqlx::query_as::<_, Beneficiary>(&format!(
            "{SELECT_BENEFICIARY} WHERE b.is_active = TRUE ORDER BY b.full_name, b.id"
        ))
        .fetch_all(pool)
        .await?;
        Ok(beneficiaries)
    }

    pub async fn get(pool: &PgPool, id: i64) -> anyhow::Result<Option<Beneficiary>> {
        let beneficiary = sqlx::query_as::<_, Beneficiary>(&format!("{SELECT_BENEFICIARY} WHERE b.id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(beneficiary)
    }

    pub async fn create(pool: &PgPool, req: &UpsertBeneficiaryRequest) -> anyhow::Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO beneficiaries
                (full_name, delivery_location, mailbox_number, street, locality_complement,
                 postal_code, locality, access_instructions, extra_instructions, phone,
                 monday, tuesday, wednesday, thursday, friday, saturday, sunday,
                 regime_id, menu_id, route)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
             RETURNING id",
        )
        .bind(req.full_name.trim())
        .bind(&req.delivery_location)
        .bind(&req.mailbox_number)
        .bind(&req.street)
        .bind(&req.locality_complement)
        .bind(&req.postal_code)
        .bind(&req.locality)
        .bind(&req.access_instructions)
        .bind(&req.extra_instructions)
        .bind(&req.phone)
        .bind(req.monday)
        .bind(req.tuesday)
        .bind(req.wednesday)
        .bind(req.thursday)
        .bind(req.friday)
        .bind(req.saturday)
        .bind(req.sunday)
        .bind(req.regime_id)
        .bind(req.menu_id)
        .bind(&req.route)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    /// Overwrite every editable field. Returns false when the id is unknown.
    pub async fn update(pool: &PgPool, id: i64, req: &UpsertBeneficiaryRequest) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE beneficiaries
             SET full_name = $1, delivery_location = $2, mailbox_number = $3, street = $4,
                 locality_complement = $5, postal_code = $6, locality = $7,
                 access_instructions = $8, extra_instructions = $9, phone = $10,
                 monday = $11, tuesday = $12, wednesday = $13, thursday = $14,
                 friday = $15, saturday = $16, sunday = $17,
                 regime_id = $18, menu_id = $19, route = $20,
                 updated_at = NOW()
             WHERE id = $21",
        )
        .bind(req.full_name.trim())
        .bind(&req.delivery_location)
        .bind(&req.mailbox_number)
        .bind(&req.street)
        .bind(&req.locality_complement)
        .bind(&req.postal_code)
        .bind(&req.locality)
        .bind(&req.access_instructions)
        .bind(&req.extra_instructions)
        .bind(&req.phone)
        .bind(req.monday)
        .bind(req.tuesday)
        .bind(req.wednesday)
        .bind(req.thursday)
        .bind(req.friday)
        .bind(req.saturday)
        .bind(req.sunday)
        .bind(req.regime_id)
        .bind(req.menu_id)
        .bind(&req.route)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft delete: the beneficiary leaves the active list but its orders
    /// remain. A hard DELETE on the table cascades to weekly_orders.
    pub async fn deactivate(pool: &PgPool, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE beneficiaries SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
