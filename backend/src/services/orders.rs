use chrono::Utc;
use sqlx::{PgExecutor, PgPool};

use crate::{
    models::{
        manifest::OrderedWeek,
        order::{ExportOrderRow, SaveWeekOrdersRequest, WeeklyOrder},
    },
    services::delivery::IsoWeekRef,
};

pub struct OrderService;

impl OrderService {
    pub async fn list_week(pool: &PgPool, week: i32, year: i32) -> anyhow::Result<Vec<WeeklyOrder>> {
        let orders = sqlx::query_as::<_, WeeklyOrder>(
            "SELECT o.id, o.beneficiary_id, b.full_name AS beneficiary_name, o.order_date,
                    o.iso_week, o.iso_year,
                    o.monday, o.tuesday, o.wednesday, o.thursday, o.friday, o.saturday, o.sunday
             FROM weekly_orders o
             JOIN beneficiaries b ON b.id = o.beneficiary_id
             WHERE o.iso_week = $1 AND o.iso_year = $2
             ORDER BY b.full_name, o.id",
        )
        .bind(week)
        .bind(year)
        .fetch_all(pool)
        .await?;
        Ok(orders)
    }

    /// Replace every order of the week: delete then insert, in one transaction.
    /// Returns the number of orders stored.
    pub async fn replace_week(pool: &PgPool, req: &SaveWeekOrdersRequest) -> anyhow::Result<usize> {
        let week = i32::try_from(req.week)?;
        let today = Utc::now().date_naive();
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM weekly_orders WHERE iso_week = $1 AND iso_year = $2")
            .bind(week)
            .bind(req.year)
            .execute(&mut *tx)
            .await?;

        for line in &req.orders {
            sqlx::query(
                "INSERT INTO weekly_orders
                    (beneficiary_id, order_date, iso_week, iso_year,
                     monday, tuesday, wednesday, thursday, friday, saturday, sunday)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            )
            .bind(line.beneficiary_id)
            .bind(today)
            .bind(week)
            .bind(req.year)
            .bind(line.monday)
            .bind(line.tuesday)
            .bind(line.wednesday)
            .bind(line.thursday)
            .bind(line.friday)
            .bind(line.saturday)
            .bind(line.sunday)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(req.orders.len())
    }

    /// Orders of one ISO week with the beneficiary fields printed on the
    /// manifest. Inactive beneficiaries are included: their orders stay valid.
    pub async fn fetch_for_export<'e, E>(executor: E, week: IsoWeekRef) -> Result<Vec<OrderedWeek>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, ExportOrderRow>(
            "SELECT o.beneficiary_id,
                    o.monday, o.tuesday, o.wednesday, o.thursday, o.friday, o.saturday, o.sunday,
                    b.full_name, b.delivery_location, b.mailbox_number, b.street,
                    b.locality_complement, b.postal_code, b.locality,
                    b.access_instructions, b.extra_instructions, b.phone,
                    r.name AS regime, b.route
             FROM weekly_orders o
             JOIN beneficiaries b ON b.id = o.beneficiary_id
             LEFT JOIN regimes r ON r.id = b.regime_id
             WHERE o.iso_week = $1 AND o.iso_year = $2
             ORDER BY o.id",
        )
        .bind(week.week as i32)
        .bind(week.year)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(OrderedWeek::from).collect())
    }
}
