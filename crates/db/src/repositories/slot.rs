use crate::models::DbSlot;
use chrono::NaiveDate;
use eyre::Result;
use labslot_core::models::slot::NewSlot;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_slots_by_date(pool: &Pool<Postgres>, date: NaiveDate) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, slot_date, slot_number, start_time, end_time, booked, account_id
        FROM slots
        WHERE slot_date = $1
        ORDER BY slot_number ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSlot>> {
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, slot_date, slot_number, start_time, end_time, booked, account_id
        FROM slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn get_booked_slots_by_account(
    pool: &Pool<Postgres>,
    account_id: Uuid,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, slot_date, slot_number, start_time, end_time, booked, account_id
        FROM slots
        WHERE account_id = $1 AND booked = TRUE
        ORDER BY slot_date ASC, slot_number ASC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// Inserts a day's slots in one transaction. Rows that already exist for the
/// same date and number are left untouched, so concurrent generation of the
/// same date converges on a single set.
pub async fn insert_slots(pool: &Pool<Postgres>, slots: &[NewSlot]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for slot in slots {
        sqlx::query(
            r#"
            INSERT INTO slots (id, slot_date, slot_number, start_time, end_time, booked, account_id)
            VALUES ($1, $2, $3, $4, $5, FALSE, NULL)
            ON CONFLICT (slot_date, slot_number) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(slot.date)
        .bind(slot.slot_number)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn claim_slot(pool: &Pool<Postgres>, id: Uuid, account_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE slots
        SET booked = TRUE, account_id = $2
        WHERE id = $1 AND booked = FALSE
        "#,
    )
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn release_slot(pool: &Pool<Postgres>, id: Uuid, account_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE slots
        SET booked = FALSE, account_id = NULL
        WHERE id = $1 AND account_id = $2
        "#,
    )
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
