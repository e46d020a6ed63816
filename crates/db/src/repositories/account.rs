use crate::models::DbAccount;
use chrono::Utc;
use eyre::Result;
use labslot_core::models::account::NewAccount;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_account(pool: &Pool<Postgres>, account: &NewAccount) -> Result<DbAccount> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating account: id={}, email={}, is_staff={}",
        id, account.email, account.is_staff
    );

    let row = sqlx::query_as::<_, DbAccount>(
        r#"
        INSERT INTO accounts (id, name, email, phone, password_hash, is_active, is_staff, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, TRUE, $6, $7, $7)
        RETURNING id, name, email, phone, password_hash, is_active, is_staff, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&account.name)
    .bind(&account.email)
    .bind(&account.phone)
    .bind(&account.password_hash)
    .bind(account.is_staff)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_account_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAccount>> {
    let row = sqlx::query_as::<_, DbAccount>(
        r#"
        SELECT id, name, email, phone, password_hash, is_active, is_staff, created_at, updated_at
        FROM accounts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_account_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbAccount>> {
    let row = sqlx::query_as::<_, DbAccount>(
        r#"
        SELECT id, name, email, phone, password_hash, is_active, is_staff, created_at, updated_at
        FROM accounts
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn email_exists(pool: &Pool<Postgres>, email: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM accounts WHERE email = $1)",
    )
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn phone_exists(pool: &Pool<Postgres>, phone: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM accounts WHERE phone = $1)",
    )
    .bind(phone)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn count_accounts(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
