use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create accounts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(100) NOT NULL,
            email VARCHAR(254) NOT NULL UNIQUE,
            phone VARCHAR(15) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            is_staff BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            slot_date DATE NOT NULL,
            slot_number INTEGER NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            booked BOOLEAN NOT NULL DEFAULT FALSE,
            account_id UUID NULL REFERENCES accounts(id) ON DELETE CASCADE,
            CONSTRAINT unique_slot_per_date UNIQUE (slot_date, slot_number),
            CONSTRAINT valid_slot_number CHECK (slot_number BETWEEN 1 AND 6),
            CONSTRAINT owner_iff_booked CHECK (booked = (account_id IS NOT NULL))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_slots_slot_date ON slots(slot_date);")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_slots_account_id ON slots(account_id);")
        .execute(pool)
        .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
