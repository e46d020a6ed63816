use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use labslot_core::models::{account::Account, slot::Slot};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub slot_date: NaiveDate,
    pub slot_number: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub booked: bool,
    pub account_id: Option<Uuid>,
}

impl From<DbAccount> for Account {
    fn from(row: DbAccount) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            password_hash: row.password_hash,
            is_active: row.is_active,
            is_staff: row.is_staff,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbSlot> for Slot {
    fn from(row: DbSlot) -> Self {
        Self {
            id: row.id,
            date: row.slot_date,
            slot_number: row.slot_number,
            start_time: row.start_time,
            end_time: row.end_time,
            booked: row.booked,
            account_id: row.account_id,
        }
    }
}
