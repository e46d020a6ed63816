//! PostgreSQL repositories.
//!
//! The submodules hold plain query functions over a pool. The two structs
//! below expose them through the storage traits from `labslot-core`.

pub mod account;
pub mod slot;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use labslot_core::{
    models::{
        account::{Account, NewAccount},
        slot::{NewSlot, Slot},
    },
    repositories::{AccountRepository, SlotRepository},
};
use uuid::Uuid;

use crate::DbPool;

#[derive(Clone)]
pub struct PgAccountRepository {
    pool: DbPool,
}

impl PgAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create_account(&self, new: &NewAccount) -> Result<Account> {
        Ok(account::create_account(&self.pool, new).await?.into())
    }

    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(account::get_account_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(account::get_account_by_email(&self.pool, email)
            .await?
            .map(Into::into))
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        account::email_exists(&self.pool, email).await
    }

    async fn phone_exists(&self, phone: &str) -> Result<bool> {
        account::phone_exists(&self.pool, phone).await
    }

    async fn count_accounts(&self) -> Result<i64> {
        account::count_accounts(&self.pool).await
    }
}

#[derive(Clone)]
pub struct PgSlotRepository {
    pool: DbPool,
}

impl PgSlotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for PgSlotRepository {
    async fn find_slots_by_date(&self, date: NaiveDate) -> Result<Vec<Slot>> {
        let rows = slot::get_slots_by_date(&self.pool, date).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_slot_by_id(&self, id: Uuid) -> Result<Option<Slot>> {
        Ok(slot::get_slot_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn find_booked_slots(&self, account_id: Uuid) -> Result<Vec<Slot>> {
        let rows = slot::get_booked_slots_by_account(&self.pool, account_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_slots(&self, slots: &[NewSlot]) -> Result<()> {
        slot::insert_slots(&self.pool, slots).await
    }

    async fn claim_slot(&self, id: Uuid, account_id: Uuid) -> Result<bool> {
        slot::claim_slot(&self.pool, id, account_id).await
    }

    async fn release_slot(&self, id: Uuid, account_id: Uuid) -> Result<bool> {
        slot::release_slot(&self.pool, id, account_id).await
    }
}
