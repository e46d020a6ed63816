//! Storage seams for the account and slot stores.
//!
//! Implementations live in `labslot-db`. Methods return `eyre::Result` so
//! that any backend error can be carried into [`crate::errors::LabError::Database`].

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    account::{Account, NewAccount},
    slot::{NewSlot, Slot},
};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create_account(&self, account: &NewAccount) -> Result<Account>;

    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn email_exists(&self, email: &str) -> Result<bool>;

    async fn phone_exists(&self, phone: &str) -> Result<bool>;

    async fn count_accounts(&self) -> Result<i64>;
}

#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Slots for `date`, ordered by slot number.
    async fn find_slots_by_date(&self, date: NaiveDate) -> Result<Vec<Slot>>;

    async fn find_slot_by_id(&self, id: Uuid) -> Result<Option<Slot>>;

    /// Booked slots owned by `account_id`, ordered by date and slot number.
    async fn find_booked_slots(&self, account_id: Uuid) -> Result<Vec<Slot>>;

    /// Inserts the given slots, skipping any `(date, slot_number)` that
    /// already exists.
    async fn insert_slots(&self, slots: &[NewSlot]) -> Result<()>;

    /// Marks the slot booked by `account_id` if it is currently free.
    /// Returns whether the slot changed.
    async fn claim_slot(&self, id: Uuid, account_id: Uuid) -> Result<bool>;

    /// Frees the slot if `account_id` currently owns it.
    /// Returns whether the slot changed.
    async fn release_slot(&self, id: Uuid, account_id: Uuid) -> Result<bool>;
}
