use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;

use labslot_core::{
    models::{
        account::{Account, NewAccount},
        slot::{NewSlot, Slot},
    },
    repositories::{AccountRepository, SlotRepository},
};

// Mock repositories for testing
mock! {
    pub AccountRepo {}

    #[async_trait]
    impl AccountRepository for AccountRepo {
        async fn create_account(&self, account: &NewAccount) -> eyre::Result<Account>;
        async fn find_account_by_id(&self, id: Uuid) -> eyre::Result<Option<Account>>;
        async fn find_account_by_email(&self, email: &str) -> eyre::Result<Option<Account>>;
        async fn email_exists(&self, email: &str) -> eyre::Result<bool>;
        async fn phone_exists(&self, phone: &str) -> eyre::Result<bool>;
        async fn count_accounts(&self) -> eyre::Result<i64>;
    }
}

mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotRepository for SlotRepo {
        async fn find_slots_by_date(&self, date: NaiveDate) -> eyre::Result<Vec<Slot>>;
        async fn find_slot_by_id(&self, id: Uuid) -> eyre::Result<Option<Slot>>;
        async fn find_booked_slots(&self, account_id: Uuid) -> eyre::Result<Vec<Slot>>;
        async fn insert_slots(&self, slots: &[NewSlot]) -> eyre::Result<()>;
        async fn claim_slot(&self, id: Uuid, account_id: Uuid) -> eyre::Result<bool>;
        async fn release_slot(&self, id: Uuid, account_id: Uuid) -> eyre::Result<bool>;
    }
}
