//! In-process store backing both repository traits.
//!
//! Used by the API tests and handy for running the server without a database.
//! It enforces the same constraints as the PostgreSQL schema: unique email and
//! phone, one slot per `(date, slot_number)`, and owner set only when booked.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use eyre::{Result, eyre};
use labslot_core::{
    models::{
        account::{Account, NewAccount},
        slot::{NewSlot, Slot},
    },
    repositories::{AccountRepository, SlotRepository},
};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    slots: Vec<Slot>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| eyre!("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn create_account(&self, new: &NewAccount) -> Result<Account> {
        let mut tables = self.lock()?;

        if tables.accounts.iter().any(|a| a.email == new.email) {
            return Err(eyre!("duplicate key value violates unique constraint on email"));
        }
        if tables.accounts.iter().any(|a| a.phone == new.phone) {
            return Err(eyre!("duplicate key value violates unique constraint on phone"));
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            password_hash: new.password_hash.clone(),
            is_active: true,
            is_staff: new.is_staff,
            created_at: now,
            updated_at: now,
        };
        tables.accounts.push(account.clone());

        Ok(account)
    }

    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.lock()?.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self
            .lock()?
            .accounts
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.lock()?.accounts.iter().any(|a| a.email == email))
    }

    async fn phone_exists(&self, phone: &str) -> Result<bool> {
        Ok(self.lock()?.accounts.iter().any(|a| a.phone == phone))
    }

    async fn count_accounts(&self) -> Result<i64> {
        Ok(self.lock()?.accounts.len() as i64)
    }
}

#[async_trait]
impl SlotRepository for InMemoryStore {
    async fn find_slots_by_date(&self, date: NaiveDate) -> Result<Vec<Slot>> {
        let mut slots: Vec<Slot> = self
            .lock()?
            .slots
            .iter()
            .filter(|s| s.date == date)
            .cloned()
            .collect();
        slots.sort_by_key(|s| s.slot_number);
        Ok(slots)
    }

    async fn find_slot_by_id(&self, id: Uuid) -> Result<Option<Slot>> {
        Ok(self.lock()?.slots.iter().find(|s| s.id == id).cloned())
    }

    async fn find_booked_slots(&self, account_id: Uuid) -> Result<Vec<Slot>> {
        let mut slots: Vec<Slot> = self
            .lock()?
            .slots
            .iter()
            .filter(|s| s.is_owned_by(account_id))
            .cloned()
            .collect();
        slots.sort_by_key(|s| (s.date, s.slot_number));
        Ok(slots)
    }

    async fn insert_slots(&self, new_slots: &[NewSlot]) -> Result<()> {
        let mut tables = self.lock()?;

        for new in new_slots {
            let taken = tables
                .slots
                .iter()
                .any(|s| s.date == new.date && s.slot_number == new.slot_number);
            if taken {
                continue;
            }
            tables.slots.push(Slot {
                id: Uuid::new_v4(),
                date: new.date,
                slot_number: new.slot_number,
                start_time: new.start_time,
                end_time: new.end_time,
                booked: false,
                account_id: None,
            });
        }

        Ok(())
    }

    async fn claim_slot(&self, id: Uuid, account_id: Uuid) -> Result<bool> {
        let mut tables = self.lock()?;
        match tables.slots.iter_mut().find(|s| s.id == id && !s.booked) {
            Some(slot) => {
                slot.booked = true;
                slot.account_id = Some(account_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn release_slot(&self, id: Uuid, account_id: Uuid) -> Result<bool> {
        let mut tables = self.lock()?;
        match tables
            .slots
            .iter_mut()
            .find(|s| s.id == id && s.account_id == Some(account_id))
        {
            Some(slot) => {
                slot.booked = false;
                slot.account_id = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
