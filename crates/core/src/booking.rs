//! # Booking Workflow
//!
//! Slots are not created ahead of time. The first request that names a date
//! populates it with [`SLOTS_PER_DAY`] contiguous windows of
//! [`SLOT_LENGTH_HOURS`] hours starting at midnight. After that a slot moves
//! between two states:
//!
//! - **Available → Booked** by [`claim_slot`], only while it is not booked
//! - **Booked → Available** by [`release_slot`], only by its owner
//!
//! Both transitions are delegated to a single conditional store operation, so
//! two concurrent claims of the same slot cannot both succeed.

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    errors::{LabError, LabResult},
    models::slot::{NewSlot, Slot},
    repositories::SlotRepository,
};

pub const SLOTS_PER_DAY: i32 = 6;
pub const SLOT_LENGTH_HOURS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    Claimed,
    AlreadyBooked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Released,
    NotOwner,
}

/// The slots a date receives when it is first requested.
///
/// The last window wraps to `00:00`, i.e. it ends at midnight.
pub fn day_layout(date: NaiveDate) -> Vec<NewSlot> {
    let length = Duration::hours(SLOT_LENGTH_HOURS);
    let mut start = NaiveTime::MIN;

    (1..=SLOTS_PER_DAY)
        .map(|slot_number| {
            let (end, _) = start.overflowing_add_signed(length);
            let slot = NewSlot {
                date,
                slot_number,
                start_time: start,
                end_time: end,
            };
            start = end;
            slot
        })
        .collect()
}

/// Returns the slots for `date`, generating them first if the date has none.
pub async fn slots_for_date(repo: &dyn SlotRepository, date: NaiveDate) -> LabResult<Vec<Slot>> {
    let existing = repo.find_slots_by_date(date).await?;
    if !existing.is_empty() {
        return Ok(existing);
    }

    info!(%date, "Generating slots for new date");
    repo.insert_slots(&day_layout(date)).await?;

    Ok(repo.find_slots_by_date(date).await?)
}

pub async fn claim_slot(
    repo: &dyn SlotRepository,
    slot_id: Uuid,
    account_id: Uuid,
) -> LabResult<ClaimOutcome> {
    require_slot(repo, slot_id).await?;

    if repo.claim_slot(slot_id, account_id).await? {
        info!(%slot_id, %account_id, "Slot claimed");
        Ok(ClaimOutcome::Claimed)
    } else {
        debug!(%slot_id, %account_id, "Slot already booked");
        Ok(ClaimOutcome::AlreadyBooked)
    }
}

pub async fn release_slot(
    repo: &dyn SlotRepository,
    slot_id: Uuid,
    account_id: Uuid,
) -> LabResult<ReleaseOutcome> {
    require_slot(repo, slot_id).await?;

    if repo.release_slot(slot_id, account_id).await? {
        info!(%slot_id, %account_id, "Slot released");
        Ok(ReleaseOutcome::Released)
    } else {
        debug!(%slot_id, %account_id, "Release ignored, requester is not the owner");
        Ok(ReleaseOutcome::NotOwner)
    }
}

pub async fn my_slots(repo: &dyn SlotRepository, account_id: Uuid) -> LabResult<Vec<Slot>> {
    Ok(repo.find_booked_slots(account_id).await?)
}

/// Parses a `YYYY-MM-DD` form value.
pub fn parse_selected_date(value: &str) -> LabResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| LabError::Validation("Invalid date format. Use YYYY-MM-DD.".to_string()))
}

async fn require_slot(repo: &dyn SlotRepository, slot_id: Uuid) -> LabResult<Slot> {
    repo.find_slot_by_id(slot_id)
        .await?
        .ok_or_else(|| LabError::slot_not_found(slot_id))
}
