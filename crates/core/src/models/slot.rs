use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable window on a given date.
///
/// `account_id` is `Some` exactly when `booked` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub date: NaiveDate,
    pub slot_number: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub booked: bool,
    pub account_id: Option<Uuid>,
}

impl Slot {
    pub fn is_owned_by(&self, account_id: Uuid) -> bool {
        self.booked && self.account_id == Some(account_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlot {
    pub date: NaiveDate,
    pub slot_number: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotBookingRequest {
    pub selected_date: Option<String>,
}
