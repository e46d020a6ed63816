//! View models returned by the page endpoints.
//!
//! These carry exactly what a template needs to render each page, including
//! the flash messages queued by the previous request.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{account::AccountSummary, slot::Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePage {
    pub account: Option<AccountSummary>,
    pub messages: Vec<FlashMessage>,
}

/// Signup and login forms only need the pending messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPage {
    pub messages: Vec<FlashMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub id: Uuid,
    pub date: NaiveDate,
    pub slot_number: i32,
    /// `HH:MM`; a window ending at midnight is shown as `24:00`.
    pub start: String,
    pub end: String,
    pub booked: bool,
    pub booked_by_me: bool,
}

impl SlotView {
    pub fn new(slot: &Slot, viewer: Uuid) -> Self {
        Self {
            id: slot.id,
            date: slot.date,
            slot_number: slot.slot_number,
            start: format_clock(slot.start_time, false),
            end: format_clock(slot.end_time, true),
            booked: slot.booked,
            booked_by_me: slot.is_owned_by(viewer),
        }
    }
}

fn format_clock(time: NaiveTime, is_end: bool) -> String {
    if is_end && time == NaiveTime::MIN {
        return "24:00".to_string();
    }
    format!("{:02}:{:02}", time.hour(), time.minute())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotBookingPage {
    pub selected_date: Option<NaiveDate>,
    pub slots: Vec<SlotView>,
    pub messages: Vec<FlashMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MySlotsPage {
    pub booked_slots: Vec<SlotView>,
    pub messages: Vec<FlashMessage>,
}
