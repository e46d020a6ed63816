//! Slot booking pages and the claim/release actions.
//!
//! Claiming a slot that is already booked, or releasing a slot owned by
//! someone else, is ignored without a message; the caller is simply
//! redirected.

use axum::{
    Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use labslot_core::{
    booking::{self, ClaimOutcome},
    errors::LabError,
    models::{
        page::{FlashMessage, MySlotsPage, SlotBookingPage, SlotView},
        slot::SlotBookingRequest,
    },
};
use std::sync::Arc;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::CurrentAccount, error_handling::AppError, flash},
    routes::paths,
};

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn slot_booking_page(
    _account: CurrentAccount,
    session: Session,
) -> Result<Json<SlotBookingPage>, AppError> {
    Ok(Json(SlotBookingPage {
        selected_date: None,
        slots: Vec::new(),
        messages: flash::take(&session).await?,
    }))
}

/// Lists the slots of the submitted date, generating them on first use.
#[axum::debug_handler]
pub async fn slot_booking(
    State(state): State<Arc<ApiState>>,
    CurrentAccount(account): CurrentAccount,
    session: Session,
    Form(form): Form<SlotBookingRequest>,
) -> Result<Response, AppError> {
    let raw_date = form.selected_date.unwrap_or_default();
    let date = match booking::parse_selected_date(&raw_date) {
        Ok(date) => date,
        Err(LabError::Validation(message)) => {
            let redirect =
                flash::redirect(&session, FlashMessage::error(message), paths::SLOT_BOOKING)
                    .await?;
            return Ok(redirect.into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let slots = booking::slots_for_date(state.slots.as_ref(), date).await?;

    let page = SlotBookingPage {
        selected_date: Some(date),
        slots: slots.iter().map(|s| SlotView::new(s, account.id)).collect(),
        messages: flash::take(&session).await?,
    };
    Ok(Json(page).into_response())
}

#[axum::debug_handler]
pub async fn book_slot(
    State(state): State<Arc<ApiState>>,
    CurrentAccount(account): CurrentAccount,
    Path(slot_id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    match booking::claim_slot(state.slots.as_ref(), slot_id, account.id).await? {
        ClaimOutcome::Claimed => Ok(Redirect::to(paths::MY_SLOTS)),
        ClaimOutcome::AlreadyBooked => Ok(Redirect::to(paths::HOME)),
    }
}

#[axum::debug_handler]
pub async fn my_slots(
    State(state): State<Arc<ApiState>>,
    CurrentAccount(account): CurrentAccount,
    session: Session,
) -> Result<Json<MySlotsPage>, AppError> {
    let slots = booking::my_slots(state.slots.as_ref(), account.id).await?;

    Ok(Json(MySlotsPage {
        booked_slots: slots.iter().map(|s| SlotView::new(s, account.id)).collect(),
        messages: flash::take(&session).await?,
    }))
}

#[axum::debug_handler]
pub async fn free_slot(
    State(state): State<Arc<ApiState>>,
    CurrentAccount(account): CurrentAccount,
    Path(slot_id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    booking::release_slot(state.slots.as_ref(), slot_id, account.id).await?;
    Ok(Redirect::to(paths::MY_SLOTS))
}
