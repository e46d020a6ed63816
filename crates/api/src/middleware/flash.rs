//! Flash messages: notices queued in the session by one request and shown
//! (then discarded) by the next page render.

use axum::response::Redirect;
use labslot_core::models::page::FlashMessage;
use tower_sessions::Session;

use super::error_handling::AppError;

const FLASH_SESSION_KEY: &str = "_messages";

pub async fn push(session: &Session, message: FlashMessage) -> Result<(), AppError> {
    let mut messages: Vec<FlashMessage> = session
        .get(FLASH_SESSION_KEY)
        .await?
        .unwrap_or_default();
    messages.push(message);
    session.insert(FLASH_SESSION_KEY, messages).await?;
    Ok(())
}

/// Removes and returns every pending message.
pub async fn take(session: &Session) -> Result<Vec<FlashMessage>, AppError> {
    Ok(session
        .remove::<Vec<FlashMessage>>(FLASH_SESSION_KEY)
        .await?
        .unwrap_or_default())
}

/// Queues `message` and redirects to `to`.
pub async fn redirect(
    session: &Session,
    message: FlashMessage,
    to: &str,
) -> Result<Redirect, AppError> {
    push(session, message).await?;
    Ok(Redirect::to(to))
}
