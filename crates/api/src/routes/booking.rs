use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers, routes::paths};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            paths::SLOT_BOOKING,
            get(handlers::booking::slot_booking_page).post(handlers::booking::slot_booking),
        )
        .route("/book-slot/:slot_id/", get(handlers::booking::book_slot))
        .route(paths::MY_SLOTS, get(handlers::booking::my_slots))
        .route("/free_slot/:slot_id/", get(handlers::booking::free_slot))
}
