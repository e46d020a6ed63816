use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use labslot_api::ApiState;
use labslot_core::models::page::{FlashMessage, MySlotsPage, SlotBookingPage, SlotView};
use labslot_db::{memory::InMemoryStore, mock::repositories::MockSlotRepo};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{Applicant, TestContext, assert_redirect};

async fn slots_for(server: &TestServer, date: &str) -> Vec<SlotView> {
    let response = server
        .post("/slot-booking/")
        .form(&[("selected_date", date)])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<SlotBookingPage>().slots
}

async fn my_slots(server: &TestServer) -> Vec<SlotView> {
    server.get("/my_slots/").await.json::<MySlotsPage>().booked_slots
}

#[tokio::test]
async fn test_booking_pages_require_login() {
    let ctx = TestContext::new();
    let server = ctx.client();
    let slot_path = format!("/book-slot/{}/", Uuid::new_v4());
    let free_path = format!("/free_slot/{}/", Uuid::new_v4());

    assert_redirect(&server.get("/slot-booking/").await, "/login/");
    assert_redirect(&server.get("/my_slots/").await, "/login/");
    assert_redirect(&server.get(&slot_path).await, "/login/");
    assert_redirect(&server.get(&free_path).await, "/login/");
    assert_redirect(
        &server
            .post("/slot-booking/")
            .form(&[("selected_date", "2024-06-01")])
            .await,
        "/login/",
    );
}

#[test_log::test(tokio::test)]
async fn test_new_date_generates_six_free_slots() {
    let ctx = TestContext::new();
    let (server, _) = ctx.logged_in_client().await;

    let response = server
        .post("/slot-booking/")
        .form(&[("selected_date", "2024-06-01")])
        .await;
    let page = response.json::<SlotBookingPage>();

    assert_eq!(page.selected_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    let windows: Vec<_> = page
        .slots
        .iter()
        .map(|s| (s.slot_number, s.start.as_str(), s.end.as_str()))
        .collect();
    assert_eq!(
        windows,
        vec![
            (1, "00:00", "04:00"),
            (2, "04:00", "08:00"),
            (3, "08:00", "12:00"),
            (4, "12:00", "16:00"),
            (5, "16:00", "20:00"),
            (6, "20:00", "24:00"),
        ]
    );
    assert!(page.slots.iter().all(|s| !s.booked && !s.booked_by_me));
}

#[tokio::test]
async fn test_requesting_a_date_twice_reuses_its_slots() {
    let ctx = TestContext::new();
    let (server, _) = ctx.logged_in_client().await;

    let first = slots_for(&server, "2024-06-01").await;
    let second = slots_for(&server, "2024-06-01").await;

    assert_eq!(first, second);
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    assert_eq!(ctx.state.slots.find_slots_by_date(date).await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_bad_date_returns_to_form_with_message() {
    let ctx = TestContext::new();
    let (server, _) = ctx.logged_in_client().await;

    let response = server
        .post("/slot-booking/")
        .form(&[("selected_date", "01/06/2024")])
        .await;
    assert_redirect(&response, "/slot-booking/");

    let page = server.get("/slot-booking/").await.json::<SlotBookingPage>();
    assert!(page.slots.is_empty());
    assert_eq!(
        page.messages,
        vec![FlashMessage::error("Invalid date format. Use YYYY-MM-DD.")]
    );
}

#[tokio::test]
async fn test_claiming_a_free_slot() {
    let ctx = TestContext::new();
    let (server, _) = ctx.logged_in_client().await;
    let slot = slots_for(&server, "2024-06-01").await.remove(1);

    let response = server.get(&format!("/book-slot/{}/", slot.id)).await;
    assert_redirect(&response, "/my_slots/");

    let mine = my_slots(&server).await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, slot.id);
    assert!(mine[0].booked && mine[0].booked_by_me);

    let refreshed = slots_for(&server, "2024-06-01").await;
    assert!(refreshed[1].booked_by_me);
}

#[tokio::test]
async fn test_claiming_a_booked_slot_changes_nothing() {
    let ctx = TestContext::new();
    let (alice, _) = ctx.logged_in_client().await;
    let (bob, _) = ctx.logged_in_client().await;
    let slot = slots_for(&alice, "2024-06-02").await.remove(0);

    assert_redirect(&alice.get(&format!("/book-slot/{}/", slot.id)).await, "/my_slots/");
    assert_redirect(&bob.get(&format!("/book-slot/{}/", slot.id)).await, "/");

    assert!(my_slots(&bob).await.is_empty());
    assert_eq!(my_slots(&alice).await.len(), 1);

    let seen_by_bob = slots_for(&bob, "2024-06-02").await;
    assert!(seen_by_bob[0].booked);
    assert!(!seen_by_bob[0].booked_by_me);
}

#[tokio::test]
async fn test_releasing_someone_elses_slot_changes_nothing() {
    let ctx = TestContext::new();
    let (alice, _) = ctx.logged_in_client().await;
    let (bob, _) = ctx.logged_in_client().await;
    let slot = slots_for(&alice, "2024-06-03").await.remove(5);
    alice.get(&format!("/book-slot/{}/", slot.id)).await;

    assert_redirect(&bob.get(&format!("/free_slot/{}/", slot.id)).await, "/my_slots/");

    let stored = ctx.state.slots.find_slot_by_id(slot.id).await.unwrap().unwrap();
    assert!(stored.booked);
    assert_eq!(my_slots(&alice).await.len(), 1);
}

#[tokio::test]
async fn test_releasing_own_slot_frees_it() {
    let ctx = TestContext::new();
    let (server, _) = ctx.logged_in_client().await;
    let slot = slots_for(&server, "2024-06-04").await.remove(3);
    server.get(&format!("/book-slot/{}/", slot.id)).await;

    assert_redirect(&server.get(&format!("/free_slot/{}/", slot.id)).await, "/my_slots/");

    assert!(my_slots(&server).await.is_empty());
    let stored = ctx.state.slots.find_slot_by_id(slot.id).await.unwrap().unwrap();
    assert!(!stored.booked);
    assert_eq!(stored.account_id, None);
}

#[tokio::test]
async fn test_unknown_slot_is_not_found() {
    let ctx = TestContext::new();
    let (server, _) = ctx.logged_in_client().await;

    let response = server.get(&format!("/book-slot/{}/", Uuid::new_v4())).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.get(&format!("/free_slot/{}/", Uuid::new_v4())).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_slot_store_failure_is_a_server_error() {
    let mut slots = MockSlotRepo::new();
    slots
        .expect_find_slots_by_date()
        .returning(|_| Err(eyre::eyre!("connection refused")));

    let ctx = TestContext::with_state(ApiState::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(slots),
    ));
    let server = ctx.client();
    let applicant = Applicant::random();
    applicant.sign_up(&server).await;
    applicant.log_in(&server).await;

    let response = server
        .post("/slot-booking/")
        .form(&[("selected_date", "2024-06-01")])
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<serde_json::Value>();
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}
