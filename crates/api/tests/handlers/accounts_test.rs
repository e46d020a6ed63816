use std::sync::Arc;

use axum::http::StatusCode;
use labslot_api::{ApiState, config::ApiConfig};
use labslot_core::models::{
    account::SignupRequest,
    page::{FlashLevel, FlashMessage, FormPage, HomePage},
};
use labslot_db::{memory::InMemoryStore, mock::repositories::MockAccountRepo};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::test_utils::{Applicant, TestContext, assert_redirect, test_config};

async fn login_messages(server: &axum_test::TestServer) -> Vec<FlashMessage> {
    server.get("/login/").await.json::<FormPage>().messages
}

async fn signup_messages(server: &axum_test::TestServer) -> Vec<FlashMessage> {
    server.get("/signup/").await.json::<FormPage>().messages
}

#[test_log::test(tokio::test)]
async fn test_signup_then_login_succeeds() {
    let ctx = TestContext::new();
    let server = ctx.client();
    let applicant = Applicant::random();

    let response = applicant.sign_up(&server).await;
    assert_redirect(&response, "/login/");
    assert_eq!(
        login_messages(&server).await,
        vec![FlashMessage::success("Account created successfully! Please log in.")]
    );

    let response = applicant.log_in(&server).await;
    assert_redirect(&response, "/");

    let home = server.get("/").await.json::<HomePage>();
    let account = home.account.expect("home page should be personalized");
    assert_eq!(account.name, applicant.name);
    assert_eq!(account.email, applicant.email);
    assert!(!account.is_staff);
}

#[tokio::test]
async fn test_messages_are_shown_once() {
    let ctx = TestContext::new();
    let server = ctx.client();

    Applicant::random().sign_up(&server).await;

    assert_eq!(login_messages(&server).await.len(), 1);
    assert!(login_messages(&server).await.is_empty());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let ctx = TestContext::new();
    let server = ctx.client();
    let applicant = Applicant::random();
    applicant.sign_up(&server).await;
    login_messages(&server).await;

    let twin = Applicant {
        phone: "5550000001".to_string(),
        ..applicant.clone()
    };
    let response = twin.sign_up(&server).await;

    assert_redirect(&response, "/login/");
    assert_eq!(
        login_messages(&server).await,
        vec![FlashMessage::error(
            "Email is already registered. Proceed to Login."
        )]
    );
    assert_eq!(ctx.state.accounts.count_accounts().await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_email_with_different_domain_case_is_rejected() {
    let ctx = TestContext::new();
    let server = ctx.client();
    let applicant = Applicant::random();
    applicant.sign_up(&server).await;

    let shouting = Applicant {
        email: applicant.email.replace(".com", ".COM").replace(".org", ".ORG").replace(".net", ".NET"),
        phone: "5550000002".to_string(),
        ..applicant.clone()
    };
    assert_redirect(&shouting.sign_up(&server).await, "/login/");
    assert_eq!(ctx.state.accounts.count_accounts().await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_phone_is_rejected() {
    let ctx = TestContext::new();
    let server = ctx.client();
    let applicant = Applicant::random();
    applicant.sign_up(&server).await;
    login_messages(&server).await;

    let other = Applicant {
        phone: applicant.phone.clone(),
        ..Applicant::random()
    };
    let response = other.sign_up(&server).await;

    assert_redirect(&response, "/signup/");
    assert_eq!(
        signup_messages(&server).await,
        vec![FlashMessage::error("Phone number is already registered.")]
    );
    assert_eq!(ctx.state.accounts.count_accounts().await.unwrap(), 1);
}

#[rstest]
#[case::missing_name(SignupRequest { name: None, ..Applicant::random().signup_form() }, "Please fill in all fields.")]
#[case::blank_password(SignupRequest { password: Some(String::new()), ..Applicant::random().signup_form() }, "Please fill in all fields.")]
#[case::mismatch(SignupRequest { confirm_password: Some("something else".to_string()), ..Applicant::random().signup_form() }, "Passwords do not match.")]
#[tokio::test]
async fn test_invalid_signup_returns_to_form(#[case] form: SignupRequest, #[case] message: &str) {
    let ctx = TestContext::new();
    let server = ctx.client();

    let response = server.post("/signup/").form(&form).await;

    assert_redirect(&response, "/signup/");
    assert_eq!(signup_messages(&server).await, vec![FlashMessage::error(message)]);
    assert_eq!(ctx.state.accounts.count_accounts().await.unwrap(), 0);
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let ctx = TestContext::new();
    let server = ctx.client();
    let applicant = Applicant::random();
    applicant.sign_up(&server).await;
    login_messages(&server).await;

    let impostor = Applicant {
        password: "not the password".to_string(),
        ..applicant
    };
    assert_redirect(&impostor.log_in(&server).await, "/login/");

    let messages = login_messages(&server).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, FlashLevel::Error);
    assert_eq!(messages[0].text, "Invalid credentials.");
    assert!(server.get("/").await.json::<HomePage>().account.is_none());
}

#[tokio::test]
async fn test_login_accepts_username_field() {
    let ctx = TestContext::new();
    let server = ctx.client();
    let applicant = Applicant::random();
    applicant.sign_up(&server).await;

    let response = server
        .post("/login/")
        .form(&[
            ("username", applicant.email.as_str()),
            ("password", applicant.password.as_str()),
        ])
        .await;

    assert_redirect(&response, "/");
}

#[tokio::test]
async fn test_login_with_both_email_and_username_uses_email() {
    let ctx = TestContext::new();
    let server = ctx.client();
    let applicant = Applicant::random();
    applicant.sign_up(&server).await;
    login_messages(&server).await;

    let response = server
        .post("/login/")
        .form(&[
            ("email", applicant.email.as_str()),
            ("username", "someone-else"),
            ("password", applicant.password.as_str()),
        ])
        .await;
    assert_redirect(&response, "/");

    let home = server.get("/").await.json::<HomePage>();
    assert_eq!(home.account.map(|a| a.email), Some(applicant.email));
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let ctx = TestContext::new();
    let (server, _applicant) = ctx.logged_in_client().await;

    assert_redirect(&server.get("/logout/").await, "/");

    let home = server.get("/").await.json::<HomePage>();
    assert!(home.account.is_none());
    assert_eq!(
        home.messages,
        vec![FlashMessage::success("You have been logged out.")]
    );
    assert_redirect(&server.get("/my_slots/").await, "/login/");
}

#[tokio::test]
async fn test_anonymous_home_page() {
    let ctx = TestContext::new();
    let response = ctx.client().get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let home = response.json::<HomePage>();
    assert!(home.account.is_none());
    assert!(home.messages.is_empty());
}

#[tokio::test]
async fn test_store_failure_during_signup_is_reported() {
    let mut accounts = MockAccountRepo::new();
    accounts.expect_email_exists().returning(|_| Ok(false));
    accounts.expect_phone_exists().returning(|_| Ok(false));
    accounts
        .expect_create_account()
        .times(1)
        .returning(|_| Err(eyre::eyre!("unique constraint violated")));

    let ctx = TestContext::with_state(ApiState::new(
        Arc::new(accounts),
        Arc::new(InMemoryStore::new()),
    ));
    let server = ctx.client();

    assert_redirect(&Applicant::random().sign_up(&server).await, "/signup/");
    assert_eq!(
        signup_messages(&server).await,
        vec![FlashMessage::error(
            "Error creating account: unique constraint violated"
        )]
    );
}

#[tokio::test]
async fn test_expired_session_is_treated_as_anonymous() {
    let ctx = TestContext::new();
    let config = ApiConfig {
        session_inactivity_minutes: 0,
        ..test_config()
    };
    let server = ctx.client_with(&config);
    let applicant = Applicant::random();
    applicant.sign_up(&server).await;

    assert_redirect(&applicant.log_in(&server).await, "/");

    assert_redirect(&server.get("/my_slots/").await, "/login/");
    assert!(server.get("/").await.json::<HomePage>().account.is_none());
}
