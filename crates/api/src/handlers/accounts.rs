//! Home page, signup, login and logout.

use axum::{Form, Json, extract::State, response::Redirect};
use labslot_core::{
    accounts::{SignupError, normalize_email},
    models::{
        account::{AccountSummary, LoginRequest, NewAccount, SignupRequest},
        page::{FlashMessage, FormPage, HomePage},
    },
};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    ApiState,
    middleware::{auth, error_handling::AppError, flash},
    routes::paths,
};

#[axum::debug_handler]
pub async fn home(
    State(state): State<Arc<ApiState>>,
    session: Session,
) -> Result<Json<HomePage>, AppError> {
    let account = auth::session_account(&session, &state).await?;
    let messages = flash::take(&session).await?;

    Ok(Json(HomePage {
        account: account.as_ref().map(AccountSummary::from),
        messages,
    }))
}

#[axum::debug_handler]
pub async fn signup_page(session: Session) -> Result<Json<FormPage>, AppError> {
    Ok(Json(FormPage {
        messages: flash::take(&session).await?,
    }))
}

#[axum::debug_handler]
pub async fn signup(
    State(state): State<Arc<ApiState>>,
    session: Session,
    Form(form): Form<SignupRequest>,
) -> Result<Redirect, AppError> {
    let signup = match form.validate() {
        Ok(signup) => signup,
        Err(rejection) => return reject_signup(&session, rejection).await,
    };

    if state.accounts.email_exists(&signup.email).await? {
        return reject_signup(&session, SignupError::EmailTaken).await;
    }
    if state.accounts.phone_exists(&signup.phone).await? {
        return reject_signup(&session, SignupError::PhoneTaken).await;
    }

    let new_account = NewAccount {
        name: signup.name,
        email: signup.email,
        phone: signup.phone,
        password_hash: auth::hash_password(&signup.password)?,
        is_staff: false,
    };

    match state.accounts.create_account(&new_account).await {
        Ok(account) => {
            info!("Account created: id={}, email={}", account.id, account.email);
            flash::redirect(
                &session,
                FlashMessage::success("Account created successfully! Please log in."),
                paths::LOGIN,
            )
            .await
        }
        Err(e) => {
            warn!("Account creation failed for {}: {}", new_account.email, e);
            flash::redirect(
                &session,
                FlashMessage::error(format!("Error creating account: {}", e)),
                paths::SIGNUP,
            )
            .await
        }
    }
}

/// An already registered email is sent on to the login page; every other
/// rejection goes back to the signup form.
async fn reject_signup(session: &Session, rejection: SignupError) -> Result<Redirect, AppError> {
    let target = match rejection {
        SignupError::EmailTaken => paths::LOGIN,
        _ => paths::SIGNUP,
    };
    flash::redirect(session, FlashMessage::error(rejection.to_string()), target).await
}

#[axum::debug_handler]
pub async fn login_page(session: Session) -> Result<Json<FormPage>, AppError> {
    Ok(Json(FormPage {
        messages: flash::take(&session).await?,
    }))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    session: Session,
    Form(form): Form<LoginRequest>,
) -> Result<Redirect, AppError> {
    let email = normalize_email(form.login_email());
    let password = form.password.unwrap_or_default();

    match auth::authenticate(state.accounts.as_ref(), &email, &password).await? {
        Some(account) => {
            auth::start_session(&session, &account).await?;
            info!("Account logged in: id={}", account.id);
            Ok(Redirect::to(paths::HOME))
        }
        None => {
            flash::redirect(
                &session,
                FlashMessage::error("Invalid credentials."),
                paths::LOGIN,
            )
            .await
        }
    }
}

#[axum::debug_handler]
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await?;
    flash::redirect(
        &session,
        FlashMessage::success("You have been logged out."),
        paths::HOME,
    )
    .await
}
