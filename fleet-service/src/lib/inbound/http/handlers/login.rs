use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::messages::AccountData;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;

    let command = LoginCommand {
        email: body.email.unwrap_or_default(),
        password: body.password.unwrap_or_default(),
    };

    state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|outcome| {
            ApiSuccess::new(
                StatusCode::OK,
                LoginResponseData {
                    user: (&outcome.account).into(),
                    token: outcome.token,
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: AccountData,
    pub token: String,
}
