use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::messages::AccountData;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::new(
                StatusCode::CREATED,
                RegisterResponseData {
                    user: account.into(),
                },
            )
        })
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
    role: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterAccountCommand, AccountError> {
        // An empty role string counts as not supplied
        let role = self.role.as_deref().filter(|role| !role.is_empty());

        RegisterAccountCommand::parse(
            self.email.as_deref().unwrap_or_default(),
            self.password.unwrap_or_default(),
            self.name,
            role,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user: AccountData,
}
