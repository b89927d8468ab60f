use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::SessionIdentity;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::messages::AccountData;
use crate::inbound::http::router::AppState;

pub async fn current_account(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .get_account(&identity.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
