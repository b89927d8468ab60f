use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::fleet::errors::FleetError;
use crate::domain::trip::errors::TripError;

pub mod create_trip;
pub mod current_account;
pub mod get_trip;
pub mod list_my_trips;
pub mod list_trips;
pub mod login;
pub mod register;
pub mod update_trip;
pub mod update_trip_status;

pub(crate) const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        (status, Json(ApiErrorBody::new(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidPassword(_)
            | AccountError::InvalidRole(_)
            | AccountError::MissingCredentials => ApiError::BadRequest(err.to_string()),
            AccountError::InvalidCredentials | AccountError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AccountError::DuplicateAccount(_) => ApiError::Conflict(err.to_string()),
            AccountError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            AccountError::Password(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::InvalidId(_)
            | TripError::InvalidStatus(_)
            | TripError::MissingStatus
            | TripError::Validation(_) => ApiError::BadRequest(err.to_string()),
            TripError::TruckNotFound(_)
            | TripError::DriverNotFound(_)
            | TripError::TripNotFound(_)
            | TripError::DriverProfileNotFound(_) => ApiError::NotFound(err.to_string()),
            TripError::NotTripOwner => ApiError::Forbidden(err.to_string()),
            TripError::InvalidTransition { .. } | TripError::DuplicateTripNumber(_) => {
                ApiError::Conflict(err.to_string())
            }
            TripError::Directory(inner) => inner.into(),
            TripError::DatabaseError(_) | TripError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<FleetError> for ApiError {
    fn from(err: FleetError) -> Self {
        match err {
            FleetError::InvalidId(_) => ApiError::BadRequest(err.to_string()),
            FleetError::DuplicateResource(_) => ApiError::Conflict(err.to_string()),
            FleetError::InvalidStatus(_) | FleetError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    success: bool,
    error: String,
}

impl ApiErrorBody {
    pub fn new(error: String) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::errors::EmailError;
    use crate::domain::trip::models::TripStatus;

    #[test]
    fn test_account_errors_map_to_status_classes() {
        assert_eq!(
            ApiError::from(AccountError::InvalidEmail(EmailError::InvalidFormat("x".into()))),
            ApiError::BadRequest("Please provide a valid email address".to_string())
        );
        assert_eq!(
            ApiError::from(AccountError::InvalidCredentials),
            ApiError::Unauthorized("Invalid email or password".to_string())
        );
        assert_eq!(
            ApiError::from(AccountError::DuplicateAccount("a@fleet.io".into())),
            ApiError::Conflict("User with this email already exists".to_string())
        );
    }

    #[test]
    fn test_trip_errors_map_to_status_classes() {
        assert_eq!(
            ApiError::from(TripError::TruckNotFound("x".into())),
            ApiError::NotFound("Truck not found".to_string())
        );
        assert_eq!(
            ApiError::from(TripError::NotTripOwner),
            ApiError::Forbidden("Access denied. Trip is assigned to another driver.".to_string())
        );
        assert!(matches!(
            ApiError::from(TripError::InvalidTransition {
                from: TripStatus::Completed,
                to: TripStatus::Pending,
            }),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(TripError::Directory(FleetError::DatabaseError("down".into()))),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let response =
            ApiError::InternalServerError("relation \"trips\" does not exist".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
