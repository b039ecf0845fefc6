// src/shared/api/response.rs
use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// Every account endpoint answers with this shape. `error` is empty on success.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub user: Option<T>,
    pub error: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn user(data: T) -> HttpResponse {
        HttpResponse::Ok().json(ApiResponse {
            user: Some(data),
            error: String::new(),
        })
    }
}

impl ApiResponse<()> {
    pub fn empty() -> HttpResponse {
        HttpResponse::Ok().json(ApiResponse::<()> {
            user: None,
            error: String::new(),
        })
    }

    pub fn error(status: StatusCode, message: &str) -> HttpResponse {
        HttpResponse::build(status).json(ApiResponse::<()> {
            user: None,
            error: message.to_string(),
        })
    }

    pub fn bad_request(message: &str) -> HttpResponse {
        Self::error(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: &str) -> HttpResponse {
        Self::error(StatusCode::UNAUTHORIZED, message)
    }

    pub fn conflict(message: &str) -> HttpResponse {
        Self::error(StatusCode::CONFLICT, message)
    }

    pub fn internal_error() -> HttpResponse {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
