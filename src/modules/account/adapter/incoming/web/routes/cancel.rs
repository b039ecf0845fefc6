use crate::modules::account::adapter::incoming::web::routes::{error_response, AccountResponseBody};
use crate::modules::account::adapter::incoming::web::tenant::tenant_of;
use crate::modules::account::application::ports::incoming::CancelRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpRequest, Responder};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CancelRequestDto {
    #[schema(example = "aquaman")]
    pub username: String,
    #[schema(example = "sevenseas")]
    pub password: String,
}

/// Cancel own account
///
/// Deletes the account after checking its password.
#[utoipa::path(
    post,
    path = "/cancel",
    tag = "accounts",
    request_body = CancelRequestDto,
    responses(
        (status = 200, description = "Account deleted", body = AccountResponseBody),
        (status = 401, description = "Invalid credentials", body = AccountResponseBody),
        (status = 500, description = "Internal server error", body = AccountResponseBody),
    )
)]
#[post("/cancel")]
pub async fn cancel_handler(
    req: HttpRequest,
    body: web::Json<CancelRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = body.into_inner();
    let tenant_id = tenant_of(&req);

    info!(username = %dto.username, tenant_id = %tenant_id, "Cancel account");

    let request = CancelRequest {
        username: dto.username,
        password: dto.password,
        tenant_id,
    };

    match data.account_service.cancel(request).await {
        Ok(()) => ApiResponse::empty(),
        Err(e) => error_response("cancel", &e),
    }
}
