use crate::modules::account::adapter::incoming::web::routes::{
    error_response, AccountResponseBody, AccountView,
};
use crate::modules::account::adapter::incoming::web::tenant::tenant_of;
use crate::modules::account::application::ports::incoming::SignUpRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpRequest, Responder};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SignUpRequestDto {
    #[schema(example = "aquaman")]
    pub username: String,
    #[schema(example = "sevenseas")]
    pub password: String,
    #[schema(example = "arthur@atlantis.io")]
    pub email: String,
    /// Optional; must match `email` when present.
    #[schema(example = "arthur@atlantis.io")]
    pub email_confirmation: String,
}

/// Self-service registration
///
/// Registers a new account in the tenant named by the `Host` header.
#[utoipa::path(
    post,
    path = "/sign-up",
    tag = "accounts",
    request_body = SignUpRequestDto,
    responses(
        (status = 200, description = "Account created", body = AccountResponseBody),
        (status = 400, description = "Invalid input", body = AccountResponseBody),
        (status = 409, description = "Username already registered", body = AccountResponseBody),
        (status = 500, description = "Internal server error", body = AccountResponseBody),
    )
)]
#[post("/sign-up")]
pub async fn sign_up_handler(
    req: HttpRequest,
    body: web::Json<SignUpRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = body.into_inner();
    let tenant_id = tenant_of(&req);

    info!(username = %dto.username, tenant_id = %tenant_id, "Sign up attempt");

    let request = SignUpRequest {
        username: dto.username,
        password: dto.password,
        email: dto.email,
        email_confirmation: dto.email_confirmation,
        tenant_id,
    };

    match data.account_service.sign_up(request).await {
        Ok(account) => {
            info!(account_id = %account.id, "Account signed up");
            ApiResponse::user(AccountView::from(account))
        }
        Err(e) => error_response("sign_up", &e),
    }
}
