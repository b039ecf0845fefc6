use crate::modules::account::adapter::incoming::web::routes::{error_response, AccountResponseBody};
use crate::modules::account::adapter::incoming::web::tenant::tenant_of;
use crate::modules::account::application::ports::incoming::UpdateRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpRequest, Responder};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

/// Profile fields that are left out keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateRequestDto {
    #[schema(example = "aquaman")]
    pub username: String,
    #[serde(alias = "password")]
    #[schema(example = "sevenseas")]
    pub current_password: String,
    /// Blank keeps the current password.
    #[schema(example = "tridents")]
    pub new_password: String,
    #[serde(alias = "passwordConfirmation")]
    #[schema(example = "tridents")]
    pub new_password_confirmation: String,
    pub email: Option<String>,
    pub email_confirmation: Option<String>,
    pub description: Option<String>,
    pub given_name: Option<String>,
    pub middle_names: Option<String>,
    pub family_name: Option<String>,
}

/// Update own account
///
/// Requires the current password.
#[utoipa::path(
    post,
    path = "/update",
    tag = "accounts",
    request_body = UpdateRequestDto,
    responses(
        (status = 200, description = "Account updated", body = AccountResponseBody),
        (status = 400, description = "Invalid input", body = AccountResponseBody),
        (status = 401, description = "Invalid credentials", body = AccountResponseBody),
        (status = 500, description = "Internal server error", body = AccountResponseBody),
    )
)]
#[post("/update")]
pub async fn update_handler(
    req: HttpRequest,
    body: web::Json<UpdateRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = body.into_inner();
    let tenant_id = tenant_of(&req);

    info!(username = %dto.username, tenant_id = %tenant_id, "Update account");

    let request = UpdateRequest {
        username: dto.username,
        tenant_id,
        current_password: dto.current_password,
        new_password: dto.new_password,
        new_password_confirmation: dto.new_password_confirmation,
        email: dto.email,
        email_confirmation: dto.email_confirmation,
        description: dto.description,
        given_name: dto.given_name,
        middle_names: dto.middle_names,
        family_name: dto.family_name,
    };

    match data.account_service.update(request).await {
        Ok(()) => ApiResponse::empty(),
        Err(e) => error_response("update", &e),
    }
}
