use crate::modules::account::adapter::incoming::web::routes::{
    error_response, AccountResponseBody, AccountView,
};
use crate::modules::account::adapter::incoming::web::tenant::tenant_of;
use crate::modules::account::application::ports::incoming::CreateRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpRequest, Responder};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateRequestDto {
    #[schema(example = "mera")]
    pub username: String,
    #[schema(example = "xebel")]
    pub password: String,
    #[schema(example = "mera@xebel.io")]
    pub email: String,
}

/// Administrative account creation
///
/// Same rules as sign-up without the email confirmation. The account is
/// recorded as system-created.
#[utoipa::path(
    post,
    path = "/create",
    tag = "accounts",
    request_body = CreateRequestDto,
    responses(
        (status = 200, description = "Account created", body = AccountResponseBody),
        (status = 400, description = "Invalid input", body = AccountResponseBody),
        (status = 409, description = "Username already registered", body = AccountResponseBody),
        (status = 500, description = "Internal server error", body = AccountResponseBody),
    )
)]
#[post("/create")]
pub async fn create_handler(
    req: HttpRequest,
    body: web::Json<CreateRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = body.into_inner();
    let tenant_id = tenant_of(&req);

    info!(username = %dto.username, tenant_id = %tenant_id, "Create account");

    let request = CreateRequest {
        username: dto.username,
        password: dto.password,
        email: dto.email,
        tenant_id,
    };

    match data.account_service.create(request).await {
        Ok(account) => ApiResponse::user(AccountView::from(account)),
        Err(e) => error_response("create", &e),
    }
}
