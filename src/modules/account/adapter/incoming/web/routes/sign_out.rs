use crate::modules::account::adapter::incoming::web::routes::{error_response, AccountResponseBody};
use crate::modules::account::adapter::incoming::web::tenant::tenant_of;
use crate::modules::account::application::ports::incoming::SignOutRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpRequest, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SignOutRequestDto {
    #[schema(example = "aquaman")]
    pub username: String,
}

/// Sign out
///
/// There is no server-side session; always succeeds.
#[utoipa::path(
    post,
    path = "/sign-out",
    tag = "accounts",
    request_body = SignOutRequestDto,
    responses(
        (status = 200, description = "Signed out", body = AccountResponseBody),
    )
)]
#[post("/sign-out")]
pub async fn sign_out_handler(
    req: HttpRequest,
    body: web::Json<SignOutRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = SignOutRequest {
        username: body.into_inner().username,
        tenant_id: tenant_of(&req),
    };

    match data.account_service.sign_out(request).await {
        Ok(()) => ApiResponse::empty(),
        Err(e) => error_response("sign_out", &e),
    }
}
