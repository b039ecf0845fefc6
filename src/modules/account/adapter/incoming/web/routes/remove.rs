use crate::modules::account::adapter::incoming::web::routes::{error_response, AccountResponseBody};
use crate::modules::account::adapter::incoming::web::tenant::tenant_of;
use crate::modules::account::application::ports::incoming::RemoveRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpRequest, Responder};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoveRequestDto {
    #[schema(example = "aquaman")]
    pub username: String,
    /// Optional; when present it must match the stored email.
    #[schema(example = "arthur@atlantis.io")]
    pub email: String,
}

/// Administrative removal
///
/// Hard deletes an account without its password.
#[utoipa::path(
    post,
    path = "/remove",
    tag = "accounts",
    request_body = RemoveRequestDto,
    responses(
        (status = 200, description = "Account deleted", body = AccountResponseBody),
        (status = 401, description = "No matching account", body = AccountResponseBody),
        (status = 500, description = "Internal server error", body = AccountResponseBody),
    )
)]
#[post("/remove")]
pub async fn remove_handler(
    req: HttpRequest,
    body: web::Json<RemoveRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = body.into_inner();
    let tenant_id = tenant_of(&req);

    info!(username = %dto.username, tenant_id = %tenant_id, "Remove account");

    let request = RemoveRequest {
        username: dto.username,
        email: dto.email,
        tenant_id,
    };

    match data.account_service.remove(request).await {
        Ok(()) => ApiResponse::empty(),
        Err(e) => error_response("remove", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::application::ports::incoming::AccountError;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::{MockAccounts, ScriptedAccountService};
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_remove_passes_email_through() {
        let mut service = MockAccounts::new();
        service
            .expect_remove()
            .withf(|request| request.username == "aquaman" && request.email == "a@x.com")
            .times(1)
            .returning(|_| Ok(()));
        let app_state = TestAppStateBuilder::default()
            .with_account_service(service)
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(remove_handler)).await;

        let req = test::TestRequest::post()
            .uri("/remove")
            .insert_header(("Host", "t1.example.com"))
            .set_json(serde_json::json!({ "username": "aquaman", "email": "a@x.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_remove_unknown_account() {
        let app_state = TestAppStateBuilder::default()
            .with_account_service(ScriptedAccountService::failing(AccountError::NotFound))
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(remove_handler)).await;

        let req = test::TestRequest::post()
            .uri("/remove")
            .set_json(serde_json::json!({ "username": "ghost" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
