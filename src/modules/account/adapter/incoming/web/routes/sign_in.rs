use crate::modules::account::adapter::incoming::web::routes::{
    error_response, AccountResponseBody, AccountView,
};
use crate::modules::account::adapter::incoming::web::tenant::tenant_of;
use crate::modules::account::application::ports::incoming::SignInRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpRequest, Responder};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SignInRequestDto {
    #[schema(example = "aquaman")]
    pub username: String,
    #[schema(example = "sevenseas")]
    pub password: String,
}

/// Sign in
///
/// Unknown usernames and wrong passwords get the same answer.
#[utoipa::path(
    post,
    path = "/sign-in",
    tag = "accounts",
    request_body = SignInRequestDto,
    responses(
        (status = 200, description = "Signed in", body = AccountResponseBody),
        (
            status = 401,
            description = "Invalid credentials",
            body = AccountResponseBody,
            example = json!({ "user": null, "error": "Invalid credentials" })
        ),
        (status = 500, description = "Internal server error", body = AccountResponseBody),
    )
)]
#[post("/sign-in")]
pub async fn sign_in_handler(
    req: HttpRequest,
    body: web::Json<SignInRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = body.into_inner();
    let tenant_id = tenant_of(&req);

    info!(username = %dto.username, tenant_id = %tenant_id, "Sign in attempt");

    let request = SignInRequest {
        username: dto.username,
        password: dto.password,
        tenant_id,
    };

    match data.account_service.sign_in(request).await {
        Ok(account) => ApiResponse::user(AccountView::from(account)),
        Err(e) => error_response("sign_in", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::application::ports::incoming::AccountError;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::{sample_account, MockAccounts, ScriptedAccountService};
    use actix_web::{http::StatusCode, test, App};

    fn sign_in_json() -> serde_json::Value {
        serde_json::json!({ "username": "aquaman", "password": "sevenseas" })
    }

    #[actix_web::test]
    async fn test_sign_in_uses_host_as_tenant() {
        let mut service = MockAccounts::new();
        service
            .expect_sign_in()
            .withf(|request| request.tenant_id == "t1.example.com")
            .times(1)
            .returning(|_| Ok(sample_account()));
        let app_state = TestAppStateBuilder::default()
            .with_account_service(service)
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(sign_in_handler)).await;

        let req = test::TestRequest::post()
            .uri("/sign-in")
            .insert_header(("Host", "t1.example.com:8080"))
            .set_json(sign_in_json())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["username"], "aquaman");
        assert_eq!(body["error"], "");
    }

    #[actix_web::test]
    async fn test_sign_in_failures_look_the_same() {
        let mut bodies = Vec::new();

        for err in [AccountError::NotFound, AccountError::CredentialMismatch] {
            let app_state = TestAppStateBuilder::default()
                .with_account_service(ScriptedAccountService::failing(err))
                .build();
            let app =
                test::init_service(App::new().app_data(app_state).service(sign_in_handler)).await;

            let req = test::TestRequest::post()
                .uri("/sign-in")
                .insert_header(("Host", "t1.example.com"))
                .set_json(sign_in_json())
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let body: serde_json::Value = test::read_body_json(resp).await;
            bodies.push(body);
        }

        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[0]["error"], "Invalid credentials");
    }

    #[actix_web::test]
    async fn test_sign_in_store_failure_hides_details() {
        let app_state = TestAppStateBuilder::default()
            .with_account_service(ScriptedAccountService::failing(
                AccountError::StoreUnavailable("connection refused at 10.0.0.3".into()),
            ))
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(sign_in_handler)).await;

        let req = test::TestRequest::post()
            .uri("/sign-in")
            .set_json(sign_in_json())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Internal server error");
    }
}
