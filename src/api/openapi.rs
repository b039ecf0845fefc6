use utoipa::OpenApi;

use crate::modules::account::adapter::incoming::web::routes::{
    AccountResponseBody, AccountView, CancelRequestDto, CreateRequestDto, RemoveRequestDto,
    SignInRequestDto, SignOutRequestDto, SignUpRequestDto, UpdateRequestDto,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tenant Accounts API",
        version = "1.0.0",
        description = "Multi-tenant account lifecycle. The tenant is the hostname of the Host header."
    ),
    paths(
        crate::modules::account::adapter::incoming::web::routes::sign_up_handler,
        crate::modules::account::adapter::incoming::web::routes::sign_in_handler,
        crate::modules::account::adapter::incoming::web::routes::sign_out_handler,
        crate::modules::account::adapter::incoming::web::routes::cancel_handler,
        crate::modules::account::adapter::incoming::web::routes::create_handler,
        crate::modules::account::adapter::incoming::web::routes::update_handler,
        crate::modules::account::adapter::incoming::web::routes::remove_handler,
    ),
    components(
        schemas(
            AccountResponseBody,
            AccountView,
            SignUpRequestDto,
            SignInRequestDto,
            SignOutRequestDto,
            CancelRequestDto,
            CreateRequestDto,
            UpdateRequestDto,
            RemoveRequestDto
        )
    ),
    tags(
        (name = "accounts", description = "Account lifecycle endpoints"),
    )
)]
pub struct ApiDoc;
