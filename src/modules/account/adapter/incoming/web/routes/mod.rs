mod account_view;
mod cancel;
mod create;
mod remove;
mod sign_in;
mod sign_out;
mod sign_up;
mod update;

use actix_web::HttpResponse;
use tracing::{error, warn};

use crate::modules::account::application::ports::incoming::AccountError;
use crate::shared::api::ApiResponse;

pub use account_view::{AccountResponseBody, AccountView};
pub use cancel::{__path_cancel_handler, cancel_handler, CancelRequestDto};
pub use create::{__path_create_handler, create_handler, CreateRequestDto};
pub use remove::{__path_remove_handler, remove_handler, RemoveRequestDto};
pub use sign_in::{__path_sign_in_handler, sign_in_handler, SignInRequestDto};
pub use sign_out::{__path_sign_out_handler, sign_out_handler, SignOutRequestDto};
pub use sign_up::{__path_sign_up_handler, sign_up_handler, SignUpRequestDto};
pub use update::{__path_update_handler, update_handler, UpdateRequestDto};

/// Maps a business failure to its status code and outward message.
pub(crate) fn error_response(method: &'static str, err: &AccountError) -> HttpResponse {
    match err {
        AccountError::NotFound | AccountError::CredentialMismatch => {
            warn!(method, "Rejected: invalid credentials");
            ApiResponse::unauthorized(&err.public_message())
        }
        AccountError::Validation(reason) => {
            warn!(method, reason = %reason, "Rejected: invalid input");
            ApiResponse::bad_request(&err.public_message())
        }
        AccountError::AlreadyExists => {
            warn!(method, "Rejected: username taken");
            ApiResponse::conflict(&err.public_message())
        }
        AccountError::StoreUnavailable(_) | AccountError::Hashing => {
            error!(method, error = %err, "Account operation failed");
            ApiResponse::internal_error()
        }
    }
}
