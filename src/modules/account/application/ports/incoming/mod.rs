pub mod account_service;

pub use account_service::{
    AccountError, AccountService, CancelRequest, CreateRequest, Redacted, RemoveRequest,
    SignInRequest, SignOutRequest, SignUpRequest, UpdateRequest, PASSWORD_MASK,
};
