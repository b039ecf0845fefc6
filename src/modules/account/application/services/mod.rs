pub mod account_lifecycle;

pub use account_lifecycle::AccountLifecycleService;
