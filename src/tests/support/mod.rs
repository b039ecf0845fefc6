pub mod app_state_builder;
pub mod in_memory_repository;
pub mod log_capture;
pub mod stubs;
