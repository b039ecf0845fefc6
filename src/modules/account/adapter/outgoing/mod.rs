pub mod account_repository_postgres;
pub mod sea_orm_entity;
pub mod security;
pub mod store;
