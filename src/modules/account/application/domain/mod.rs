pub mod entities;
pub mod identity;

pub use entities::{Account, Actor, NewAccount};
