pub mod routes;
pub mod tenant;
