pub mod reporter;
pub mod server;
pub mod store;
