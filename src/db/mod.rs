pub mod connection;
pub mod organizations;
pub mod reports;
pub mod schema;

pub use connection::Database;
