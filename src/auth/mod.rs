pub mod registry;
pub mod user;

pub use registry::TokenRegistry;
pub use user::User;
