pub mod auth;
pub mod blogs;
pub mod health;
pub mod users;
