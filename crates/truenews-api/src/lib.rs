pub mod admin;
pub mod auth;
pub mod darkweb;
pub mod error;
pub mod gangs;
pub mod market;
pub mod middleware;
pub mod news;
pub mod password;
pub mod router;
