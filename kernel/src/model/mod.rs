pub mod auth;
pub mod calendar;
pub mod event;
pub mod id;
pub mod role;
pub mod stats;
pub mod user;
