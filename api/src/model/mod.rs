pub mod admin;
pub mod auth;
pub mod calendar;
pub mod event;
pub mod user;
