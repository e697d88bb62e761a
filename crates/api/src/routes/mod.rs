pub mod auth;
pub mod collector;
pub mod dashboard;
pub mod finance;
pub mod member;
pub mod registration;
pub mod user;
