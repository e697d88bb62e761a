pub mod auth;
pub mod dao;
pub mod finance;
pub mod grouping;
pub mod member_number;
pub mod migration;

pub use auth::AuthService;
pub use dao::*;
