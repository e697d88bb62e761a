mod collector;
mod expense;
mod member;
mod note;
mod payment;
mod registration;
mod user;

pub use collector::*;
pub use expense::*;
pub use member::*;
pub use note::*;
pub use payment::*;
pub use registration::*;
pub use user::*;
