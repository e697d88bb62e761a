pub mod base;
pub mod collector;
pub mod expense;
pub mod member;
pub mod note;
pub mod payment;
pub mod registration;
pub mod user;

pub use base::BaseDao;
pub use collector::CollectorDao;
pub use expense::ExpenseDao;
pub use member::MemberDao;
pub use note::NoteDao;
pub use payment::PaymentDao;
pub use registration::RegistrationDao;
pub use user::UserDao;
