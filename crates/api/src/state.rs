use mongodb::Database;
use std::sync::Arc;
use welfare_config::Settings;
use welfare_services::{
    AuthService,
    dao::{
        CollectorDao, ExpenseDao, MemberDao, NoteDao, PaymentDao, RegistrationDao, UserDao,
    },
};

/// Explicitly constructed dependency container, passed into every handler.
/// Nothing in the system reaches for process-global state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserDao>,
    pub members: Arc<MemberDao>,
    pub collectors: Arc<CollectorDao>,
    pub registrations: Arc<RegistrationDao>,
    pub payments: Arc<PaymentDao>,
    pub expenses: Arc<ExpenseDao>,
    pub notes: Arc<NoteDao>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        let auth = Arc::new(AuthService::new(settings.jwt.clone()));
        let users = Arc::new(UserDao::new(&db));
        let members = Arc::new(MemberDao::new(&db));
        let collectors = Arc::new(CollectorDao::new(&db));
        let registrations = Arc::new(RegistrationDao::new(&db));
        let payments = Arc::new(PaymentDao::new(&db));
        let expenses = Arc::new(ExpenseDao::new(&db));
        let notes = Arc::new(NoteDao::new(&db));

        Self {
            db,
            settings,
            auth,
            users,
            members,
            collectors,
            registrations,
            payments,
            expenses,
            notes,
        }
    }
}
