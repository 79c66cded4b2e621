//! Command services for the backoffice.
//!
//! # Services
//!
//! - `users` - Create, invite, update and delete backoffice users
//! - `tasks` - Task CRUD with sequence-assigned IDs
//! - `apps` - App catalogue listing and connect/disconnect
//! - `chats` - Conversations and message posting
//! - `dashboard` - Sample dashboard figures
//! - `auth` - Password login (token issuance only)
//!
//! Every operation takes a [`RequestContext`] and checks it once on entry.

pub mod apps;
pub mod auth;
pub mod chats;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod handler;
pub mod tasks;
pub mod users;

use sqlx::PgPool;

pub use apps::AppService;
pub use auth::{AuthService, LoginOutcome, hash_password};
pub use chats::ChatService;
pub use context::RequestContext;
pub use dashboard::DashboardService;
pub use error::ServiceError;
pub use handler::AdminHandler;
pub use tasks::TaskService;
pub use users::UserService;

/// Every service the dispatch façade delegates to.
#[derive(Debug, Clone)]
pub struct Services {
    pub users: UserService,
    pub tasks: TaskService,
    pub apps: AppService,
    pub chats: ChatService,
    pub dashboard: DashboardService,
    pub auth: AuthService,
}

impl Services {
    /// Build every service over one shared pool.
    #[must_use]
    pub fn new(pool: &PgPool) -> Self {
        Self {
            users: UserService::new(pool.clone()),
            tasks: TaskService::new(pool.clone()),
            apps: AppService::new(pool.clone()),
            chats: ChatService::new(pool.clone()),
            dashboard: DashboardService::new(),
            auth: AuthService::new(pool.clone()),
        }
    }
}
