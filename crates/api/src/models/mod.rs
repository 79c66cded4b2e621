//! Domain models for the backoffice.
//!
//! Models hold entities in their stored form: optional text is an empty
//! string when absent, exactly as persisted. The `api` mapper turns them into
//! response shapes. Input types (`New*`, `*Changes`, `*ListParams`) are what
//! services accept.

pub mod app;
pub mod chat;
pub mod dashboard;
pub mod task;
pub mod user;

pub use app::{App, AppListParams};
pub use chat::{ChatConversation, ChatListParams, ChatMessage, NewChatMessage};
pub use dashboard::{
    DashboardOverview, DashboardStats, MoneyValue, MonthlyTotal, RecentSale, RecentSales, Stat,
};
pub use task::{NewTask, Task, TaskChanges, TaskListParams};
pub use user::{InviteUser, NewUser, User, UserChanges, UserListParams};
