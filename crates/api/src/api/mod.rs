//! The operation surface of the backoffice.
//!
//! [`AdminApi`] lists every operation the HTTP layer can invoke, in terms of
//! domain inputs and response DTOs. `services::AdminHandler` is its only
//! implementation; routes depend on the trait, not on the services.

pub mod dto;
pub mod mapper;

use std::future::Future;

use backoffice_core::{AppId, ChatId, Page, TaskId, UserId};

use crate::models::{
    AppListParams, ChatListParams, InviteUser, NewChatMessage, NewTask, NewUser, TaskChanges,
    TaskListParams, UserChanges, UserListParams,
};
use crate::services::{RequestContext, ServiceError};
use dto::{
    AppResponse, ChatMessageResponse, ChatResponse, DashboardOverview, DashboardStats,
    LoginRequest, LoginResponse, RecentSales, TaskResponse, UserResponse,
};

/// Result of every operation.
pub type ApiResult<T> = Result<T, ServiceError>;

/// One method per backoffice operation.
pub trait AdminApi: Send + Sync {
    // Auth
    fn login(
        &self,
        ctx: &RequestContext,
        request: LoginRequest,
    ) -> impl Future<Output = ApiResult<LoginResponse>> + Send;
    fn logout(&self, ctx: &RequestContext) -> impl Future<Output = ApiResult<()>> + Send;
    fn current_user(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = ApiResult<UserResponse>> + Send;

    // Users
    fn list_users(
        &self,
        ctx: &RequestContext,
        params: UserListParams,
    ) -> impl Future<Output = ApiResult<Page<UserResponse>>> + Send;
    fn create_user(
        &self,
        ctx: &RequestContext,
        input: NewUser,
    ) -> impl Future<Output = ApiResult<UserResponse>> + Send;
    fn invite_user(
        &self,
        ctx: &RequestContext,
        input: InviteUser,
    ) -> impl Future<Output = ApiResult<UserResponse>> + Send;
    fn get_user(
        &self,
        ctx: &RequestContext,
        id: UserId,
    ) -> impl Future<Output = ApiResult<UserResponse>> + Send;
    fn update_user(
        &self,
        ctx: &RequestContext,
        id: UserId,
        changes: UserChanges,
    ) -> impl Future<Output = ApiResult<UserResponse>> + Send;
    fn delete_user(
        &self,
        ctx: &RequestContext,
        id: UserId,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    // Tasks
    fn list_tasks(
        &self,
        ctx: &RequestContext,
        params: TaskListParams,
    ) -> impl Future<Output = ApiResult<Page<TaskResponse>>> + Send;
    fn create_task(
        &self,
        ctx: &RequestContext,
        input: NewTask,
    ) -> impl Future<Output = ApiResult<TaskResponse>> + Send;
    fn get_task(
        &self,
        ctx: &RequestContext,
        id: TaskId,
    ) -> impl Future<Output = ApiResult<TaskResponse>> + Send;
    fn update_task(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        changes: TaskChanges,
    ) -> impl Future<Output = ApiResult<TaskResponse>> + Send;
    fn delete_task(
        &self,
        ctx: &RequestContext,
        id: TaskId,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    // Apps
    fn list_apps(
        &self,
        ctx: &RequestContext,
        params: AppListParams,
    ) -> impl Future<Output = ApiResult<Page<AppResponse>>> + Send;
    fn connect_app(
        &self,
        ctx: &RequestContext,
        id: AppId,
    ) -> impl Future<Output = ApiResult<AppResponse>> + Send;
    fn disconnect_app(
        &self,
        ctx: &RequestContext,
        id: AppId,
    ) -> impl Future<Output = ApiResult<AppResponse>> + Send;

    // Chats
    fn list_chats(
        &self,
        ctx: &RequestContext,
        params: ChatListParams,
    ) -> impl Future<Output = ApiResult<Page<ChatResponse>>> + Send;
    fn get_chat(
        &self,
        ctx: &RequestContext,
        id: ChatId,
    ) -> impl Future<Output = ApiResult<ChatResponse>> + Send;
    fn send_message(
        &self,
        ctx: &RequestContext,
        id: ChatId,
        input: NewChatMessage,
    ) -> impl Future<Output = ApiResult<ChatMessageResponse>> + Send;

    // Dashboard
    fn dashboard_stats(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = ApiResult<DashboardStats>> + Send;
    fn dashboard_overview(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = ApiResult<DashboardOverview>> + Send;
    fn recent_sales(&self, ctx: &RequestContext)
    -> impl Future<Output = ApiResult<RecentSales>> + Send;
}
