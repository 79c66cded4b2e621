//! Dispatch façade: [`AdminApi`] over the command services.

use backoffice_core::{AppId, ChatId, Page, TaskId, UserId};

use super::{RequestContext, Services};
use crate::api::dto::{
    AppResponse, ChatMessageResponse, ChatResponse, DashboardOverview, DashboardStats,
    LoginRequest, LoginResponse, RecentSales, TaskResponse, UserResponse,
};
use crate::api::{AdminApi, ApiResult};
use crate::models::{
    AppListParams, ChatListParams, InviteUser, NewChatMessage, NewTask, NewUser, TaskChanges,
    TaskListParams, UserChanges, UserListParams,
};

/// Implements every operation by delegating to one service and mapping the
/// result into its response shape.
#[derive(Debug, Clone)]
pub struct AdminHandler {
    services: Services,
}

impl AdminHandler {
    #[must_use]
    pub const fn new(services: Services) -> Self {
        Self { services }
    }
}

impl AdminApi for AdminHandler {
    // =========================================================================
    // Auth
    // =========================================================================

    async fn login(&self, ctx: &RequestContext, request: LoginRequest) -> ApiResult<LoginResponse> {
        self.services
            .auth
            .login(ctx, &request.email, &request.password)
            .await
            .map(Into::into)
    }

    async fn logout(&self, ctx: &RequestContext) -> ApiResult<()> {
        self.services.auth.logout(ctx)
    }

    async fn current_user(&self, ctx: &RequestContext) -> ApiResult<UserResponse> {
        self.services.auth.current_user(ctx).map(Into::into)
    }

    // =========================================================================
    // Users
    // =========================================================================

    async fn list_users(
        &self,
        ctx: &RequestContext,
        params: UserListParams,
    ) -> ApiResult<Page<UserResponse>> {
        let page = self.services.users.list(ctx, &params).await?;
        Ok(page.map(Into::into))
    }

    async fn create_user(&self, ctx: &RequestContext, input: NewUser) -> ApiResult<UserResponse> {
        self.services.users.create(ctx, &input).await.map(Into::into)
    }

    async fn invite_user(
        &self,
        ctx: &RequestContext,
        input: InviteUser,
    ) -> ApiResult<UserResponse> {
        self.services.users.invite(ctx, &input).await.map(Into::into)
    }

    async fn get_user(&self, ctx: &RequestContext, id: UserId) -> ApiResult<UserResponse> {
        self.services.users.get(ctx, id).await.map(Into::into)
    }

    async fn update_user(
        &self,
        ctx: &RequestContext,
        id: UserId,
        changes: UserChanges,
    ) -> ApiResult<UserResponse> {
        self.services
            .users
            .update(ctx, id, &changes)
            .await
            .map(Into::into)
    }

    async fn delete_user(&self, ctx: &RequestContext, id: UserId) -> ApiResult<()> {
        self.services.users.delete(ctx, id).await
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    async fn list_tasks(
        &self,
        ctx: &RequestContext,
        params: TaskListParams,
    ) -> ApiResult<Page<TaskResponse>> {
        let page = self.services.tasks.list(ctx, &params).await?;
        Ok(page.map(Into::into))
    }

    async fn create_task(&self, ctx: &RequestContext, input: NewTask) -> ApiResult<TaskResponse> {
        self.services.tasks.create(ctx, &input).await.map(Into::into)
    }

    async fn get_task(&self, ctx: &RequestContext, id: TaskId) -> ApiResult<TaskResponse> {
        self.services.tasks.get(ctx, &id).await.map(Into::into)
    }

    async fn update_task(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        changes: TaskChanges,
    ) -> ApiResult<TaskResponse> {
        self.services
            .tasks
            .update(ctx, &id, &changes)
            .await
            .map(Into::into)
    }

    async fn delete_task(&self, ctx: &RequestContext, id: TaskId) -> ApiResult<()> {
        self.services.tasks.delete(ctx, &id).await
    }

    // =========================================================================
    // Apps
    // =========================================================================

    async fn list_apps(
        &self,
        ctx: &RequestContext,
        params: AppListParams,
    ) -> ApiResult<Page<AppResponse>> {
        let page = self.services.apps.list(ctx, &params).await?;
        Ok(page.map(Into::into))
    }

    async fn connect_app(&self, ctx: &RequestContext, id: AppId) -> ApiResult<AppResponse> {
        self.services.apps.connect(ctx, &id).await.map(Into::into)
    }

    async fn disconnect_app(&self, ctx: &RequestContext, id: AppId) -> ApiResult<AppResponse> {
        self.services.apps.disconnect(ctx, &id).await.map(Into::into)
    }

    // =========================================================================
    // Chats
    // =========================================================================

    async fn list_chats(
        &self,
        ctx: &RequestContext,
        params: ChatListParams,
    ) -> ApiResult<Page<ChatResponse>> {
        let page = self.services.chats.list(ctx, &params).await?;
        Ok(page.map(Into::into))
    }

    async fn get_chat(&self, ctx: &RequestContext, id: ChatId) -> ApiResult<ChatResponse> {
        self.services.chats.get(ctx, &id).await.map(Into::into)
    }

    async fn send_message(
        &self,
        ctx: &RequestContext,
        id: ChatId,
        input: NewChatMessage,
    ) -> ApiResult<ChatMessageResponse> {
        self.services
            .chats
            .send_message(ctx, &id, &input)
            .await
            .map(Into::into)
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    async fn dashboard_stats(&self, ctx: &RequestContext) -> ApiResult<DashboardStats> {
        self.services.dashboard.stats(ctx)
    }

    async fn dashboard_overview(&self, ctx: &RequestContext) -> ApiResult<DashboardOverview> {
        self.services.dashboard.overview(ctx)
    }

    async fn recent_sales(&self, ctx: &RequestContext) -> ApiResult<RecentSales> {
        self.services.dashboard.recent_sales(ctx)
    }
}
