use async_trait::async_trait;
use reqwest::Method;

use crate::{
    domain::types::UserId,
    domain::user::{NewUser, UpdateUser, User},
    dto::envelope::ListEnvelope,
    pagination::TotalCount,
    repository::errors::RepositoryResult,
    repository::http::{HttpRepository, none_on_404, push_pagination, split_list},
    repository::{UserListQuery, UserReader, UserWriter},
};

#[async_trait]
impl UserReader for HttpRepository {
    async fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let result = Self::send_json(self.authed(Method::GET, &format!("/users/{id}"))?).await;
        none_on_404(result)
    }

    async fn list_users(&self, query: UserListQuery) -> RepositoryResult<(TotalCount, Vec<User>)> {
        let mut params: Vec<(String, String)> = Vec::new();
        push_pagination(&mut params, &query.pagination);

        let envelope: ListEnvelope<User> =
            Self::send_json(self.authed(Method::GET, "/users/")?.query(&params)).await?;
        Ok(split_list(envelope, &query.pagination))
    }

    async fn current_user(&self) -> RepositoryResult<User> {
        Self::send_json(self.authed(Method::GET, "/users/me")?).await
    }
}

#[async_trait]
impl UserWriter for HttpRepository {
    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        Self::send_json(self.authed(Method::POST, "/users/")?.json(new_user)).await
    }

    async fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User> {
        Self::send_json(
            self.authed(Method::PUT, &format!("/users/{id}"))?
                .json(updates),
        )
        .await
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<User> {
        Self::send_json(self.authed(Method::DELETE, &format!("/users/{id}"))?).await
    }
}
