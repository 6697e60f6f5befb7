use async_trait::async_trait;
use reqwest::Method;

use crate::{
    domain::blog::{Blog, NewBlog, UpdateBlog},
    domain::types::BlogId,
    dto::envelope::ListEnvelope,
    pagination::TotalCount,
    repository::errors::RepositoryResult,
    repository::http::{HttpRepository, none_on_404, push_pagination, split_list},
    repository::{BlogListQuery, BlogReader, BlogWriter},
};

#[async_trait]
impl BlogReader for HttpRepository {
    async fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>> {
        let result = Self::send_json(self.public(Method::GET, &format!("/blogs/{id}"))).await;
        none_on_404(result)
    }

    async fn list_blogs(&self, query: BlogListQuery) -> RepositoryResult<(TotalCount, Vec<Blog>)> {
        let mut params: Vec<(String, String)> = Vec::new();
        push_pagination(&mut params, &query.pagination);
        if let Some(is_active) = query.is_active {
            params.push(("is_active".to_string(), is_active.to_string()));
        }
        if let Some(category) = &query.category {
            params.push(("category".to_string(), category.clone()));
        }

        let envelope: ListEnvelope<Blog> =
            Self::send_json(self.public(Method::GET, "/blogs/").query(&params)).await?;
        Ok(split_list(envelope, &query.pagination))
    }
}

#[async_trait]
impl BlogWriter for HttpRepository {
    async fn create_blog(&self, new_blog: &NewBlog) -> RepositoryResult<Blog> {
        Self::send_json(self.authed(Method::POST, "/blogs/")?.json(new_blog)).await
    }

    async fn update_blog(&self, id: BlogId, updates: &UpdateBlog) -> RepositoryResult<Blog> {
        Self::send_json(
            self.authed(Method::PUT, &format!("/blogs/{id}"))?
                .json(updates),
        )
        .await
    }

    async fn delete_blog(&self, id: BlogId) -> RepositoryResult<()> {
        Self::send_empty(self.authed(Method::DELETE, &format!("/blogs/{id}"))?).await
    }
}
