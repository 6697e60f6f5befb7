use async_trait::async_trait;
use reqwest::Method;

use crate::{
    domain::service::{NewService, NewServiceReview, Service, ServiceReview, UpdateService},
    domain::types::ServiceId,
    dto::envelope::ListEnvelope,
    pagination::TotalCount,
    repository::errors::{RepositoryError, RepositoryResult},
    repository::http::{HttpRepository, none_on_404, push_pagination, split_list},
    repository::{ServiceListQuery, ServiceReader, ServiceWriter},
};

/// Update payload carrying every current field, for endpoints that only
/// accept whole-row writes.
fn full_update(service: &Service) -> UpdateService {
    UpdateService {
        name: Some(service.name.clone()),
        description: Some(service.description.clone()),
        price: Some(service.price),
        image_url: service.image_url.clone(),
        category: service.category.clone(),
        is_active: Some(service.is_active),
        featured: Some(service.featured),
    }
}

#[async_trait]
impl ServiceReader for HttpRepository {
    async fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        let result = Self::send_json(self.public(Method::GET, &format!("/services/{id}"))).await;
        none_on_404(result)
    }

    async fn list_services(
        &self,
        query: ServiceListQuery,
    ) -> RepositoryResult<(TotalCount, Vec<Service>)> {
        let mut params: Vec<(String, String)> = Vec::new();
        push_pagination(&mut params, &query.pagination);
        if let Some(is_active) = query.is_active {
            params.push(("is_active".to_string(), is_active.to_string()));
        }
        if let Some(featured) = query.featured {
            params.push(("featured".to_string(), featured.to_string()));
        }
        if let Some(category) = &query.category {
            params.push(("category".to_string(), category.clone()));
        }

        let envelope: ListEnvelope<Service> =
            Self::send_json(self.public(Method::GET, "/services/").query(&params)).await?;
        Ok(split_list(envelope, &query.pagination))
    }

    async fn list_suggested_services(
        &self,
        current_id: ServiceId,
    ) -> RepositoryResult<Vec<Service>> {
        let params = [("current_id", current_id.to_string())];
        Self::send_json(self.public(Method::GET, "/services/suggested").query(&params)).await
    }

    async fn list_service_reviews(&self, id: ServiceId) -> RepositoryResult<Vec<ServiceReview>> {
        Self::send_json(self.public(Method::GET, &format!("/services/{id}/reviews"))).await
    }
}

#[async_trait]
impl ServiceWriter for HttpRepository {
    async fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service> {
        Self::send_json(self.authed(Method::POST, "/services/")?.json(new_service)).await
    }

    async fn update_service(
        &self,
        id: ServiceId,
        updates: &UpdateService,
    ) -> RepositoryResult<Service> {
        Self::send_json(
            self.authed(Method::PUT, &format!("/services/{id}"))?
                .json(updates),
        )
        .await
    }

    async fn delete_service(&self, id: ServiceId) -> RepositoryResult<()> {
        Self::send_empty(self.authed(Method::DELETE, &format!("/services/{id}"))?).await
    }

    async fn set_service_active(
        &self,
        service: &Service,
        is_active: bool,
    ) -> RepositoryResult<Service> {
        let mut body = full_update(service);
        body.is_active = Some(is_active);
        // The activation endpoint ignores the featured flag; leave it out of
        // the payload so the server keeps the current value.
        body.featured = None;
        Self::send_json(
            self.authed(Method::PUT, &format!("/services/{}", service.id))?
                .json(&body),
        )
        .await
    }

    async fn set_service_featured(
        &self,
        service: &Service,
        featured: bool,
    ) -> RepositoryResult<Service> {
        let patch = UpdateService {
            featured: Some(featured),
            ..UpdateService::default()
        };
        let attempt = Self::send_json(
            self.authed(Method::PATCH, &format!("/services/{}", service.id))?
                .json(&patch),
        )
        .await;

        match attempt {
            Ok(updated) => Ok(updated),
            // The server may not route PATCH; resend the whole row instead.
            Err(RepositoryError::Remote { .. }) => {
                let mut body = full_update(service);
                body.featured = Some(featured);
                Self::send_json(
                    self.authed(Method::PUT, &format!("/services/{}", service.id))?
                        .json(&body),
                )
                .await
            }
            Err(err) => Err(err),
        }
    }

    async fn create_service_review(
        &self,
        id: ServiceId,
        review: &NewServiceReview,
    ) -> RepositoryResult<ServiceReview> {
        Self::send_json(
            self.public(Method::POST, &format!("/services/{id}/reviews"))
                .json(review),
        )
        .await
    }
}
