use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    domain::{
        auth::{AuthToken, Credentials},
        blog::{Blog, NewBlog, UpdateBlog},
        contact::{ContactMessage, ContactReceipt, NewContact},
        image::{ImageAsset, NewImage, UpdateImage},
        order::{NewOrder, Order, OrderStatus},
        service::{NewService, NewServiceReview, Service, ServiceReview, UpdateService},
        site::{ChartSeries, DashboardSummary, SiteEnv},
        types::{BlogId, ContactId, ImageId, OrderId, ServiceId, UserId},
        user::{NewUser, UpdateUser, User},
    },
    pagination::TotalCount,
    repository::errors::RepositoryResult,
};

pub mod auth;
pub mod blog;
pub mod contact;
pub mod errors;
pub mod http;
pub mod image;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod order;
pub mod service;
pub mod site;
pub mod user;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Offset sent on the wire; the server counts rows, not pages.
    #[must_use]
    pub fn skip(&self) -> usize {
        self.page.saturating_sub(1) * self.per_page
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.per_page
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlogListQuery {
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl BlogListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServiceListQuery {
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub featured: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl ServiceListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    #[must_use]
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    pub customer_name: Option<String>,
    pub service_id: Option<ServiceId>,
    pub status: Option<OrderStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn customer_name(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = Some(customer_name.into());
        self
    }

    #[must_use]
    pub fn service_id(mut self, service_id: ServiceId) -> Self {
        self.service_id = Some(service_id);
        self
    }

    #[must_use]
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn between(mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    #[must_use]
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageListQuery {
    pub category: Option<String>,
    pub is_visible: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl ImageListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn is_visible(mut self, is_visible: bool) -> Self {
        self.is_visible = Some(is_visible);
        self
    }

    #[must_use]
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactListQuery {
    pub pagination: Option<Pagination>,
}

impl ContactListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[async_trait]
pub trait BlogReader {
    async fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>>;
    async fn list_blogs(&self, query: BlogListQuery) -> RepositoryResult<(TotalCount, Vec<Blog>)>;
}

#[async_trait]
pub trait BlogWriter {
    async fn create_blog(&self, new_blog: &NewBlog) -> RepositoryResult<Blog>;
    async fn update_blog(&self, id: BlogId, updates: &UpdateBlog) -> RepositoryResult<Blog>;
    async fn delete_blog(&self, id: BlogId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ServiceReader {
    async fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
    async fn list_services(
        &self,
        query: ServiceListQuery,
    ) -> RepositoryResult<(TotalCount, Vec<Service>)>;
    async fn list_suggested_services(&self, current_id: ServiceId)
    -> RepositoryResult<Vec<Service>>;
    async fn list_service_reviews(&self, id: ServiceId) -> RepositoryResult<Vec<ServiceReview>>;
}

#[async_trait]
pub trait ServiceWriter {
    async fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service>;
    async fn update_service(
        &self,
        id: ServiceId,
        updates: &UpdateService,
    ) -> RepositoryResult<Service>;
    async fn delete_service(&self, id: ServiceId) -> RepositoryResult<()>;
    /// Flips activation by resending the whole service body.
    async fn set_service_active(&self, service: &Service, is_active: bool)
    -> RepositoryResult<Service>;
    /// Flips the featured flag with a minimal patch, falling back to a full
    /// body when the server rejects the method.
    async fn set_service_featured(
        &self,
        service: &Service,
        featured: bool,
    ) -> RepositoryResult<Service>;
    async fn create_service_review(
        &self,
        id: ServiceId,
        review: &NewServiceReview,
    ) -> RepositoryResult<ServiceReview>;
}

#[async_trait]
pub trait OrderReader {
    async fn get_order_by_id(&self, id: OrderId) -> RepositoryResult<Option<Order>>;
    async fn list_orders(&self, query: OrderListQuery)
    -> RepositoryResult<(TotalCount, Vec<Order>)>;
    /// Downloads the filtered order list as CSV bytes.
    async fn export_orders_csv(&self, query: OrderListQuery) -> RepositoryResult<Vec<u8>>;
}

#[async_trait]
pub trait OrderWriter {
    /// Public endpoint; never sends credentials.
    async fn submit_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    async fn update_order_status(&self, id: OrderId, status: OrderStatus)
    -> RepositoryResult<Order>;
}

#[async_trait]
pub trait UserReader {
    async fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    async fn list_users(&self, query: UserListQuery) -> RepositoryResult<(TotalCount, Vec<User>)>;
    async fn current_user(&self) -> RepositoryResult<User>;
}

#[async_trait]
pub trait UserWriter {
    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    async fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
    async fn delete_user(&self, id: UserId) -> RepositoryResult<User>;
}

#[async_trait]
pub trait ImageReader {
    async fn list_images(
        &self,
        query: ImageListQuery,
    ) -> RepositoryResult<(TotalCount, Vec<ImageAsset>)>;
    async fn list_image_categories(&self) -> RepositoryResult<Vec<String>>;
}

#[async_trait]
pub trait ImageWriter {
    async fn upload_image(&self, new_image: &NewImage) -> RepositoryResult<ImageAsset>;
    async fn update_image(&self, id: ImageId, updates: &UpdateImage)
    -> RepositoryResult<ImageAsset>;
    async fn delete_image(&self, id: ImageId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ContactReader {
    async fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<ContactMessage>>;
    async fn list_contacts(
        &self,
        query: ContactListQuery,
    ) -> RepositoryResult<(TotalCount, Vec<ContactMessage>)>;
}

#[async_trait]
pub trait ContactWriter {
    /// Public endpoint; never sends credentials.
    async fn submit_contact(&self, new_contact: &NewContact) -> RepositoryResult<ContactReceipt>;
    async fn delete_contact(&self, id: ContactId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait SiteReader {
    async fn get_site_env(&self) -> RepositoryResult<SiteEnv>;
    async fn get_dashboard_summary(&self) -> RepositoryResult<DashboardSummary>;
    async fn get_revenue_by_date(&self) -> RepositoryResult<ChartSeries>;
    async fn get_orders_by_service(&self) -> RepositoryResult<ChartSeries>;
}

#[async_trait]
pub trait Authenticator {
    /// Exchanges credentials for a bearer token and stores it for later calls.
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<AuthToken>;
    fn has_token(&self) -> bool;
    fn clear_token(&self);
}
