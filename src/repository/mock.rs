//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::auth::{AuthToken, Credentials};
use crate::domain::blog::{Blog, NewBlog, UpdateBlog};
use crate::domain::contact::{ContactMessage, ContactReceipt, NewContact};
use crate::domain::image::{ImageAsset, NewImage, UpdateImage};
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::service::{NewService, NewServiceReview, Service, ServiceReview, UpdateService};
use crate::domain::site::{ChartSeries, DashboardSummary, SiteEnv};
use crate::domain::types::{BlogId, ContactId, ImageId, OrderId, ServiceId, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::pagination::TotalCount;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    Authenticator, BlogListQuery, BlogReader, BlogWriter, ContactListQuery, ContactReader,
    ContactWriter, ImageListQuery, ImageReader, ImageWriter, OrderListQuery, OrderReader,
    OrderWriter, ServiceListQuery, ServiceReader, ServiceWriter, SiteReader, UserListQuery,
    UserReader, UserWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl BlogReader for Repository {
        async fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>>;
        async fn list_blogs(&self, query: BlogListQuery) -> RepositoryResult<(TotalCount, Vec<Blog>)>;
    }

    #[async_trait]
    impl BlogWriter for Repository {
        async fn create_blog(&self, new_blog: &NewBlog) -> RepositoryResult<Blog>;
        async fn update_blog(&self, id: BlogId, updates: &UpdateBlog) -> RepositoryResult<Blog>;
        async fn delete_blog(&self, id: BlogId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl ServiceReader for Repository {
        async fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
        async fn list_services(
            &self,
            query: ServiceListQuery,
        ) -> RepositoryResult<(TotalCount, Vec<Service>)>;
        async fn list_suggested_services(&self, current_id: ServiceId) -> RepositoryResult<Vec<Service>>;
        async fn list_service_reviews(&self, id: ServiceId) -> RepositoryResult<Vec<ServiceReview>>;
    }

    #[async_trait]
    impl ServiceWriter for Repository {
        async fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service>;
        async fn update_service(
            &self,
            id: ServiceId,
            updates: &UpdateService,
        ) -> RepositoryResult<Service>;
        async fn delete_service(&self, id: ServiceId) -> RepositoryResult<()>;
        async fn set_service_active(
            &self,
            service: &Service,
            is_active: bool,
        ) -> RepositoryResult<Service>;
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
    impl OrderReader for Repository {
        async fn get_order_by_id(&self, id: OrderId) -> RepositoryResult<Option<Order>>;
        async fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(TotalCount, Vec<Order>)>;
        async fn export_orders_csv(&self, query: OrderListQuery) -> RepositoryResult<Vec<u8>>;
    }

    #[async_trait]
    impl OrderWriter for Repository {
        async fn submit_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> RepositoryResult<Order>;
    }

    #[async_trait]
    impl UserReader for Repository {
        async fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
        async fn list_users(&self, query: UserListQuery) -> RepositoryResult<(TotalCount, Vec<User>)>;
        async fn current_user(&self) -> RepositoryResult<User>;
    }

    #[async_trait]
    impl UserWriter for Repository {
        async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        async fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
        async fn delete_user(&self, id: UserId) -> RepositoryResult<User>;
    }

    #[async_trait]
    impl ImageReader for Repository {
        async fn list_images(
            &self,
            query: ImageListQuery,
        ) -> RepositoryResult<(TotalCount, Vec<ImageAsset>)>;
        async fn list_image_categories(&self) -> RepositoryResult<Vec<String>>;
    }

    #[async_trait]
    impl ImageWriter for Repository {
        async fn upload_image(&self, new_image: &NewImage) -> RepositoryResult<ImageAsset>;
        async fn update_image(&self, id: ImageId, updates: &UpdateImage) -> RepositoryResult<ImageAsset>;
        async fn delete_image(&self, id: ImageId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl ContactReader for Repository {
        async fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<ContactMessage>>;
        async fn list_contacts(
            &self,
            query: ContactListQuery,
        ) -> RepositoryResult<(TotalCount, Vec<ContactMessage>)>;
    }

    #[async_trait]
    impl ContactWriter for Repository {
        async fn submit_contact(&self, new_contact: &NewContact) -> RepositoryResult<ContactReceipt>;
        async fn delete_contact(&self, id: ContactId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl SiteReader for Repository {
        async fn get_site_env(&self) -> RepositoryResult<SiteEnv>;
        async fn get_dashboard_summary(&self) -> RepositoryResult<DashboardSummary>;
        async fn get_revenue_by_date(&self) -> RepositoryResult<ChartSeries>;
        async fn get_orders_by_service(&self) -> RepositoryResult<ChartSeries>;
    }

    #[async_trait]
    impl Authenticator for Repository {
        async fn login(&self, credentials: &Credentials) -> RepositoryResult<AuthToken>;
        fn has_token(&self) -> bool;
        fn clear_token(&self);
    }
}
