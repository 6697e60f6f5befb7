use async_trait::async_trait;
use reqwest::Method;

use crate::{
    domain::site::{ChartSeries, DashboardSummary, SiteEnv},
    repository::SiteReader,
    repository::errors::RepositoryResult,
    repository::http::HttpRepository,
};

#[async_trait]
impl SiteReader for HttpRepository {
    async fn get_site_env(&self) -> RepositoryResult<SiteEnv> {
        Self::send_json(self.public(Method::GET, "/config/env")).await
    }

    async fn get_dashboard_summary(&self) -> RepositoryResult<DashboardSummary> {
        Self::send_json(self.authed(Method::GET, "/dashboard/summary")?).await
    }

    async fn get_revenue_by_date(&self) -> RepositoryResult<ChartSeries> {
        Self::send_json(self.authed(Method::GET, "/dashboard/revenue-by-date")?).await
    }

    async fn get_orders_by_service(&self) -> RepositoryResult<ChartSeries> {
        Self::send_json(self.authed(Method::GET, "/dashboard/orders-by-service")?).await
    }
}
