//! The admin dashboard: headline numbers plus the two chart series,
//! fetched concurrently.

use crate::domain::site::{ChartSeries, DashboardSummary};
use crate::dto::notice::NoticeQueue;
use crate::repository::SiteReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::services::ServiceResult;

/// Everything the dashboard renders in one load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardData {
    pub summary: Option<DashboardSummary>,
    pub revenue_by_date: ChartSeries,
    pub orders_by_service: ChartSeries,
}

/// Loads the three dashboard panels. A panel the server rejects degrades
/// on its own; a request that never got a response fails the whole load
/// with one toast.
pub async fn load_dashboard<R>(
    repo: &R,
    notices: &mut NoticeQueue,
) -> ServiceResult<DashboardData>
where
    R: SiteReader + ?Sized,
{
    let (summary, revenue, by_service) = tokio::join!(
        repo.get_dashboard_summary(),
        repo.get_revenue_by_date(),
        repo.get_orders_by_service(),
    );

    match assemble(summary, revenue, by_service) {
        Ok(data) => Ok(data),
        Err(err) => {
            log::error!("Failed to fetch dashboard data: {err}");
            notices.push_error("Lỗi", "Không thể tải dữ liệu dashboard");
            Err(err.into())
        }
    }
}

/// Reloads the dashboard from its refresh button, greeting a successful
/// round trip.
pub async fn refresh_dashboard<R>(
    repo: &R,
    notices: &mut NoticeQueue,
) -> ServiceResult<DashboardData>
where
    R: SiteReader + ?Sized,
{
    let data = load_dashboard(repo, notices).await?;
    notices.push_success("Cập nhật thành công", "Dữ liệu dashboard đã được làm mới");
    Ok(data)
}

fn assemble(
    summary: RepositoryResult<DashboardSummary>,
    revenue: RepositoryResult<ChartSeries>,
    by_service: RepositoryResult<ChartSeries>,
) -> RepositoryResult<DashboardData> {
    Ok(DashboardData {
        summary: degrade(summary, "the dashboard summary")?,
        revenue_by_date: degrade(revenue, "the revenue chart")?.unwrap_or_default(),
        orders_by_service: degrade(by_service, "the orders-by-service chart")?.unwrap_or_default(),
    })
}

/// A rejected panel is dropped with a warning; only a request that never
/// reached the server propagates.
fn degrade<T>(result: RepositoryResult<T>, what: &str) -> RepositoryResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_connectivity() => Err(err),
        Err(err) => {
            log::warn!("Failed to fetch {what}: {err}");
            Ok(None)
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;

    use crate::repository::mock::MockRepository;

    fn summary() -> DashboardSummary {
        DashboardSummary {
            new_orders: 12,
            services: 8,
            customers: 45,
            revenue: 6_000_000,
        }
    }

    fn series(labels: &[&str], values: &[f64]) -> ChartSeries {
        ChartSeries {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            values: values.to_vec(),
        }
    }

    #[tokio::test]
    async fn load_fills_every_panel() {
        let mut repo = MockRepository::new();
        repo.expect_get_dashboard_summary()
            .times(1)
            .returning(|| Ok(summary()));
        repo.expect_get_revenue_by_date()
            .times(1)
            .returning(|| Ok(series(&["01/07", "02/07"], &[1.5, 2.0])));
        repo.expect_get_orders_by_service()
            .times(1)
            .returning(|| Ok(series(&["In danh thiếp"], &[14.0])));

        let mut notices = NoticeQueue::default();
        let data = load_dashboard(&repo, &mut notices)
            .await
            .expect("should load");

        assert_eq!(data.summary, Some(summary()));
        assert_eq!(data.revenue_by_date.labels.len(), 2);
        assert_eq!(data.orders_by_service.values, vec![14.0]);
        assert!(notices.is_empty());
    }

    #[tokio::test]
    async fn rejected_panel_degrades_without_a_toast() {
        let mut repo = MockRepository::new();
        repo.expect_get_dashboard_summary().returning(|| {
            Err(RepositoryError::Remote {
                status: 500,
                detail: None,
            })
        });
        repo.expect_get_revenue_by_date()
            .returning(|| Ok(series(&["01/07"], &[1.0])));
        repo.expect_get_orders_by_service()
            .returning(|| Ok(series(&["In tờ rơi"], &[3.0])));

        let mut notices = NoticeQueue::default();
        let data = load_dashboard(&repo, &mut notices)
            .await
            .expect("should still load");

        assert!(data.summary.is_none());
        assert!(!data.revenue_by_date.is_empty());
        assert!(notices.is_empty());
    }

    #[tokio::test]
    async fn refresh_toasts_after_a_successful_round_trip() {
        let mut repo = MockRepository::new();
        repo.expect_get_dashboard_summary().returning(|| Ok(summary()));
        repo.expect_get_revenue_by_date()
            .returning(|| Ok(ChartSeries::default()));
        repo.expect_get_orders_by_service()
            .returning(|| Ok(ChartSeries::default()));

        let mut notices = NoticeQueue::default();
        refresh_dashboard(&repo, &mut notices)
            .await
            .expect("should refresh");

        let notices = notices.take();
        assert_eq!(notices[0].title, "Cập nhật thành công");
        assert_eq!(notices[0].message, "Dữ liệu dashboard đã được làm mới");
    }
}
