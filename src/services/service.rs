//! Printing-service workflows: the admin table, the public catalog and the
//! detail page with its reviews.

use crate::domain::service::{
    NewService, NewServiceReview, Service, ServiceDetail, ServiceReview, UpdateService,
};
use crate::domain::types::ServiceId;
use crate::dto::notice::NoticeQueue;
use crate::forms::Draft;
use crate::forms::review::ReviewForm;
use crate::forms::service::ServiceForm;
use crate::list::{ListState, RowFilter};
use crate::pagination::{Paginated, TotalCount};
use crate::repository::errors::RepositoryError;
use crate::repository::{Authenticator, ServiceListQuery, ServiceReader, ServiceWriter};
use crate::services::{ServiceError, ServiceResult};

/// Rows per page in the admin table.
pub const SERVICES_PER_PAGE: usize = 10;
/// Cards per page of the public catalog, which pages locally.
pub const CATALOG_PER_PAGE: usize = 9;

pub type ServiceListState = ListState<Service, ServiceFilters>;
pub type CatalogState = ListState<Service, CatalogFilters>;

/// The all/active/inactive/featured axis of the admin filter bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ServiceStatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    Featured,
}

impl ServiceStatusFilter {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ServiceStatusFilter::All => "all",
            ServiceStatusFilter::Active => "active",
            ServiceStatusFilter::Inactive => "inactive",
            ServiceStatusFilter::Featured => "featured",
        }
    }

    #[must_use]
    pub fn matches(&self, service: &Service) -> bool {
        match self {
            ServiceStatusFilter::All => true,
            ServiceStatusFilter::Active => service.is_active,
            ServiceStatusFilter::Inactive => !service.is_active,
            ServiceStatusFilter::Featured => service.featured,
        }
    }
}

impl From<&str> for ServiceStatusFilter {
    fn from(value: &str) -> Self {
        match value {
            "active" => ServiceStatusFilter::Active,
            "inactive" => ServiceStatusFilter::Inactive,
            "featured" => ServiceStatusFilter::Featured,
            _ => ServiceStatusFilter::All,
        }
    }
}

/// Filters of the admin table. Category and status narrow the fetch itself
/// and are re-applied locally together with the search term.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceFilters {
    pub category: Option<String>,
    pub status: ServiceStatusFilter,
}

impl RowFilter<Service> for ServiceFilters {
    fn matches(&self, service: &Service, search: &str) -> bool {
        let term = search.to_lowercase();
        let category = service.category.as_deref().unwrap_or("");

        let matches_search = term.is_empty()
            || service.name.to_lowercase().contains(&term)
            || service.description.to_lowercase().contains(&term)
            || category.to_lowercase().contains(&term);
        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|wanted| category == wanted);

        matches_search && matches_category && self.status.matches(service)
    }
}

/// Filters of the public catalog. Both narrow the fetch; only the search
/// term is applied locally, across name and description.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogFilters {
    pub category: Option<String>,
    pub featured_only: bool,
}

impl RowFilter<Service> for CatalogFilters {
    fn matches(&self, service: &Service, search: &str) -> bool {
        let term = search.to_lowercase();
        term.is_empty()
            || service.name.to_lowercase().contains(&term)
            || service.description.to_lowercase().contains(&term)
    }
}

fn admin_query(state: &ServiceListState) -> ServiceListQuery {
    let mut query = ServiceListQuery::new().paginate(state.page(), state.per_page());
    if let Some(category) = &state.filters().category {
        query = query.category(category.clone());
    }
    match state.filters().status {
        ServiceStatusFilter::All => query,
        ServiceStatusFilter::Active => query.is_active(true),
        ServiceStatusFilter::Inactive => query.is_active(false),
        ServiceStatusFilter::Featured => query.featured(true),
    }
}

/// Reloads the current page of the admin table. Without a stored token the
/// call is a no-op; the page only renders behind the login gate.
pub async fn refresh<R>(repo: &R, state: &mut ServiceListState) -> ServiceResult<()>
where
    R: ServiceReader + Authenticator + ?Sized,
{
    if !repo.has_token() {
        return Ok(());
    }

    let seq = state.begin_fetch();
    match repo.list_services(admin_query(state)).await {
        Ok((total, services)) => {
            state.apply_fetch(seq, total, services);
            Ok(())
        }
        Err(RepositoryError::AuthMissing) => {
            state.fetch_failed(seq);
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to fetch services: {err}");
            if state.fetch_failed(seq) {
                push_failure(&mut state.notices, &err, "Không thể tải danh sách dịch vụ");
            }
            Err(err.into())
        }
    }
}

/// The admin services page reports every connectivity problem with the same
/// short text and falls back to the server's detail otherwise.
fn push_failure(notices: &mut NoticeQueue, err: &RepositoryError, fallback: &str) {
    if err.is_connectivity() {
        notices.push_error("Lỗi", "Không thể kết nối đến server");
    } else {
        let message = err.server_detail().unwrap_or(fallback);
        notices.push_error("Lỗi", message);
    }
}

/// Validates the dialog form and creates the service, then refetches the
/// table.
pub async fn create_service<R>(
    repo: &R,
    state: &mut ServiceListState,
    draft: &mut Draft<ServiceForm>,
) -> ServiceResult<()>
where
    R: ServiceReader + ServiceWriter + Authenticator + ?Sized,
{
    if !draft.validate() {
        return Err(ServiceError::Form(
            "Vui lòng kiểm tra lại thông tin".to_string(),
        ));
    }

    let new_service = NewService::from(&draft.form);
    match repo.create_service(&new_service).await {
        Ok(_) => {
            state
                .notices
                .push_success("Thành công", "Tạo dịch vụ mới thành công");
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to create service: {err}");
            push_failure(&mut state.notices, &err, "Không thể tạo dịch vụ");
            Err(err.into())
        }
    }
}

/// Validates the dialog form and saves the edited service, then refetches
/// the table.
pub async fn update_service<R>(
    repo: &R,
    state: &mut ServiceListState,
    id: i32,
    draft: &mut Draft<ServiceForm>,
) -> ServiceResult<()>
where
    R: ServiceReader + ServiceWriter + Authenticator + ?Sized,
{
    if !draft.validate() {
        return Err(ServiceError::Form(
            "Vui lòng kiểm tra lại thông tin".to_string(),
        ));
    }

    let id = ServiceId::try_from(id)?;
    let updates = UpdateService::from(&draft.form);
    match repo.update_service(id, &updates).await {
        Ok(_) => {
            state
                .notices
                .push_success("Thành công", "Cập nhật dịch vụ thành công");
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to update service {id}: {err}");
            push_failure(&mut state.notices, &err, "Không thể cập nhật dịch vụ");
            Err(err.into())
        }
    }
}

/// Deletes the service staged by [`ListState::request_delete`] once the user
/// confirmed, then refetches the table.
pub async fn delete_service<R>(repo: &R, state: &mut ServiceListState) -> ServiceResult<()>
where
    R: ServiceReader + ServiceWriter + Authenticator + ?Sized,
{
    let Some(service) = state.take_confirmed_delete() else {
        return Ok(());
    };

    let id = ServiceId::try_from(service.id)?;
    match repo.delete_service(id).await {
        Ok(()) => {
            state
                .notices
                .push_success("Thành công", "Xóa dịch vụ thành công");
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to delete service {id}: {err}");
            push_failure(&mut state.notices, &err, "Không thể xóa dịch vụ");
            Err(err.into())
        }
    }
}

/// Flips a service's activation optimistically, rolling the row back when
/// the server rejects the change. A second click on the same row while the
/// request is in flight is ignored.
pub async fn toggle_service_active<R>(
    repo: &R,
    state: &mut ServiceListState,
    id: i32,
) -> ServiceResult<()>
where
    R: ServiceReader + ServiceWriter + Authenticator + ?Sized,
{
    let Some(snapshot) = state.begin_toggle(id) else {
        return Ok(());
    };
    let turning_on = !snapshot.is_active;
    state.apply_row(id, |row| row.is_active = turning_on);

    let result = repo.set_service_active(&snapshot, turning_on).await;
    state.finish_toggle(id);
    match result {
        Ok(_) => {
            let verb = if turning_on { "Kích hoạt" } else { "Vô hiệu hóa" };
            state.notices.push_success(
                "Thành công",
                format!("{verb} dịch vụ \"{}\"", snapshot.name),
            );
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to toggle activation of service {id}: {err}");
            state.restore_row(snapshot);
            let message = err
                .server_detail()
                .unwrap_or("Không thể cập nhật trạng thái dịch vụ");
            state.notices.push_error("Lỗi", message);
            Err(err.into())
        }
    }
}

/// Flips a service's featured flag optimistically, with the same rollback
/// and double-click guard as [`toggle_service_active`].
pub async fn toggle_service_featured<R>(
    repo: &R,
    state: &mut ServiceListState,
    id: i32,
) -> ServiceResult<()>
where
    R: ServiceReader + ServiceWriter + Authenticator + ?Sized,
{
    let Some(snapshot) = state.begin_toggle(id) else {
        return Ok(());
    };
    let marking = !snapshot.featured;
    state.apply_row(id, |row| row.featured = marking);

    let result = repo.set_service_featured(&snapshot, marking).await;
    state.finish_toggle(id);
    match result {
        Ok(_) => {
            let verb = if marking { "Đánh dấu" } else { "Bỏ đánh dấu" };
            state.notices.push_success(
                "Thành công",
                format!("{verb} dịch vụ \"{}\" nổi bật", snapshot.name),
            );
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to toggle featured flag of service {id}: {err}");
            state.restore_row(snapshot);
            let message = err
                .server_detail()
                .unwrap_or("Không thể cập nhật trạng thái nổi bật");
            state.notices.push_error("Lỗi", message);
            Err(err.into())
        }
    }
}

/// Reloads the public catalog. The whole filtered set is fetched in one go
/// and paged locally by [`catalog_page`].
pub async fn refresh_catalog<R>(repo: &R, state: &mut CatalogState) -> ServiceResult<()>
where
    R: ServiceReader + ?Sized,
{
    let seq = state.begin_fetch();
    let mut query = ServiceListQuery::new();
    if let Some(category) = &state.filters().category {
        query = query.category(category.clone());
    }
    if state.filters().featured_only {
        query = query.featured(true);
    }

    match repo.list_services(query).await {
        Ok((total, services)) => {
            state.apply_fetch(seq, total, services);
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to fetch the service catalog: {err}");
            if state.fetch_failed(seq) {
                state
                    .notices
                    .push_error("Lỗi", "Không thể tải danh sách dịch vụ");
            }
            Err(err.into())
        }
    }
}

/// The current catalog page sliced out of the searched rows, with the page
/// strip computed over the narrowed set.
#[must_use]
pub fn catalog_page(state: &CatalogState) -> Paginated<&Service> {
    let visible = state.visible_rows();
    let found = visible.len();
    let start = (state.page().saturating_sub(1)) * state.per_page();
    let items = visible
        .into_iter()
        .skip(start)
        .take(state.per_page())
        .collect();
    Paginated::new(items, state.page(), TotalCount::Exact(found), state.per_page())
}

/// The distinct categories of the loaded catalog, for the filter dropdown.
#[must_use]
pub fn catalog_categories(state: &CatalogState) -> Vec<String> {
    let mut categories: Vec<String> = state
        .rows()
        .iter()
        .filter_map(|service| service.category.clone())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

/// The flat service list backing pick-a-service dropdowns. The order form
/// offers active services only; the admin filter bar lists everything.
pub async fn service_choices<R>(repo: &R, active_only: bool) -> ServiceResult<Vec<Service>>
where
    R: ServiceReader + ?Sized,
{
    let mut query = ServiceListQuery::new();
    if active_only {
        query = query.is_active(true);
    }
    let (_, services) = repo.list_services(query).await.map_err(|err| {
        log::error!("Failed to fetch the service choices: {err}");
        ServiceError::from(err)
    })?;
    Ok(services)
}

/// Loads a service with its reviews and suggestions for the detail page.
/// The two side panels are optional; a failure there leaves them empty.
pub async fn load_service_detail<R>(
    repo: &R,
    notices: &mut NoticeQueue,
    id: i32,
) -> ServiceResult<ServiceDetail>
where
    R: ServiceReader + ?Sized,
{
    let service_id = ServiceId::try_from(id)?;
    let service = match repo.get_service_by_id(service_id).await {
        Ok(Some(service)) => service,
        Ok(None) => {
            notices.push_error("Lỗi", "Không tìm thấy dịch vụ");
            return Err(ServiceError::NotFound);
        }
        Err(err) => {
            log::error!("Failed to fetch service {service_id}: {err}");
            if err.is_connectivity() {
                notices.push_error("Lỗi", "Không thể tải thông tin dịch vụ");
            } else {
                notices.push_error("Lỗi", "Không tìm thấy dịch vụ");
            }
            return Err(err.into());
        }
    };

    let reviews = match repo.list_service_reviews(service_id).await {
        Ok(reviews) => reviews,
        Err(err) => {
            log::warn!("Failed to fetch reviews of service {service_id}: {err}");
            Vec::new()
        }
    };
    let suggested = match repo.list_suggested_services(service_id).await {
        Ok(suggested) => suggested,
        Err(err) => {
            log::warn!("Failed to fetch suggestions for service {service_id}: {err}");
            Vec::new()
        }
    };

    Ok(ServiceDetail {
        service,
        reviews,
        suggested,
    })
}

/// Validates and posts a review, returning the stored row on success.
pub async fn submit_review<R>(
    repo: &R,
    id: i32,
    draft: &mut Draft<ReviewForm>,
) -> ServiceResult<ServiceReview>
where
    R: ServiceWriter + ?Sized,
{
    if !draft.validate() {
        return Err(ServiceError::Form(
            "Vui lòng kiểm tra lại thông tin".to_string(),
        ));
    }

    let id = ServiceId::try_from(id)?;
    let review = NewServiceReview::from(&draft.form);
    repo.create_service_review(id, &review)
        .await
        .map_err(|err| {
            log::error!("Failed to submit a review for service {id}: {err}");
            err.into()
        })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::dto::notice::NoticeLevel;
    use crate::pagination::TotalCount;
    use crate::repository::mock::MockRepository;

    fn service(id: i32, name: &str, is_active: bool, featured: bool) -> Service {
        let created_at = NaiveDate::from_ymd_opt(2024, 6, (id % 28 + 1) as u32)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");
        Service {
            id,
            name: name.to_string(),
            description: format!("Dịch vụ {name} chuyên nghiệp"),
            price: 150_000.0,
            image_url: None,
            category: Some("in-an".to_string()),
            is_active,
            featured,
            created_at,
            updated_at: created_at,
        }
    }

    fn loaded_state(rows: Vec<Service>) -> ServiceListState {
        let mut state = ServiceListState::new(SERVICES_PER_PAGE);
        let seq = state.begin_fetch();
        let total = TotalCount::Exact(rows.len());
        state.apply_fetch(seq, total, rows);
        state
    }

    #[tokio::test]
    async fn featured_filter_maps_onto_the_featured_param() {
        let mut repo = MockRepository::new();
        repo.expect_has_token().return_const(true);
        repo.expect_list_services()
            .withf(|query| {
                query.featured == Some(true)
                    && query.is_active.is_none()
                    && query
                        .pagination
                        .as_ref()
                        .is_some_and(|p| p.skip() == 0 && p.limit() == 10)
            })
            .times(1)
            .returning(|_| Ok((TotalCount::Exact(1), vec![service(1, "In tem nhãn", true, true)])));

        let mut state = ServiceListState::new(SERVICES_PER_PAGE);
        state.set_filters(ServiceFilters {
            category: None,
            status: ServiceStatusFilter::Featured,
        });
        refresh(&repo, &mut state).await.expect("should fetch");
        assert_eq!(state.rows().len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_pushes_the_exact_notice() {
        let mut repo = MockRepository::new();
        repo.expect_has_token().return_const(true);
        repo.expect_list_services().returning(|_| {
            Err(RepositoryError::Remote {
                status: 500,
                detail: None,
            })
        });

        let mut state = ServiceListState::new(SERVICES_PER_PAGE);
        assert!(refresh(&repo, &mut state).await.is_err());

        let notices = state.notices.take();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].title, "Lỗi");
        assert_eq!(notices[0].message, "Không thể tải danh sách dịch vụ");
    }

    #[tokio::test]
    async fn create_toasts_and_refetches() {
        let mut repo = MockRepository::new();
        repo.expect_has_token().return_const(true);
        repo.expect_create_service()
            .withf(|new_service| new_service.name == "In bạt quảng cáo" && !new_service.featured)
            .times(1)
            .returning(|_| Ok(service(9, "In bạt quảng cáo", true, false)));
        repo.expect_list_services()
            .times(1)
            .returning(|_| Ok((TotalCount::Exact(1), vec![service(9, "In bạt quảng cáo", true, false)])));

        let mut state = ServiceListState::new(SERVICES_PER_PAGE);
        let mut draft = Draft::new(ServiceForm {
            name: "In bạt quảng cáo".to_string(),
            description: "Bạt hiflex khổ lớn".to_string(),
            price: 25_000.0,
            category: "quang-cao".to_string(),
            ..ServiceForm::default()
        });
        create_service(&repo, &mut state, &mut draft)
            .await
            .expect("should create");

        let notices = state.notices.take();
        assert_eq!(notices[0].message, "Tạo dịch vụ mới thành công");
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_the_repository() {
        let mut repo = MockRepository::new();
        repo.expect_create_service().times(0);
        repo.expect_list_services().times(0);

        let mut state = ServiceListState::new(SERVICES_PER_PAGE);
        let mut draft = Draft::new(ServiceForm::default());
        let result = create_service(&repo, &mut state, &mut draft).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(draft.error("name"), Some("Tên dịch vụ là bắt buộc"));
        assert!(state.notices.is_empty());
    }

    #[tokio::test]
    async fn activation_toggle_sends_the_old_row_and_the_new_flag() {
        let mut repo = MockRepository::new();
        repo.expect_has_token().return_const(true);
        repo.expect_set_service_active()
            .withf(|snapshot, active| snapshot.id == 5 && !snapshot.is_active && *active)
            .times(1)
            .returning(|snapshot, active| {
                let mut updated = snapshot.clone();
                updated.is_active = active;
                Ok(updated)
            });
        repo.expect_list_services()
            .times(1)
            .returning(|_| Ok((TotalCount::Exact(1), vec![service(5, "In danh thiếp", true, false)])));

        let mut state = loaded_state(vec![service(5, "In danh thiếp", false, false)]);
        toggle_service_active(&repo, &mut state, 5)
            .await
            .expect("should toggle");

        let notices = state.notices.take();
        assert_eq!(notices[0].message, "Kích hoạt dịch vụ \"In danh thiếp\"");
        assert!(state.rows()[0].is_active);
        assert!(!state.is_toggling(5));
    }

    #[tokio::test]
    async fn failed_toggle_rolls_the_row_back() {
        let mut repo = MockRepository::new();
        repo.expect_set_service_active().returning(|_, _| {
            Err(RepositoryError::Remote {
                status: 422,
                detail: Some("Dịch vụ đang có đơn hàng".to_string()),
            })
        });

        let mut state = loaded_state(vec![service(5, "In danh thiếp", true, false)]);
        assert!(toggle_service_active(&repo, &mut state, 5).await.is_err());

        assert!(state.rows()[0].is_active, "rollback should restore the row");
        assert!(!state.is_toggling(5));
        let notices = state.notices.take();
        assert_eq!(notices[0].message, "Dịch vụ đang có đơn hàng");
    }

    #[tokio::test]
    async fn toggle_ignores_a_double_click() {
        let mut repo = MockRepository::new();
        repo.expect_set_service_active().times(0);

        let mut state = loaded_state(vec![service(5, "In danh thiếp", true, false)]);
        state.begin_toggle(5).expect("first claim");

        toggle_service_active(&repo, &mut state, 5)
            .await
            .expect("second click is a no-op");
        assert!(state.notices.is_empty());
    }

    #[tokio::test]
    async fn unmarking_featured_uses_the_reversed_verb() {
        let mut repo = MockRepository::new();
        repo.expect_has_token().return_const(true);
        repo.expect_set_service_featured()
            .withf(|snapshot, featured| snapshot.id == 2 && !*featured)
            .times(1)
            .returning(|snapshot, featured| {
                let mut updated = snapshot.clone();
                updated.featured = featured;
                Ok(updated)
            });
        repo.expect_list_services()
            .times(1)
            .returning(|_| Ok((TotalCount::Exact(1), vec![service(2, "In lịch Tết", true, false)])));

        let mut state = loaded_state(vec![service(2, "In lịch Tết", true, true)]);
        toggle_service_featured(&repo, &mut state, 2)
            .await
            .expect("should toggle");

        let notices = state.notices.take();
        assert_eq!(
            notices[0].message,
            "Bỏ đánh dấu dịch vụ \"In lịch Tết\" nổi bật"
        );
    }

    #[tokio::test]
    async fn catalog_fetches_unpaginated_and_pages_locally() {
        let mut repo = MockRepository::new();
        let rows: Vec<Service> = (1..=12)
            .map(|i| service(i, &format!("Dịch vụ {i:02}"), true, false))
            .collect();
        repo.expect_list_services()
            .withf(|query| query.pagination.is_none() && query.featured == Some(true))
            .times(1)
            .returning(move |_| Ok((TotalCount::Exact(12), rows.clone())));

        let mut state = CatalogState::new(CATALOG_PER_PAGE);
        state.set_filters(CatalogFilters {
            category: None,
            featured_only: true,
        });
        refresh_catalog(&repo, &mut state).await.expect("should fetch");

        let first = catalog_page(&state);
        assert_eq!(first.items.len(), 9);
        assert_eq!(first.total_pages(), 2);

        state.set_page(2);
        let second = catalog_page(&state);
        assert_eq!(second.items.len(), 3);
        assert_eq!(second.items[0].name, "Dịch vụ 10");
    }

    #[test]
    fn catalog_search_narrows_the_page_strip() {
        let mut state = CatalogState::new(CATALOG_PER_PAGE);
        let seq = state.begin_fetch();
        let rows: Vec<Service> = (1..=12)
            .map(|i| service(i, &format!("Dịch vụ {i:02}"), true, false))
            .collect();
        state.apply_fetch(seq, TotalCount::Exact(12), rows);

        state.set_search_input("dịch vụ 01", std::time::Instant::now());
        state.flush_search();
        let page = catalog_page(&state);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages(), 1);
    }

    #[tokio::test]
    async fn detail_page_survives_missing_side_panels() {
        let mut repo = MockRepository::new();
        repo.expect_get_service_by_id()
            .withf(|id| id.get() == 4)
            .returning(|_| Ok(Some(service(4, "In catalogue", true, true))));
        repo.expect_list_service_reviews().returning(|_| {
            Err(RepositoryError::Remote {
                status: 500,
                detail: None,
            })
        });
        repo.expect_list_suggested_services()
            .returning(|_| Ok(vec![service(6, "In tờ rơi", true, false)]));

        let mut notices = NoticeQueue::default();
        let detail = load_service_detail(&repo, &mut notices, 4)
            .await
            .expect("detail should load");

        assert!(detail.reviews.is_empty());
        assert_eq!(detail.suggested.len(), 1);
        assert!(notices.is_empty());
        assert_eq!(detail.average_rating(), 0.0);
    }

    #[tokio::test]
    async fn missing_service_pushes_the_not_found_notice() {
        let mut repo = MockRepository::new();
        repo.expect_get_service_by_id().returning(|_| Ok(None));

        let mut notices = NoticeQueue::default();
        let result = load_service_detail(&repo, &mut notices, 99).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
        let notices = notices.take();
        assert_eq!(notices[0].message, "Không tìm thấy dịch vụ");
    }

    #[test]
    fn status_filter_round_trips_from_strings() {
        assert_eq!(ServiceStatusFilter::from("featured"), ServiceStatusFilter::Featured);
        assert_eq!(ServiceStatusFilter::from("anything"), ServiceStatusFilter::All);
        assert!(ServiceStatusFilter::Featured.matches(&service(1, "A", false, true)));
        assert!(!ServiceStatusFilter::Featured.matches(&service(1, "A", true, false)));
    }
}
