//! Blog workflows: the admin table and the public feed.

use crate::domain::blog::{Blog, BlogSort, BlogTopic, NewBlog, UpdateBlog, sort_blogs};
use crate::domain::types::BlogId;
use crate::forms::Draft;
use crate::forms::blog::BlogForm;
use crate::list::{FeedState, ListState, RowFilter};
use crate::repository::errors::RepositoryError;
use crate::repository::{Authenticator, BlogListQuery, BlogReader, BlogWriter};
use crate::services::{ServiceError, ServiceResult};

/// Rows per page in the admin table.
pub const BLOGS_PER_PAGE: usize = 12;
/// Rows per "load more" step in the public feed.
pub const FEED_PER_PAGE: usize = 9;

pub type BlogListState = ListState<Blog, BlogFilters>;
pub type BlogFeedState = FeedState<Blog, FeedFilters>;

/// The all/active/inactive axis of the admin filter bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
        }
    }

    #[must_use]
    pub fn matches(&self, is_active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => is_active,
            StatusFilter::Inactive => !is_active,
        }
    }
}

impl From<&str> for StatusFilter {
    fn from(value: &str) -> Self {
        match value {
            "active" => StatusFilter::Active,
            "inactive" => StatusFilter::Inactive,
            _ => StatusFilter::All,
        }
    }
}

/// Client-side filters of the admin blog table. The whole page of rows is
/// fetched unfiltered; search and the two dropdowns narrow it locally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlogFilters {
    pub category: Option<String>,
    pub status: StatusFilter,
}

impl RowFilter<Blog> for BlogFilters {
    fn matches(&self, blog: &Blog, search: &str) -> bool {
        let term = search.to_lowercase();
        let category = blog.category.as_deref().unwrap_or("");

        let matches_search = term.is_empty()
            || blog.title.to_lowercase().contains(&term)
            || blog.content.to_lowercase().contains(&term)
            || category.to_lowercase().contains(&term);
        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|wanted| category == wanted);

        matches_search && matches_category && self.status.matches(blog.is_active)
    }
}

/// Filters of the public feed. The category narrows the fetch itself; the
/// search term and sort order are applied to the accumulated rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedFilters {
    pub category: Option<String>,
    pub sort: BlogSort,
}

impl RowFilter<Blog> for FeedFilters {
    fn matches(&self, blog: &Blog, search: &str) -> bool {
        let term = search.to_lowercase();
        term.is_empty()
            || blog.title.to_lowercase().contains(&term)
            || blog.content.to_lowercase().contains(&term)
    }
}

/// Reloads the current page of the admin table. Without a stored token the
/// call is a no-op; the page only renders behind the login gate.
pub async fn refresh<R>(repo: &R, state: &mut BlogListState) -> ServiceResult<()>
where
    R: BlogReader + Authenticator + ?Sized,
{
    if !repo.has_token() {
        return Ok(());
    }

    let seq = state.begin_fetch();
    let query = BlogListQuery::new().paginate(state.page(), state.per_page());
    match repo.list_blogs(query).await {
        Ok((total, blogs)) => {
            state.apply_fetch(seq, total, blogs);
            Ok(())
        }
        // A logout raced the fetch; the login gate takes over from here.
        Err(RepositoryError::AuthMissing) => {
            state.fetch_failed(seq);
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to fetch blogs: {err}");
            if state.fetch_failed(seq) {
                push_fetch_failure(state, &err);
            }
            Err(err.into())
        }
    }
}

fn push_fetch_failure(state: &mut BlogListState, err: &RepositoryError) {
    if err.is_connectivity() {
        state.notices.push_error(
            "Lỗi kết nối",
            "Không thể kết nối đến server. Vui lòng thử lại.",
        );
    } else {
        let message = err
            .server_detail()
            .unwrap_or("Không thể tải danh sách bài viết");
        state.notices.push_error("Lỗi", message);
    }
}

/// Validates the draft and creates the post, then refetches the table.
pub async fn create_blog<R>(
    repo: &R,
    state: &mut BlogListState,
    draft: &mut Draft<BlogForm>,
) -> ServiceResult<()>
where
    R: BlogReader + BlogWriter + Authenticator + ?Sized,
{
    if !draft.validate() {
        return Err(ServiceError::Form(
            "Vui lòng kiểm tra lại thông tin".to_string(),
        ));
    }

    let new_blog = NewBlog::from(&draft.form);
    match repo.create_blog(&new_blog).await {
        Ok(created) => {
            state.notices.push_success(
                "Thành công",
                format!("Tạo bài viết \"{}\" thành công", created.title),
            );
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to create blog: {err}");
            if err.is_connectivity() {
                state.notices.push_error(
                    "Lỗi kết nối",
                    "Không thể kết nối đến server. Vui lòng thử lại.",
                );
            } else {
                let message = err
                    .server_detail()
                    .unwrap_or("Không thể tạo bài viết. Vui lòng kiểm tra lại thông tin.");
                state.notices.push_error("Lỗi tạo bài viết", message);
            }
            Err(err.into())
        }
    }
}

/// Validates the draft and saves the edited post, then refetches the table.
pub async fn update_blog<R>(
    repo: &R,
    state: &mut BlogListState,
    id: i32,
    draft: &mut Draft<BlogForm>,
) -> ServiceResult<()>
where
    R: BlogReader + BlogWriter + Authenticator + ?Sized,
{
    if !draft.validate() {
        return Err(ServiceError::Form(
            "Vui lòng kiểm tra lại thông tin".to_string(),
        ));
    }

    let id = BlogId::try_from(id)?;
    let updates = UpdateBlog::from(&draft.form);
    match repo.update_blog(id, &updates).await {
        Ok(updated) => {
            state.notices.push_success(
                "Thành công",
                format!("Cập nhật bài viết \"{}\" thành công", updated.title),
            );
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to update blog {id}: {err}");
            if err.is_connectivity() {
                state.notices.push_error(
                    "Lỗi kết nối",
                    "Không thể kết nối đến server. Vui lòng thử lại.",
                );
            } else {
                let message = err
                    .server_detail()
                    .unwrap_or("Không thể cập nhật bài viết. Vui lòng kiểm tra lại thông tin.");
                state.notices.push_error("Lỗi cập nhật", message);
            }
            Err(err.into())
        }
    }
}

/// Deletes the post staged by [`ListState::request_delete`] once the user
/// confirmed, then refetches the table.
pub async fn delete_blog<R>(repo: &R, state: &mut BlogListState) -> ServiceResult<()>
where
    R: BlogReader + BlogWriter + Authenticator + ?Sized,
{
    let Some(blog) = state.take_confirmed_delete() else {
        return Ok(());
    };

    let id = BlogId::try_from(blog.id)?;
    match repo.delete_blog(id).await {
        Ok(()) => {
            state.notices.push_success(
                "Thành công",
                format!("Xóa bài viết \"{}\" thành công", blog.title),
            );
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to delete blog {id}: {err}");
            if err.is_connectivity() {
                state.notices.push_error(
                    "Lỗi kết nối",
                    "Không thể kết nối đến server. Vui lòng thử lại.",
                );
            } else {
                let message = err
                    .server_detail()
                    .unwrap_or("Không thể xóa bài viết này.");
                state.notices.push_error("Lỗi xóa bài viết", message);
            }
            Err(err.into())
        }
    }
}

/// Fetches one published post for the public detail page.
pub async fn get_blog<R>(repo: &R, id: i32) -> ServiceResult<Blog>
where
    R: BlogReader + ?Sized,
{
    let id = BlogId::try_from(id)?;
    repo.get_blog_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Reloads the public feed from the top with the current category filter.
pub async fn refresh_feed<R>(repo: &R, feed: &mut BlogFeedState) -> ServiceResult<()>
where
    R: BlogReader + ?Sized,
{
    let seq = feed.begin_reset();
    fetch_feed_page(repo, feed, seq).await
}

/// Appends the next page to the feed, if anything is left to load.
pub async fn load_more_feed<R>(repo: &R, feed: &mut BlogFeedState) -> ServiceResult<()>
where
    R: BlogReader + ?Sized,
{
    let Some(seq) = feed.begin_load_more() else {
        return Ok(());
    };
    fetch_feed_page(repo, feed, seq).await
}

async fn fetch_feed_page<R>(repo: &R, feed: &mut BlogFeedState, seq: u64) -> ServiceResult<()>
where
    R: BlogReader + ?Sized,
{
    let mut query = BlogListQuery::new()
        .is_active(true)
        .paginate(feed.next_page(), feed.per_page());
    if let Some(category) = &feed.filters().category {
        query = query.category(category.clone());
    }

    match repo.list_blogs(query).await {
        Ok((_, blogs)) => {
            feed.apply_fetch(seq, blogs);
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to fetch the blog feed: {err}");
            if feed.fetch_failed(seq) {
                feed.notices
                    .push_error("Lỗi kết nối", "Không thể tải danh sách bài viết");
            }
            Err(err.into())
        }
    }
}

/// The loaded feed filtered by the committed search term and sorted by the
/// selected order.
#[must_use]
pub fn feed_rows(feed: &BlogFeedState) -> Vec<Blog> {
    let mut rows: Vec<Blog> = feed.visible_rows().into_iter().cloned().collect();
    sort_blogs(&mut rows, feed.filters().sort);
    rows
}

/// Topic chips for the feed filter bar: the promoted topics first, then
/// whatever ad-hoc categories the loaded posts carry.
#[must_use]
pub fn feed_topics(feed: &BlogFeedState) -> Vec<BlogTopic> {
    let mut topics: Vec<BlogTopic> = BlogTopic::PROMOTED.to_vec();
    let mut extras: Vec<BlogTopic> = feed
        .rows()
        .iter()
        .filter_map(|blog| blog.category.as_deref())
        .map(BlogTopic::from)
        .filter(|topic| matches!(topic, BlogTopic::Other(_)))
        .collect();
    extras.sort_by(|a, b| a.slug().cmp(b.slug()));
    extras.dedup();
    topics.extend(extras);
    topics
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::dto::notice::NoticeLevel;
    use crate::pagination::TotalCount;
    use crate::repository::mock::MockRepository;

    fn blog(id: i32, title: &str, category: &str, is_active: bool) -> Blog {
        let created_at = NaiveDate::from_ymd_opt(2024, 5, (id % 28 + 1) as u32)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .expect("valid timestamp");
        Blog {
            id,
            title: title.to_string(),
            content: format!("Nội dung của {title}"),
            image_url: None,
            category: Some(category.to_string()),
            is_active,
            created_at,
            updated_at: created_at,
        }
    }

    fn valid_draft() -> Draft<BlogForm> {
        Draft::new(BlogForm {
            title: "Quy trình in offset".to_string(),
            content: "x".repeat(80),
            image_url: String::new(),
            category: "in-offset".to_string(),
            is_active: true,
        })
    }

    /// A missing token skips the fetch entirely instead of erroring.
    #[tokio::test]
    async fn refresh_silently_skips_without_a_token() {
        let mut repo = MockRepository::new();
        repo.expect_has_token().return_const(false);
        repo.expect_list_blogs().times(0);

        let mut state = BlogListState::new(BLOGS_PER_PAGE);
        refresh(&repo, &mut state).await.expect("should skip");
        assert!(state.rows().is_empty());
        assert!(state.notices.is_empty());
    }

    #[tokio::test]
    async fn refresh_fetches_the_current_page() {
        let mut repo = MockRepository::new();
        repo.expect_has_token().return_const(true);
        repo.expect_list_blogs()
            .withf(|query| {
                query
                    .pagination
                    .as_ref()
                    .is_some_and(|p| p.skip() == 12 && p.limit() == 12)
            })
            .times(1)
            .returning(|_| Ok((TotalCount::AtLeast(25), vec![blog(1, "A", "in-offset", true)])));

        let mut state = BlogListState::new(BLOGS_PER_PAGE);
        let seq = state.begin_fetch();
        state.apply_fetch(seq, TotalCount::AtLeast(25), vec![blog(2, "B", "thiet-ke", true)]);
        state.set_page(2);

        refresh(&repo, &mut state).await.expect("should fetch");
        assert_eq!(state.rows().len(), 1);
        assert_eq!(state.rows()[0].title, "A");
    }

    #[tokio::test]
    async fn fetch_failure_pushes_the_exact_notice() {
        let mut repo = MockRepository::new();
        repo.expect_has_token().return_const(true);
        repo.expect_list_blogs().returning(|_| {
            Err(RepositoryError::Remote {
                status: 500,
                detail: None,
            })
        });

        let mut state = BlogListState::new(BLOGS_PER_PAGE);
        let result = refresh(&repo, &mut state).await;
        assert!(result.is_err());

        let notices = state.notices.take();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].title, "Lỗi");
        assert_eq!(notices[0].message, "Không thể tải danh sách bài viết");
    }

    #[tokio::test]
    async fn create_reports_the_server_echoed_title_and_refetches() {
        let mut repo = MockRepository::new();
        repo.expect_has_token().return_const(true);
        repo.expect_create_blog()
            .withf(|new_blog| new_blog.title == "Quy trình in offset" && new_blog.is_active)
            .times(1)
            .returning(|_| Ok(blog(7, "Quy trình in offset", "in-offset", true)));
        repo.expect_list_blogs()
            .times(1)
            .returning(|_| Ok((TotalCount::Exact(1), vec![blog(7, "Quy trình in offset", "in-offset", true)])));

        let mut state = BlogListState::new(BLOGS_PER_PAGE);
        let mut draft = valid_draft();
        create_blog(&repo, &mut state, &mut draft)
            .await
            .expect("should create");

        let notices = state.notices.take();
        assert_eq!(notices[0].message, "Tạo bài viết \"Quy trình in offset\" thành công");
        assert_eq!(state.rows().len(), 1);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_repository() {
        let mut repo = MockRepository::new();
        repo.expect_create_blog().times(0);

        let mut state = BlogListState::new(BLOGS_PER_PAGE);
        let mut draft = Draft::new(BlogForm::default());
        let result = create_blog(&repo, &mut state, &mut draft).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(draft.has_errors());
        assert!(state.notices.is_empty());
    }

    #[tokio::test]
    async fn delete_uses_the_staged_row_and_its_title() {
        let mut repo = MockRepository::new();
        repo.expect_has_token().return_const(true);
        repo.expect_delete_blog()
            .withf(|id| id.get() == 3)
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_list_blogs()
            .times(1)
            .returning(|_| Ok((TotalCount::Exact(0), vec![])));

        let mut state = BlogListState::new(BLOGS_PER_PAGE);
        let seq = state.begin_fetch();
        state.apply_fetch(seq, TotalCount::Exact(1), vec![blog(3, "Bài cũ", "xu-huong", false)]);
        assert!(state.request_delete(3));

        delete_blog(&repo, &mut state).await.expect("should delete");
        let notices = state.notices.take();
        assert_eq!(notices[0].message, "Xóa bài viết \"Bài cũ\" thành công");
    }

    #[tokio::test]
    async fn delete_without_confirmation_is_a_no_op() {
        let mut repo = MockRepository::new();
        repo.expect_delete_blog().times(0);

        let mut state = BlogListState::new(BLOGS_PER_PAGE);
        delete_blog(&repo, &mut state).await.expect("nothing staged");
    }

    #[test]
    fn admin_filters_combine_search_category_and_status() {
        let filters = BlogFilters {
            category: Some("in-offset".to_string()),
            status: StatusFilter::Active,
        };
        assert!(filters.matches(&blog(1, "In offset giá rẻ", "in-offset", true), "GIÁ"));
        assert!(!filters.matches(&blog(2, "In offset giá rẻ", "in-offset", false), "giá"));
        assert!(!filters.matches(&blog(3, "In offset giá rẻ", "thiet-ke", true), "giá"));
        assert!(!filters.matches(&blog(4, "Bài khác", "in-offset", true), "giá"));
    }

    #[tokio::test]
    async fn feed_load_more_appends_and_respects_has_more() {
        let mut repo = MockRepository::new();
        let first: Vec<Blog> = (1..=9).map(|i| blog(i, &format!("Bài {i}"), "xu-huong", true)).collect();
        repo.expect_list_blogs()
            .withf(|query| {
                query.is_active == Some(true)
                    && query.pagination.as_ref().is_some_and(|p| p.skip() == 0)
            })
            .times(1)
            .returning(move |_| Ok((TotalCount::AtLeast(10), first.clone())));

        let mut feed = BlogFeedState::new(FEED_PER_PAGE);
        refresh_feed(&repo, &mut feed).await.expect("first page");
        assert_eq!(feed.rows().len(), 9);
        assert!(feed.has_more());

        let mut repo = MockRepository::new();
        repo.expect_list_blogs()
            .withf(|query| query.pagination.as_ref().is_some_and(|p| p.skip() == 9))
            .times(1)
            .returning(|_| Ok((TotalCount::Exact(10), vec![blog(10, "Bài 10", "xu-huong", true)])));

        load_more_feed(&repo, &mut feed).await.expect("second page");
        assert_eq!(feed.rows().len(), 10);
        assert!(!feed.has_more());
    }

    #[test]
    fn feed_rows_sort_after_filtering() {
        let mut feed = BlogFeedState::new(FEED_PER_PAGE);
        let seq = feed.begin_reset();
        feed.apply_fetch(
            seq,
            vec![
                blog(2, "Bảng màu", "thiet-ke", true),
                blog(1, "An toàn mực in", "kien-thuc", true),
            ],
        );
        feed.set_filters(FeedFilters {
            category: None,
            sort: BlogSort::Title,
        });

        let rows = feed_rows(&feed);
        assert_eq!(rows[0].title, "An toàn mực in");
        assert_eq!(rows[1].title, "Bảng màu");
    }

    #[test]
    fn feed_topics_blend_promoted_and_ad_hoc_categories() {
        let mut feed = BlogFeedState::new(FEED_PER_PAGE);
        let seq = feed.begin_reset();
        feed.apply_fetch(
            seq,
            vec![
                blog(1, "Chọn giấy in", "giay-in", true),
                blog(2, "Bảng màu", "thiet-ke", true),
                blog(3, "So sánh giấy", "giay-in", true),
            ],
        );

        let topics = feed_topics(&feed);
        assert_eq!(topics.len(), BlogTopic::PROMOTED.len() + 1);
        assert_eq!(topics[0], BlogTopic::Offset);
        assert_eq!(
            topics.last(),
            Some(&BlogTopic::Other("giay-in".to_string()))
        );
    }
}
