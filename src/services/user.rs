//! Admin account workflows. Every operation here is reserved for the root
//! account; the server enforces the same rule independently.

use crate::domain::types::UserId;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::forms::Draft;
use crate::forms::user::{CreateUserForm, EditUserForm};
use crate::list::{ListState, RowFilter};
use crate::repository::errors::RepositoryError;
use crate::repository::{Authenticator, UserListQuery, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Rows per page in the admin table.
pub const USERS_PER_PAGE: usize = 10;

/// Shown in place of the page when a non-root admin opens it.
pub const ROOT_ONLY_MESSAGE: &str =
    "Chỉ ROOT mới có quyền truy cập vào trang quản lý người dùng.";

pub type UserListState = ListState<User, UserFilters>;

/// The table searches username, email and role locally; nothing narrows
/// the fetch itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserFilters;

impl RowFilter<User> for UserFilters {
    fn matches(&self, user: &User, search: &str) -> bool {
        let term = search.to_lowercase();
        term.is_empty()
            || user.username.to_lowercase().contains(&term)
            || user.email.to_lowercase().contains(&term)
            || user.role.as_str().to_lowercase().contains(&term)
    }
}

pub fn ensure_root(current: &User) -> ServiceResult<()> {
    if current.is_root() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

fn push_failure(
    state: &mut UserListState,
    err: &RepositoryError,
    title: &str,
    fallback: &str,
) {
    if err.is_connectivity() {
        state.notices.push_error(
            "Lỗi kết nối",
            "Không thể kết nối đến server. Vui lòng thử lại.",
        );
    } else {
        let message = err.server_detail().unwrap_or(fallback);
        state.notices.push_error(title, message);
    }
}

/// Reloads the current page of the account table.
pub async fn refresh<R>(
    repo: &R,
    current: &User,
    state: &mut UserListState,
) -> ServiceResult<()>
where
    R: UserReader + Authenticator + ?Sized,
{
    ensure_root(current)?;
    if !repo.has_token() {
        return Ok(());
    }

    let seq = state.begin_fetch();
    let query = UserListQuery::new().paginate(state.page(), state.per_page());
    match repo.list_users(query).await {
        Ok((total, users)) => {
            state.apply_fetch(seq, total, users);
            Ok(())
        }
        Err(RepositoryError::AuthMissing) => {
            state.fetch_failed(seq);
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to fetch users: {err}");
            if state.fetch_failed(seq) {
                push_failure(state, &err, "Lỗi", "Không thể tải danh sách người dùng");
            }
            Err(err.into())
        }
    }
}

/// Validates the draft and creates the account, then refetches the table.
pub async fn create_user<R>(
    repo: &R,
    current: &User,
    state: &mut UserListState,
    draft: &mut Draft<CreateUserForm>,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + Authenticator + ?Sized,
{
    ensure_root(current)?;
    if !draft.validate() {
        return Err(ServiceError::Form(
            "Vui lòng kiểm tra lại thông tin".to_string(),
        ));
    }

    let new_user = NewUser::from(&draft.form);
    match repo.create_user(&new_user).await {
        Ok(created) => {
            state.notices.push_success(
                "Thành công",
                format!("Tạo người dùng \"{}\" thành công", created.username),
            );
            refresh(repo, current, state).await
        }
        Err(err) => {
            log::error!("Failed to create a user: {err}");
            push_failure(
                state,
                &err,
                "Lỗi tạo người dùng",
                "Không thể tạo người dùng. Vui lòng kiểm tra lại thông tin.",
            );
            Err(err.into())
        }
    }
}

/// Validates the draft and saves the edited account, then refetches the
/// table. A blank password in the draft keeps the current one.
pub async fn update_user<R>(
    repo: &R,
    current: &User,
    state: &mut UserListState,
    id: i32,
    draft: &mut Draft<EditUserForm>,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + Authenticator + ?Sized,
{
    ensure_root(current)?;
    if !draft.validate() {
        return Err(ServiceError::Form(
            "Vui lòng kiểm tra lại thông tin".to_string(),
        ));
    }

    let id = UserId::try_from(id)?;
    let updates = UpdateUser::from(&draft.form);
    match repo.update_user(id, &updates).await {
        Ok(updated) => {
            state.notices.push_success(
                "Thành công",
                format!("Cập nhật người dùng \"{}\" thành công", updated.username),
            );
            refresh(repo, current, state).await
        }
        Err(err) => {
            log::error!("Failed to update user {id}: {err}");
            push_failure(
                state,
                &err,
                "Lỗi cập nhật",
                "Không thể cập nhật người dùng. Vui lòng kiểm tra lại thông tin.",
            );
            Err(err.into())
        }
    }
}

/// Deletes the account staged by [`ListState::request_delete`] once the
/// user confirmed, then refetches the table.
pub async fn delete_user<R>(
    repo: &R,
    current: &User,
    state: &mut UserListState,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + Authenticator + ?Sized,
{
    ensure_root(current)?;
    let Some(user) = state.take_confirmed_delete() else {
        return Ok(());
    };

    let id = UserId::try_from(user.id)?;
    match repo.delete_user(id).await {
        Ok(_) => {
            state.notices.push_success(
                "Thành công",
                format!("Xóa người dùng \"{}\" thành công", user.username),
            );
            refresh(repo, current, state).await
        }
        Err(err) => {
            log::error!("Failed to delete user {id}: {err}");
            push_failure(
                state,
                &err,
                "Lỗi xóa người dùng",
                "Không thể xóa người dùng này.",
            );
            Err(err.into())
        }
    }
}
