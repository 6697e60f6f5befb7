//! Login, logout and session restoration from the stored bearer token.

use crate::domain::auth::{AuthSession, Credentials};
use crate::domain::user::User;
use crate::dto::notice::NoticeQueue;
use crate::repository::{Authenticator, UserReader};
use crate::services::ServiceResult;

/// Exchanges credentials for a token and greets the signed-in user. The
/// profile fetched right after the exchange rides along in the session.
pub async fn login<R>(
    repo: &R,
    notices: &mut NoticeQueue,
    credentials: &Credentials,
) -> ServiceResult<AuthSession>
where
    R: Authenticator + UserReader + ?Sized,
{
    let token = match repo.login(credentials).await {
        Ok(token) => token,
        Err(err) => {
            log::error!("Login failed: {err}");
            if err.is_connectivity() {
                notices.push_error("Lỗi", "Không thể kết nối đến server");
            } else {
                let message = err
                    .server_detail()
                    .unwrap_or("Tên đăng nhập hoặc mật khẩu không đúng");
                notices.push_error("Lỗi đăng nhập", message);
            }
            return Err(err.into());
        }
    };

    match repo.current_user().await {
        Ok(user) => {
            log::info!("Signed in as {}", user.username);
            notices.push_success(
                "Đăng nhập thành công",
                format!("Xin chào, {}!", user.username),
            );
            Ok(AuthSession { token, user })
        }
        Err(err) => {
            // The token exchange worked but the profile did not arrive;
            // drop the half-established session.
            log::error!("Failed to fetch the profile after login: {err}");
            repo.clear_token();
            Err(err.into())
        }
    }
}

/// Restores the signed-in profile from a stored token. A rejected token is
/// dropped so the next visit lands on the login form.
pub async fn check_auth<R>(repo: &R) -> Option<User>
where
    R: Authenticator + UserReader + ?Sized,
{
    if !repo.has_token() {
        return None;
    }
    match repo.current_user().await {
        Ok(user) => {
            log::info!("Session restored for {}", user.username);
            Some(user)
        }
        Err(err) => {
            log::error!("Stored token rejected: {err}");
            repo.clear_token();
            None
        }
    }
}

/// Drops the stored token and says goodbye.
pub fn logout<R>(repo: &R, notices: &mut NoticeQueue)
where
    R: Authenticator + ?Sized,
{
    repo.clear_token();
    notices.push_success("Đăng xuất thành công", "Bạn đã đăng xuất khỏi hệ thống");
}
