//! The image library embedded in the admin services page, plus the public
//! gallery fetch.

use crate::domain::image::{ImageAsset, NewImage, UpdateImage};
use crate::domain::types::ImageId;
use crate::dto::notice::NoticeQueue;
use crate::list::{ListState, Unfiltered};
use crate::repository::errors::RepositoryError;
use crate::repository::{Authenticator, ImageListQuery, ImageReader, ImageWriter};
use crate::services::ServiceResult;

/// The library loads a single batch of at most this many assets.
pub const IMAGE_LIBRARY_LIMIT: usize = 100;
/// Every asset managed here lives in this category.
pub const IMAGE_LIBRARY_CATEGORY: &str = "printing";
/// Confirmation prompt shown before a delete goes out.
pub const DELETE_IMAGE_PROMPT: &str = "Xóa ảnh này?";

/// No client-side narrowing; the category is pinned at fetch time.
pub type ImageLibraryState = ListState<ImageAsset, Unfiltered>;

/// Reloads the library. Without a stored token the call is a no-op; the
/// manager only opens behind the login gate.
pub async fn refresh<R>(repo: &R, state: &mut ImageLibraryState) -> ServiceResult<()>
where
    R: ImageReader + Authenticator + ?Sized,
{
    if !repo.has_token() {
        return Ok(());
    }

    let seq = state.begin_fetch();
    let query = ImageListQuery::new()
        .category(IMAGE_LIBRARY_CATEGORY)
        .paginate(1, IMAGE_LIBRARY_LIMIT);
    match repo.list_images(query).await {
        Ok((total, images)) => {
            state.apply_fetch(seq, total, images);
            Ok(())
        }
        Err(RepositoryError::AuthMissing) => {
            state.fetch_failed(seq);
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to fetch the image library: {err}");
            if state.fetch_failed(seq) {
                push_rejection(&mut state.notices, &err, "Không thể tải danh sách ảnh");
            }
            Err(err.into())
        }
    }
}

/// A rejection the server answered gets a toast; a request that never
/// arrived is only logged.
fn push_rejection(notices: &mut NoticeQueue, err: &RepositoryError, message: &str) {
    if err.status().is_some() {
        notices.push_error("Lỗi", message);
    }
}

/// Uploads a file into the library's category, then refetches.
pub async fn upload_image<R>(
    repo: &R,
    state: &mut ImageLibraryState,
    filename: String,
    bytes: Vec<u8>,
    alt_text: Option<String>,
    is_visible: bool,
) -> ServiceResult<()>
where
    R: ImageReader + ImageWriter + Authenticator + ?Sized,
{
    let new_image = NewImage::new(
        filename,
        bytes,
        alt_text,
        Some(IMAGE_LIBRARY_CATEGORY.to_string()),
        is_visible,
    );
    match repo.upload_image(&new_image).await {
        Ok(_) => {
            state.notices.push_success("Thành công", "Đã tải ảnh");
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to upload \"{}\": {err}", new_image.filename);
            push_rejection(&mut state.notices, &err, "Không thể tải ảnh");
            Err(err.into())
        }
    }
}

/// Saves caption and visibility edits, then refetches. Both fields go out
/// on every save; the category is never touched from the manager.
pub async fn update_image<R>(
    repo: &R,
    state: &mut ImageLibraryState,
    id: i32,
    alt_text: String,
    is_visible: bool,
) -> ServiceResult<()>
where
    R: ImageReader + ImageWriter + Authenticator + ?Sized,
{
    let id = ImageId::try_from(id)?;
    let updates = UpdateImage {
        alt_text: Some(alt_text),
        is_visible: Some(is_visible),
        category: None,
    };
    match repo.update_image(id, &updates).await {
        Ok(_) => {
            state.notices.push_success("Đã cập nhật", "");
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to update image {id}: {err}");
            push_rejection(&mut state.notices, &err, "Cập nhật thất bại");
            Err(err.into())
        }
    }
}

/// Deletes the asset staged by [`ListState::request_delete`] once the user
/// confirmed, then refetches.
pub async fn delete_image<R>(repo: &R, state: &mut ImageLibraryState) -> ServiceResult<()>
where
    R: ImageReader + ImageWriter + Authenticator + ?Sized,
{
    let Some(image) = state.take_confirmed_delete() else {
        return Ok(());
    };

    let id = ImageId::try_from(image.id)?;
    match repo.delete_image(id).await {
        Ok(()) => {
            state.notices.push_success("Đã xóa ảnh", "");
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to delete image {id}: {err}");
            push_rejection(&mut state.notices, &err, "Xóa thất bại");
            Err(err.into())
        }
    }
}

/// Visible assets of one category, for the public galleries. Failures are
/// logged and surface as an empty gallery.
pub async fn visible_images<R>(repo: &R, category: &str) -> Vec<ImageAsset>
where
    R: ImageReader + ?Sized,
{
    let query = ImageListQuery::new()
        .category(category)
        .is_visible(true)
        .paginate(1, IMAGE_LIBRARY_LIMIT);
    match repo.list_images(query).await {
        Ok((_, images)) => images,
        Err(err) => {
            log::warn!("Failed to fetch the {category} gallery: {err}");
            Vec::new()
        }
    }
}

/// Every category present in the library, for pickers elsewhere.
pub async fn image_categories<R>(repo: &R) -> ServiceResult<Vec<String>>
where
    R: ImageReader + ?Sized,
{
    repo.list_image_categories().await.map_err(|err| {
        log::error!("Failed to fetch image categories: {err}");
        err.into()
    })
}
