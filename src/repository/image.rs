use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{
    domain::image::{ImageAsset, NewImage, UpdateImage},
    domain::types::ImageId,
    dto::envelope::ListEnvelope,
    pagination::TotalCount,
    repository::errors::RepositoryResult,
    repository::http::{HttpRepository, push_pagination, split_list},
    repository::{ImageListQuery, ImageReader, ImageWriter},
};

/// Upload acknowledgement; the message part is display-only.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    image: ImageAsset,
}

#[async_trait]
impl ImageReader for HttpRepository {
    async fn list_images(
        &self,
        query: ImageListQuery,
    ) -> RepositoryResult<(TotalCount, Vec<ImageAsset>)> {
        let mut params: Vec<(String, String)> = Vec::new();
        push_pagination(&mut params, &query.pagination);
        if let Some(is_visible) = query.is_visible {
            params.push(("is_visible".to_string(), is_visible.to_string()));
        }
        if let Some(category) = &query.category {
            params.push(("category".to_string(), category.clone()));
        }

        let envelope: ListEnvelope<ImageAsset> =
            Self::send_json(self.public(Method::GET, "/images/").query(&params)).await?;
        Ok(split_list(envelope, &query.pagination))
    }

    async fn list_image_categories(&self) -> RepositoryResult<Vec<String>> {
        Self::send_json(self.public(Method::GET, "/images/categories/list")).await
    }
}

#[async_trait]
impl ImageWriter for HttpRepository {
    async fn upload_image(&self, new_image: &NewImage) -> RepositoryResult<ImageAsset> {
        let part = Part::bytes(new_image.bytes.clone()).file_name(new_image.filename.clone());
        let mut form = Form::new()
            .part("file", part)
            .text("is_visible", new_image.is_visible.to_string());
        if let Some(alt_text) = &new_image.alt_text {
            form = form.text("alt_text", alt_text.clone());
        }
        if let Some(category) = &new_image.category {
            form = form.text("category", category.clone());
        }

        let response: UploadResponse =
            Self::send_json(self.authed(Method::POST, "/images/upload")?.multipart(form)).await?;
        Ok(response.image)
    }

    async fn update_image(
        &self,
        id: ImageId,
        updates: &UpdateImage,
    ) -> RepositoryResult<ImageAsset> {
        Self::send_json(
            self.authed(Method::PUT, &format!("/images/{id}"))?
                .json(updates),
        )
        .await
    }

    async fn delete_image(&self, id: ImageId) -> RepositoryResult<()> {
        Self::send_empty(self.authed(Method::DELETE, &format!("/images/{id}"))?).await
    }
}
