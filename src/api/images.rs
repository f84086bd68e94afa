//! Hero image and profile picture endpoints.

use reqwest::header::CONTENT_TYPE;

use super::{send, send_empty, ApiClient, Authorized};
use crate::errors::ClientError;
use crate::models::{Image, ImageSubject, PetitionId, UserId};

impl ApiClient {
    /// GET /petitions/:id/image - Fetch a hero image. `None` when absent.
    pub async fn get_petition_image(
        &self,
        petition_id: PetitionId,
    ) -> Result<Option<Image>, ClientError> {
        self.fetch_image(
            &format!("/petitions/{}/image", petition_id),
            ImageSubject::HeroImage,
        )
        .await
    }

    /// PUT /petitions/:id/image - Set a hero image.
    pub async fn put_petition_image(
        &self,
        token: &str,
        petition_id: PetitionId,
        image: &Image,
    ) -> Result<(), ClientError> {
        self.upload_image(token, &format!("/petitions/{}/image", petition_id), image)
            .await
    }

    /// GET /users/:id/image - Fetch a profile picture. `None` when absent.
    pub async fn get_user_image(&self, user_id: UserId) -> Result<Option<Image>, ClientError> {
        self.fetch_image(
            &format!("/users/{}/image", user_id),
            ImageSubject::ProfilePicture,
        )
        .await
    }

    /// PUT /users/:id/image - Set a profile picture.
    pub async fn put_user_image(
        &self,
        token: &str,
        user_id: UserId,
        image: &Image,
    ) -> Result<(), ClientError> {
        self.upload_image(token, &format!("/users/{}/image", user_id), image)
            .await
    }

    /// DELETE /users/:id/image - Remove a profile picture.
    pub async fn delete_user_image(&self, token: &str, user_id: UserId) -> Result<(), ClientError> {
        send_empty(
            self.delete(&format!("/users/{}/image", user_id))
                .authorized(token),
        )
        .await
    }

    /// URL of a petition's hero image, for display.
    pub fn petition_image_url(&self, petition_id: PetitionId) -> String {
        self.url(&format!("/petitions/{}/image", petition_id))
    }

    /// URL of a user's profile picture, for display.
    pub fn user_image_url(&self, user_id: UserId) -> String {
        self.url(&format!("/users/{}/image", user_id))
    }

    async fn fetch_image(
        &self,
        path: &str,
        subject: ImageSubject,
    ) -> Result<Option<Image>, ClientError> {
        let response = match send(self.get(path)).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.bytes().await?;
        let image = Image::new(subject, &content_type, bytes.to_vec()).map_err(|e| {
            ClientError::Decode(format!("unexpected image from {}: {}", path, e))
        })?;
        Ok(Some(image))
    }

    async fn upload_image(&self, token: &str, path: &str, image: &Image) -> Result<(), ClientError> {
        send_empty(
            self.put(path)
                .authorized(token)
                .header(CONTENT_TYPE, image.kind().as_mime())
                .body(image.bytes().to_vec()),
        )
        .await
    }
}
