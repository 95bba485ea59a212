use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::path::PathBuf;

use crate::api::types::{Backdrop, ImageResponse};
use crate::error::PaintError;

/// Client for the wall-recoloring backend.
///
/// Three operations, all keyed by the client identifier:
/// - `GET  /get_uploaded_image?user_id=..` (204 = no image stored yet)
/// - `POST /upload_image`      multipart `file` + `user_id`
/// - `POST /change_wall_color` multipart `color` + `user_id`
///
/// Every success response carries `{"image": <url>}`; the URL is then
/// downloaded and decoded for display.
pub struct ApiClient {
    http: Client,
    base_url: String,
    user_id: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, user_id: String) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        ApiClient {
            http: Client::new(),
            base_url,
            user_id,
        }
    }

    /// Ask the backend for this client's stored image URL.
    /// `Ok(None)` means the backend has nothing stored for us (204).
    pub async fn fetch_uploaded_image(&self) -> Result<Option<String>, PaintError> {
        let response = self
            .http
            .get(format!("{}/get_uploaded_image", self.base_url))
            .query(&[("user_id", self.user_id.as_str())])
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        image_from(response).await.map(Some)
    }

    /// Upload a photo from disk. Returns the stored image URL.
    pub async fn upload_image(&self, path: PathBuf) -> Result<String, PaintError> {
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| PaintError::FileRead(e.to_string()))?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(filename))
            .text("user_id", self.user_id.clone());

        let response = self
            .http
            .post(format!("{}/upload_image", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        image_from(response).await
    }

    /// Ask the backend to repaint the wall in the stored photo.
    /// The server rejects this if no photo was uploaded; we do not pre-check.
    pub async fn change_wall_color(&self, color: &str) -> Result<String, PaintError> {
        let form = Form::new()
            .text("color", color.to_string())
            .text("user_id", self.user_id.clone());

        let response = self
            .http
            .post(format!("{}/change_wall_color", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        image_from(response).await
    }

    /// Download a stored image URL and decode it for display.
    /// Decoding is CPU-bound, so it runs on the blocking pool.
    pub async fn download_backdrop(&self, url: String) -> Result<Backdrop, PaintError> {
        let response = self.http.get(&url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaintError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(transport)?;

        tokio::task::spawn_blocking(move || Backdrop::decode(url, &bytes))
            .await
            .map_err(|e| PaintError::Decode(format!("decode task failed: {}", e)))?
    }

    /// Fetch + download in one step, for the startup operation.
    pub async fn fetch_current_backdrop(&self) -> Result<Option<Backdrop>, PaintError> {
        match self.fetch_uploaded_image().await? {
            None => Ok(None),
            Some(url) => self.download_backdrop(url).await.map(Some),
        }
    }

    /// Upload + download in one step.
    pub async fn upload_backdrop(&self, path: PathBuf) -> Result<Backdrop, PaintError> {
        let url = self.upload_image(path).await?;
        self.download_backdrop(url).await
    }

    /// Recolor + download in one step.
    pub async fn recolor_backdrop(&self, color: &str) -> Result<Backdrop, PaintError> {
        let url = self.change_wall_color(color).await?;
        self.download_backdrop(url).await
    }
}

fn transport(err: reqwest::Error) -> PaintError {
    PaintError::Transport(err.to_string())
}

/// Unwrap a `{"image": <url>}` response, distinguishing bad status from a
/// body that does not match the schema.
async fn image_from(response: reqwest::Response) -> Result<String, PaintError> {
    let status = response.status();
    if !status.is_success() {
        return Err(PaintError::Status(status.as_u16()));
    }

    let body = response.text().await.map_err(transport)?;

    let parsed: ImageResponse = serde_json::from_str(&body)
        .map_err(|e| PaintError::MalformedResponse(e.to_string()))?;

    Ok(parsed.image)
}
