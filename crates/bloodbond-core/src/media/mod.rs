//! Image hosting client for profile photos.
//!
//! Uploads go to an imgbb-compatible endpoint as a multipart form; the
//! hosted URL from the response is what gets stored on the identity
//! profile and the user record.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::ImageHostEndpoint;
use crate::error::{Error, Result};
use crate::util::{compact_text, normalize_base_url};

/// An image picked by the user, read fully into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Accepts an image and returns its hosted URL.
#[allow(async_fn_in_trait)]
pub trait ImageHost {
    async fn upload(&self, image: &ImageFile) -> Result<String>;
}

/// HTTP client for the imgbb upload API.
#[derive(Debug, Clone)]
pub struct ImgbbClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ImgbbClient {
    pub fn new(endpoint: &ImageHostEndpoint) -> Result<Self> {
        let base_url =
            normalize_base_url(&endpoint.base_url, "Image host URL").map_err(Error::InvalidInput)?;
        let api_key = endpoint.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(Error::NotConfigured("image host API key"));
        }
        Ok(Self {
            base_url,
            api_key,
            client: reqwest::Client::builder().build()?,
        })
    }
}

impl ImageHost for ImgbbClient {
    async fn upload(&self, image: &ImageFile) -> Result<String> {
        if image.is_empty() {
            return Err(Error::InvalidInput("image file is empty".to_string()));
        }

        let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        if let Some(content_type) = &image.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new().part("image", part);

        tracing::debug!(
            "Uploading image {} ({} bytes)",
            image.file_name,
            image.bytes.len()
        );
        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upload(format!(
                "HTTP {status}: {}",
                compact_text(&body)
            )));
        }

        let payload = response.json::<UploadResponse>().await?;
        payload.hosted_url()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    display_url: Option<String>,
    url: Option<String>,
}

impl UploadResponse {
    fn hosted_url(self) -> Result<String> {
        if !self.success {
            return Err(Error::Upload("image host reported failure".to_string()));
        }
        self.data
            .and_then(|data| data.display_url.or(data.url))
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Upload("response did not include an image URL".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;

    use super::*;

    fn client_for(server: &MockServer) -> ImgbbClient {
        ImgbbClient::new(&ImageHostEndpoint {
            base_url: server.base_url(),
            api_key: "img-key".to_string(),
        })
        .unwrap()
    }

    fn avatar() -> ImageFile {
        ImageFile::new("avatar.png", Some("image/png".to_string()), vec![137, 80, 78, 71])
    }

    #[tokio::test]
    async fn upload_returns_display_url() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/upload")
                .query_param("key", "img-key")
                .body_contains("avatar.png");
            then.status(200).json_body(serde_json::json!({
                "success": true,
                "status": 200,
                "data": {"display_url": "https://i.ibb.co/abc/avatar.png"}
            }));
        });

        let url = client_for(&server).upload(&avatar()).await.unwrap();

        mock.assert();
        assert_eq!(url, "https://i.ibb.co/abc/avatar.png");
    }

    #[tokio::test]
    async fn unsuccessful_payload_is_a_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/upload");
            then.status(200)
                .json_body(serde_json::json!({"success": false, "data": null}));
        });

        let error = client_for(&server).upload(&avatar()).await.unwrap_err();
        assert!(matches!(error, Error::Upload(_)));
    }

    #[tokio::test]
    async fn empty_file_is_rejected_locally() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/upload");
            then.status(200);
        });

        let empty = ImageFile::new("empty.png", None, Vec::new());
        assert!(client_for(&server).upload(&empty).await.is_err());
        mock.assert_hits(0);
    }

    #[test]
    fn debug_omits_image_bytes() {
        let rendered = format!("{:?}", avatar());
        assert!(rendered.contains("len: 4"));
        assert!(!rendered.contains("137"));
    }
}
