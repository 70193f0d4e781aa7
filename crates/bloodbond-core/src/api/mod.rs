//! Backend REST API client.
//!
//! Two seams sit on top of the backend: [`RegionDirectory`] for the
//! division/district/upazila cascade and [`UserDirectory`] for donor
//! records. [`BackendClient`] implements both over HTTP; forms and tests
//! only depend on the traits.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::models::{District, Division, NewUser, RegionId, Upazila, UserPatch, UserRecord};
use crate::util::{compact_text, normalize_base_url};

/// Read side of the administrative region cascade.
#[allow(async_fn_in_trait)]
pub trait RegionDirectory {
    async fn divisions(&self) -> Result<Vec<Division>>;
    async fn districts(&self, division_id: &RegionId) -> Result<Vec<District>>;
    async fn upazilas(&self, district_id: &RegionId) -> Result<Vec<Upazila>>;
}

/// Donor records keyed by email.
#[allow(async_fn_in_trait)]
pub trait UserDirectory {
    async fn fetch_user(&self, email: &str) -> Result<UserRecord>;
    async fn update_user(&self, email: &str, patch: &UserPatch) -> Result<()>;
    async fn create_user(&self, user: &NewUser) -> Result<()>;
}

/// HTTP client for the Bloodbond backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    /// Builds a client for an explicit API base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url =
            normalize_base_url(base_url.as_ref(), "API base URL").map_err(Error::InvalidInput)?;
        Ok(Self {
            base_url,
            client: reqwest::Client::builder().build()?,
        })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_url(&self, email: &str) -> Result<String> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::InvalidInput("email must not be empty".to_string()));
        }
        Ok(format!(
            "{}/user/{}",
            self.base_url,
            urlencoding::encode(email)
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = send_checked(request.header("Accept", "application/json")).await?;
        Ok(response.json::<T>().await?)
    }
}

impl RegionDirectory for BackendClient {
    async fn divisions(&self) -> Result<Vec<Division>> {
        tracing::debug!("Fetching divisions");
        self.get_json(self.client.get(format!("{}/all-divisions", self.base_url)))
            .await
    }

    async fn districts(&self, division_id: &RegionId) -> Result<Vec<District>> {
        tracing::debug!("Fetching districts for division {}", division_id);
        self.get_json(
            self.client
                .get(format!("{}/districts", self.base_url))
                .query(&[("divisionId", division_id.as_str())]),
        )
        .await
    }

    async fn upazilas(&self, district_id: &RegionId) -> Result<Vec<Upazila>> {
        tracing::debug!("Fetching upazilas for district {}", district_id);
        self.get_json(
            self.client
                .get(format!("{}/upazilas", self.base_url))
                .query(&[("districtId", district_id.as_str())]),
        )
        .await
    }
}

impl UserDirectory for BackendClient {
    async fn fetch_user(&self, email: &str) -> Result<UserRecord> {
        let url = self.user_url(email)?;
        self.get_json(self.client.get(url)).await
    }

    async fn update_user(&self, email: &str, patch: &UserPatch) -> Result<()> {
        let url = self.user_url(email)?;
        send_checked(self.client.patch(url).json(patch)).await?;
        Ok(())
    }

    async fn create_user(&self, user: &NewUser) -> Result<()> {
        send_checked(
            self.client
                .post(format!("{}/users", self.base_url))
                .json(user),
        )
        .await?;
        Ok(())
    }
}

async fn send_checked(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await?;
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        compact_text(&body)
    };
    Err(Error::Api { status, message })
}
