use std::future::Future;

use reqwest::Response;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{FoodPlate, FoodPlateInput, NewFoodPlate};

/// Operations against the `/foods` collection resource.
///
/// Every call is fire-once: no retries, no timeouts beyond the transport's,
/// no idempotency keys.
pub trait FoodsApi {
    /// `GET /foods`
    fn list_all(&self) -> impl Future<Output = Result<Vec<FoodPlate>, ApiError>> + Send;

    /// `POST /foods` with `available: true` injected.
    fn create(
        &self,
        input: FoodPlateInput,
    ) -> impl Future<Output = Result<FoodPlate, ApiError>> + Send;

    /// `PUT /foods/{id}` replacing the stored record.
    fn update(
        &self,
        id: u64,
        plate: FoodPlate,
    ) -> impl Future<Output = Result<FoodPlate, ApiError>> + Send;

    /// `DELETE /foods/{id}`
    fn remove(&self, id: u64) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// HTTP client for a `/foods` server.
#[derive(Debug, Clone)]
pub struct HttpFoodsApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFoodsApi {
    /// Creates a client for the given server.
    ///
    /// A bare `host:port` is treated as plain HTTP, and trailing slashes are
    /// dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("http://{}", base_url)
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Returns the normalized server URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/foods", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/foods/{}", self.base_url, id)
    }

    /// Turns a non-2xx response into the matching [`ApiError`].
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        let body = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string()
        } else {
            body
        };

        tracing::warn!("{} responded {}: {}", url, status, body);
        Err(ApiError::from_status(status.as_u16(), &url, body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl FoodsApi for HttpFoodsApi {
    async fn list_all(&self) -> Result<Vec<FoodPlate>, ApiError> {
        let url = self.collection_url();
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let foods: Vec<FoodPlate> = Self::decode(Self::check(response).await?).await?;
        tracing::debug!("Fetched {} food plate(s)", foods.len());
        Ok(foods)
    }

    async fn create(&self, input: FoodPlateInput) -> Result<FoodPlate, ApiError> {
        let url = self.collection_url();
        tracing::debug!("POST {} ({})", url, input.name);

        let response = self
            .client
            .post(&url)
            .json(&NewFoodPlate::from(input))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(Self::check(response).await?).await
    }

    async fn update(&self, id: u64, plate: FoodPlate) -> Result<FoodPlate, ApiError> {
        let url = self.item_url(id);
        tracing::debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .json(&plate)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(Self::check(response).await?).await
    }

    async fn remove(&self, id: u64) -> Result<(), ApiError> {
        let url = self.item_url(id);
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }
}
