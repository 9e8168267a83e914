//! REST transport for [`ProductStore`].

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use finprod_core::{StoreError, StoreResult};
use finprod_products::Product;

use crate::config::ClientConfig;
use crate::store::ProductStore;

/// Envelope the product API wraps payloads in.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    message: Option<String>,
    data: Option<T>,
}

/// Error body returned on failures.
#[derive(Debug, Default, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

/// Product store backed by the catalog's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpProductStore {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpProductStore {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> StoreResult<Response> {
        let resp = request
            .send()
            .await
            .map_err(|e| StoreError::network(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body: ApiError = resp.json().await.unwrap_or_default();
        Err(status_error(status, body.message))
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> StoreResult<T> {
        resp.json::<T>()
            .await
            .map_err(|e| StoreError::unknown(format!("undecodable response: {e}")))
    }
}

fn status_error(status: StatusCode, message: Option<String>) -> StoreError {
    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound,
        StatusCode::CONFLICT => StoreError::Conflict(message),
        other => StoreError::server(other.as_u16(), message),
    }
}

#[async_trait::async_trait]
impl ProductStore for HttpProductStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let resp = self.send(self.client.get(self.config.products_url())).await?;
        let body: ApiResponse<Vec<Product>> = Self::decode(resp).await?;
        Ok(body.data.unwrap_or_default())
    }

    async fn create(&self, product: Product) -> StoreResult<Product> {
        let resp = self
            .send(self.client.post(self.config.products_url()).json(&product))
            .await?;
        let body: ApiResponse<Product> = Self::decode(resp).await?;
        tracing::debug!(message = ?body.message, "product created remotely");
        Ok(body.data.unwrap_or(product))
    }

    async fn update(&self, id: &str, product: Product) -> StoreResult<Product> {
        let resp = self
            .send(self.client.put(self.config.product_url(id)).json(&product))
            .await?;
        let body: ApiResponse<Product> = Self::decode(resp).await?;
        Ok(body.data.unwrap_or(product))
    }

    async fn delete(&self, id: &str) -> StoreResult<String> {
        let resp = self.send(self.client.delete(self.config.product_url(id))).await?;
        let body: ApiResponse<serde_json::Value> = Self::decode(resp).await?;
        Ok(body.message.unwrap_or_default())
    }

    async fn verify_exists(&self, id: &str) -> StoreResult<bool> {
        let resp = self.send(self.client.get(self.config.verification_url(id))).await?;
        Self::decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(status_error(StatusCode::NOT_FOUND, None), StoreError::NotFound);
        assert_eq!(
            status_error(StatusCode::CONFLICT, Some("taken".into())),
            StoreError::conflict("taken")
        );
        assert_eq!(
            status_error(StatusCode::BAD_REQUEST, Some("Invalid body".into())),
            StoreError::server(400, Some("Invalid body".into()))
        );
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let body: ApiResponse<Vec<Product>> = serde_json::from_str("{}").unwrap();
        assert!(body.data.is_none());
        assert!(body.message.is_none());

        let body: ApiResponse<Vec<Product>> = serde_json::from_str(
            r#"{"data":[{"id":"abc","name":"Tarjeta","description":"Tarjeta de credito",
                "logo":"l.png","date_release":"2025-01-01","date_revision":"2026-01-01"}]}"#,
        )
        .unwrap();
        assert_eq!(body.data.unwrap()[0].id, "abc");
    }
}
