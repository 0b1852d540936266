//! HTTP client for the catalog API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};

use super::CatalogApi;
use super::auth::ApiKey;
use super::models::{
    CreateProductRequest, CreatedProduct, Envelope, ProductId, RemoteProduct, SearchPage,
    UpdateProductRequest, UpdateResponse,
};
use crate::config::ApiConfig;

/// Application code of a successful create
const CODE_CREATED: i64 = 201;
/// Application code of a successful search or update
const CODE_OK: i64 = 200;

/// Longest response excerpt included in error messages
const BODY_EXCERPT_CHARS: usize = 200;

pub struct CatalogClient {
    http: reqwest::Client,
    config: ApiConfig,
    api_key: ApiKey,
}

impl CatalogClient {
    pub fn new(config: ApiConfig, api_key: ApiKey) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(self.config.api_key_header.as_str(), self.api_key.expose())
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn create_product(&self, request: &CreateProductRequest) -> Result<ProductId> {
        let url = self.config.create_url();
        log::debug!("POST {} ({})", url, request.name);

        let response = self
            .authorized(self.http.post(&url))
            .json(request)
            .send()
            .await
            .context("POST request failed")?;
        let body = response
            .text()
            .await
            .context("Failed to read POST response")?;

        let envelope: Envelope<CreatedProduct> = serde_json::from_str(&body)
            .with_context(|| format!("POST response not JSON: {}", excerpt(&body)))?;

        if envelope.code != Some(CODE_CREATED) {
            anyhow::bail!(
                "Create rejected. Code: {}, Msg: {}",
                envelope
                    .code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                envelope.message.unwrap_or_default()
            );
        }

        envelope
            .result
            .and_then(|created| created.id)
            .with_context(|| format!("Created but id missing in result: {}", excerpt(&body)))
    }

    async fn update_product(
        &self,
        id: &ProductId,
        request: &UpdateProductRequest,
    ) -> Result<UpdateResponse> {
        let url = self.config.update_url(id.as_str());
        log::debug!("PUT {}", url);

        let response = self
            .authorized(self.http.put(&url))
            .json(request)
            .send()
            .await
            .context("PUT request failed")?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read PUT response")?;

        let code = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.code);

        Ok(UpdateResponse { status, code, body })
    }

    async fn search_products(&self, query: &str) -> Result<Vec<RemoteProduct>> {
        let url = self.config.search_url();
        log::debug!("GET {} search='{}'", url, query);

        let response = self
            .authorized(self.http.get(&url))
            .query(&[
                ("page", "1".to_string()),
                ("limit", self.config.search_limit.to_string()),
                ("search", query.to_string()),
            ])
            .send()
            .await
            .context("Search request failed")?;
        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read search response")?;

        if status != StatusCode::OK {
            anyhow::bail!("Search returned HTTP {}: {}", status.as_u16(), excerpt(&body));
        }

        let envelope: Envelope<SearchPage> = serde_json::from_str(&body)
            .with_context(|| format!("Search response not JSON: {}", excerpt(&body)))?;

        if envelope.code != Some(CODE_OK) {
            anyhow::bail!(
                "Search rejected. Code: {}, Msg: {}",
                envelope
                    .code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                envelope.message.unwrap_or_default()
            );
        }

        Ok(envelope.result.unwrap_or_default().items)
    }
}

fn excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
