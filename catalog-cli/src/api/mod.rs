//! Remote catalog API
//!
//! Three calls are used: create a minimal product, update a product by id,
//! and search products by name. The drivers talk to the [`CatalogApi`]
//! trait so they can run against a fake in tests.

pub mod auth;
pub mod client;
pub mod models;
pub mod throttle;

use anyhow::Result;
use async_trait::async_trait;

pub use auth::{ChainedCredentialProvider, CredentialProvider};
pub use client::CatalogClient;
pub use throttle::Throttle;

use models::{CreateProductRequest, ProductId, RemoteProduct, UpdateProductRequest, UpdateResponse};

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Create a product and return its new id.
    ///
    /// Errors on transport failure, a non-JSON body, a non-success
    /// application code or a missing id.
    async fn create_product(&self, request: &CreateProductRequest) -> Result<ProductId>;

    /// Replace a product's details. Only transport failures are errors.
    async fn update_product(
        &self,
        id: &ProductId,
        request: &UpdateProductRequest,
    ) -> Result<UpdateResponse>;

    /// First page of products matching `query`
    async fn search_products(&self, query: &str) -> Result<Vec<RemoteProduct>>;
}
