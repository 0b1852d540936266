//! In-memory [`CatalogApi`] for driver tests

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::api::CatalogApi;
use crate::api::models::{
    CreateProductRequest, ProductId, RemoteProduct, UpdateProductRequest, UpdateResponse,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(CreateProductRequest),
    Update(ProductId, UpdateProductRequest),
    Search(String),
}

/// Scripted responses, recorded calls.
///
/// Creates and updates pop queued results and fall back to success when the
/// queue is empty. Searches return catalog products whose name contains the
/// query.
#[derive(Default)]
pub struct FakeCatalog {
    creates: Mutex<VecDeque<Result<ProductId, String>>>,
    updates: Mutex<VecDeque<Result<UpdateResponse, String>>>,
    catalog: Vec<RemoteProduct>,
    search_error: Option<String>,
    calls: Mutex<Vec<Call>>,
    next_id: Mutex<u64>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, id: &str, name: &str) -> Self {
        self.catalog.push(RemoteProduct {
            id: Some(ProductId::new(id)),
            name: name.to_string(),
        });
        self
    }

    pub fn with_search_error(mut self, message: &str) -> Self {
        self.search_error = Some(message.to_string());
        self
    }

    pub fn push_create(&self, result: Result<ProductId, String>) {
        self.creates.lock().unwrap().push_back(result);
    }

    pub fn push_update(&self, result: Result<UpdateResponse, String>) {
        self.updates.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<CreateProductRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<(ProductId, UpdateProductRequest)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update(id, request) => Some((id, request)),
                _ => None,
            })
            .collect()
    }

    pub fn searches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(query) => Some(query),
                _ => None,
            })
            .collect()
    }
}

pub fn ok_update() -> UpdateResponse {
    UpdateResponse {
        status: 200,
        code: Some(200),
        body: r#"{"code":200}"#.to_string(),
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn create_product(&self, request: &CreateProductRequest) -> Result<ProductId> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(request.clone()));

        match self.creates.lock().unwrap().pop_front() {
            Some(Ok(id)) => Ok(id),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                Ok(ProductId::new(next.to_string()))
            }
        }
    }

    async fn update_product(
        &self,
        id: &ProductId,
        request: &UpdateProductRequest,
    ) -> Result<UpdateResponse> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Update(id.clone(), request.clone()));

        match self.updates.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(ok_update()),
        }
    }

    async fn search_products(&self, query: &str) -> Result<Vec<RemoteProduct>> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Search(query.to_string()));

        if let Some(message) = &self.search_error {
            anyhow::bail!("{}", message);
        }

        Ok(self
            .catalog
            .iter()
            .filter(|p| p.name.contains(query.trim()))
            .cloned()
            .collect())
    }
}
