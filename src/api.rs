//! Transport Client
//!
//! One fetch per backend action, non-2xx translated into the matching
//! `ApiError` kind. No retries, no timeouts — a failed call surfaces to the
//! caller immediately. `GroceryApi` is a trait so the query layer can be
//! exercised against a recording fake in tests.

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::models::{GroceryItem, ItemDraft, Page};

/// Fallback message when a create fails without a structured error body.
const CREATE_FAILED: &str = "Failed to add item";

/// One failure kind per transport operation, each carrying the message the
/// error banner shows. Create failures carry the server's message when the
/// error body has one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Failed to fetch items")]
    FetchFailed,
    #[error("{0}")]
    CreateFailed(String),
    #[error("Failed to update item")]
    UpdateFailed,
    #[error("Failed to flag item purchased")]
    PatchFailed,
    #[error("Failed to delete item")]
    DeleteFailed,
}

/// The five backend operations the grocery list needs.
pub trait GroceryApi {
    fn list(&self, page: u32) -> LocalBoxFuture<'_, Result<Page, ApiError>>;
    fn create(&self, draft: ItemDraft) -> LocalBoxFuture<'_, Result<GroceryItem, ApiError>>;
    fn replace(&self, id: String, draft: ItemDraft) -> LocalBoxFuture<'_, Result<GroceryItem, ApiError>>;
    fn patch_purchased(&self, id: String, purchased: bool) -> LocalBoxFuture<'_, Result<GroceryItem, ApiError>>;
    fn remove(&self, id: String) -> LocalBoxFuture<'_, Result<(), ApiError>>;
}

/// REST implementation of `GroceryApi` over `gloo-net` fetch.
#[derive(Debug, Clone)]
pub struct RestApi {
    base_url: String,
}

impl RestApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            base_url: config.base_url,
        }
    }
}

impl GroceryApi for RestApi {
    fn list(&self, page: u32) -> LocalBoxFuture<'_, Result<Page, ApiError>> {
        let url = list_url(&self.base_url, page);
        async move {
            let response = Request::get(&url).send().await.map_err(|_| ApiError::FetchFailed)?;
            if !response.ok() {
                return Err(ApiError::FetchFailed);
            }
            response.json::<Page>().await.map_err(|_| ApiError::FetchFailed)
        }
        .boxed_local()
    }

    fn create(&self, draft: ItemDraft) -> LocalBoxFuture<'_, Result<GroceryItem, ApiError>> {
        let url = collection_url(&self.base_url);
        async move {
            let request = Request::post(&url)
                .json(&draft)
                .map_err(|_| ApiError::CreateFailed(CREATE_FAILED.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|_| ApiError::CreateFailed(CREATE_FAILED.to_string()))?;
            if !response.ok() {
                let body = response.json::<serde_json::Value>().await.ok();
                return Err(ApiError::CreateFailed(create_error_message(body.as_ref())));
            }
            response
                .json::<GroceryItem>()
                .await
                .map_err(|_| ApiError::CreateFailed(CREATE_FAILED.to_string()))
        }
        .boxed_local()
    }

    fn replace(&self, id: String, draft: ItemDraft) -> LocalBoxFuture<'_, Result<GroceryItem, ApiError>> {
        let url = item_url(&self.base_url, &id);
        async move {
            let request = Request::put(&url).json(&draft).map_err(|_| ApiError::UpdateFailed)?;
            let response = request.send().await.map_err(|_| ApiError::UpdateFailed)?;
            if !response.ok() {
                return Err(ApiError::UpdateFailed);
            }
            response.json::<GroceryItem>().await.map_err(|_| ApiError::UpdateFailed)
        }
        .boxed_local()
    }

    fn patch_purchased(&self, id: String, purchased: bool) -> LocalBoxFuture<'_, Result<GroceryItem, ApiError>> {
        let url = item_url(&self.base_url, &id);
        async move {
            let request = Request::patch(&url)
                .json(&patch_body(purchased))
                .map_err(|_| ApiError::PatchFailed)?;
            let response = request.send().await.map_err(|_| ApiError::PatchFailed)?;
            if !response.ok() {
                return Err(ApiError::PatchFailed);
            }
            response.json::<GroceryItem>().await.map_err(|_| ApiError::PatchFailed)
        }
        .boxed_local()
    }

    fn remove(&self, id: String) -> LocalBoxFuture<'_, Result<(), ApiError>> {
        let url = item_url(&self.base_url, &id);
        async move {
            let response = Request::delete(&url).send().await.map_err(|_| ApiError::DeleteFailed)?;
            if !response.ok() {
                return Err(ApiError::DeleteFailed);
            }
            Ok(())
        }
        .boxed_local()
    }
}

fn collection_url(base_url: &str) -> String {
    format!("{}/api/v1/groceryItems/", base_url)
}

fn list_url(base_url: &str, page: u32) -> String {
    format!("{}?page={}", collection_url(base_url), page)
}

fn item_url(base_url: &str, id: &str) -> String {
    format!("{}{}/", collection_url(base_url), id)
}

/// PATCH body for the purchased-flag toggle.
fn patch_body(purchased: bool) -> serde_json::Value {
    serde_json::json!({ "purchased": purchased })
}

/// Prefer the server's `{"error": "..."}` message for a rejected create.
fn create_error_message(body: Option<&serde_json::Value>) -> String {
    body.and_then(|b| b.get("error"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| CREATE_FAILED.to_string())
}
