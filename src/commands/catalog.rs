//! Catalog Commands
//!
//! Paged collection/creative queries plus the lookups behind the app and
//! account selectors.

use async_trait::async_trait;
use paged_query::{AppId, CatalogFilters, FetchError, FetchRequest, FetchResponse, FetchResult, PageSource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{invoke, rejection_message};
use crate::models::{CatalogApp, Collection, Creative};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct AppIdArgs {
    #[serde(rename = "appId")]
    app_id: AppId,
}

// ========================
// Commands
// ========================

/// One page of collections for an app
pub async fn fetch_collections(request: &FetchRequest<CatalogFilters>) -> FetchResult<Collection> {
    fetch_page("fetch_collections", request).await
}

/// One page of creatives inside a collection
pub async fn fetch_creatives(request: &FetchRequest<CatalogFilters>) -> FetchResult<Creative> {
    fetch_page("fetch_creatives", request).await
}

pub async fn list_apps() -> Result<Vec<CatalogApp>, String> {
    let result = invoke("list_apps", JsValue::NULL).await.map_err(rejection_message)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Account names for the account filter of one app
pub async fn list_accounts(app_id: AppId) -> Result<Vec<String>, String> {
    let js_args = serde_wasm_bindgen::to_value(&AppIdArgs { app_id }).map_err(|e| e.to_string())?;
    let result = invoke("list_accounts", js_args).await.map_err(rejection_message)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

async fn fetch_page<T: DeserializeOwned>(cmd: &str, request: &FetchRequest<CatalogFilters>) -> FetchResult<T> {
    let js_args = serde_wasm_bindgen::to_value(request).map_err(|e| FetchError::Decode(e.to_string()))?;
    let result = invoke(cmd, js_args)
        .await
        .map_err(|e| FetchError::Transport(rejection_message(e)))?;
    serde_wasm_bindgen::from_value::<FetchResponse<T>>(result).map_err(|e| FetchError::Decode(e.to_string()))
}

// ========================
// Page Sources
// ========================

/// Collection scope backed by `fetch_collections`
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionSource;

#[async_trait(?Send)]
impl PageSource<CatalogFilters, Collection> for CollectionSource {
    async fn fetch(&self, request: FetchRequest<CatalogFilters>) -> FetchResult<Collection> {
        fetch_collections(&request).await
    }
}

/// Item scope backed by `fetch_creatives`
#[derive(Debug, Clone, Copy, Default)]
pub struct CreativeSource;

#[async_trait(?Send)]
impl PageSource<CatalogFilters, Creative> for CreativeSource {
    async fn fetch(&self, request: FetchRequest<CatalogFilters>) -> FetchResult<Creative> {
        fetch_creatives(&request).await
    }
}
