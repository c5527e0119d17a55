// src/api/client.rs
//! Pure HTTP client wrapper for the Notion API.
//!
//! A thin layer over reqwest handling authentication and the
//! request/response plumbing, with no parsing or business logic.

use crate::error::AppError;
use crate::model::{Block, Page};
use crate::types::{ApiKey, BlockId, DatabaseId, PageId};
use reqwest::{header, Client, Response};
use serde::Serialize;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around a reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    /// Makes a POST request with a JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }

    /// Makes a PATCH request with a JSON body to the specified endpoint.
    pub async fn patch<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("PATCH {}", url);
        Ok(self.client.patch(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl super::ContentRepository for NotionHttpClient {
    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError> {
        let client = self.clone();
        let base = format!("blocks/{}/children", parent.to_dashed());
        let result = super::pagination::fetch_all_pages(|page_size, cursor| {
            let client = client.clone();
            let base = base.clone();
            async move {
                let mut endpoint = format!("{}?page_size={}", base, page_size);
                if let Some(cursor) = cursor {
                    endpoint.push_str(&format!("&start_cursor={}", cursor));
                }
                let response = client.get(&endpoint).await?;
                let body = extract_response_text(response).await?;
                super::wire::parse_blocks_page(body)
            }
        })
        .await?;
        Ok(result.items)
    }

    async fn query_pages(
        &self,
        database: &DatabaseId,
        query: &serde_json::Value,
    ) -> Result<Vec<Page>, AppError> {
        let client = self.clone();
        let endpoint = format!("databases/{}/query", database.to_dashed());
        let query = query.clone();
        let result = super::pagination::fetch_all_pages(|page_size, cursor| {
            let client = client.clone();
            let endpoint = endpoint.clone();
            let mut body = query.clone();
            async move {
                body["page_size"] = serde_json::json!(page_size);
                if let Some(cursor) = cursor {
                    body["start_cursor"] = serde_json::json!(cursor);
                }
                let response = client.post(&endpoint, &body).await?;
                let body = extract_response_text(response).await?;
                super::wire::parse_pages_page(body)
            }
        })
        .await?;
        Ok(result.items)
    }

    async fn update_page_status(&self, page: &PageId, status: &str) -> Result<(), AppError> {
        let endpoint = format!("pages/{}", page.to_dashed());
        let body = serde_json::json!({
            "properties": {
                "Status": { "status": { "name": status } }
            }
        });
        let response = self.patch(&endpoint, &body).await?;
        let result = extract_response_text(response).await?;
        // Only the status matters; the returned page is discarded.
        super::wire::check_ok(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
