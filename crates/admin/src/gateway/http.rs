//! JSON-over-HTTP binding of the persistence service.
//!
//! # Routes
//!
//! | Operation | Request |
//! |-----------|---------|
//! | designs | `GET/POST /api/design`, `PATCH/DELETE /api/design?id=` |
//! | products | `GET/POST /api/products`, `PATCH/DELETE /api/products?id=` |
//! | vocabularies | `GET /api/category`, `/api/sub`, `/api/factory`, `/api/color`, `/api/size` |

use std::sync::Arc;

use async_trait::async_trait;
use merchdesk_core::{
    CategoryTag, ColorOption, Design, DesignId, DesignRecord, Factory, Product, ProductId,
    ProductRecord, SizeOption, Subcategory,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, Response};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::{GatewayError, GatewayResult, PersistenceGateway};
use crate::config::DeskConfig;

const DESIGN_PATH: &str = "api/design";
const PRODUCTS_PATH: &str = "api/products";
const CATEGORY_PATH: &str = "api/category";
const SUBCATEGORY_PATH: &str = "api/sub";
const FACTORY_PATH: &str = "api/factory";
const COLOR_PATH: &str = "api/color";
const SIZE_PATH: &str = "api/size";

/// Persistence service client.
#[derive(Clone)]
pub struct HttpGateway {
    inner: Arc<HttpGatewayInner>,
}

struct HttpGatewayInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpGateway {
    /// Create a client for the service at `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &DeskConfig) -> GatewayResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.api_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| GatewayError::Parse(format!("Invalid API token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpGatewayInner {
                client,
                base_url: with_trailing_slash(config.api_url.clone()),
            }),
        })
    }

    /// Base URL every route is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve a route, adding `?id=` for single-record operations.
    fn endpoint(&self, path: &str, id: Option<&str>) -> GatewayResult<Url> {
        let mut url = self.inner.base_url.join(path)?;
        if let Some(id) = id {
            url.query_pairs_mut().append_pair("id", id);
        }
        Ok(url)
    }

    /// Execute a GET request and parse the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let url = self.endpoint(path, None)?;
        let response = self.inner.client.get(url).send().await?;
        let response = check_status(response, path).await?;
        response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(format!("Failed to parse {path} response: {e}")))
    }

    /// Execute a request with a JSON body, ignoring the response body.
    async fn send_json<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        id: Option<&str>,
        body: &B,
    ) -> GatewayResult<()> {
        let url = self.endpoint(path, id)?;
        let response = self
            .inner
            .client
            .request(method, url)
            .json(body)
            .send()
            .await?;
        check_status(response, path).await.map(drop)
    }

    /// Execute a DELETE request for one record.
    async fn delete(&self, path: &str, id: &str) -> GatewayResult<()> {
        let url = self.endpoint(path, Some(id))?;
        let response = self.inner.client.delete(url).send().await?;
        check_status(response, path).await.map(drop)
    }
}

/// Pass successful responses through; turn anything else into
/// [`GatewayError::Status`].
async fn check_status(response: Response, path: &str) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(
        status = status.as_u16(),
        path,
        body = %truncate(&body, 200),
        "Persistence service returned an error"
    );
    Err(GatewayError::Status {
        status: status.as_u16(),
        path: path.to_string(),
    })
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s.get(..idx).unwrap_or(s),
        None => s,
    }
}

/// Relative routes must resolve below the base path, not beside it.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl PersistenceGateway for HttpGateway {
    #[instrument(skip_all)]
    async fn list_designs(&self) -> GatewayResult<Vec<Design>> {
        self.get(DESIGN_PATH).await
    }

    #[instrument(skip_all, fields(title = %record.title))]
    async fn create_design(&self, record: &DesignRecord) -> GatewayResult<()> {
        self.send_json(Method::POST, DESIGN_PATH, None, record).await
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn update_design(&self, id: &DesignId, record: &DesignRecord) -> GatewayResult<()> {
        self.send_json(Method::PATCH, DESIGN_PATH, Some(id.as_str()), record)
            .await
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn delete_design(&self, id: &DesignId) -> GatewayResult<()> {
        self.delete(DESIGN_PATH, id.as_str()).await
    }

    #[instrument(skip_all)]
    async fn list_categories(&self) -> GatewayResult<Vec<CategoryTag>> {
        self.get(CATEGORY_PATH).await
    }

    #[instrument(skip_all)]
    async fn list_subcategories(&self) -> GatewayResult<Vec<Subcategory>> {
        self.get(SUBCATEGORY_PATH).await
    }

    #[instrument(skip_all)]
    async fn list_factories(&self) -> GatewayResult<Vec<Factory>> {
        self.get(FACTORY_PATH).await
    }

    #[instrument(skip_all)]
    async fn list_colors(&self) -> GatewayResult<Vec<ColorOption>> {
        self.get(COLOR_PATH).await
    }

    #[instrument(skip_all)]
    async fn list_sizes(&self) -> GatewayResult<Vec<SizeOption>> {
        self.get(SIZE_PATH).await
    }

    #[instrument(skip_all)]
    async fn list_products(&self) -> GatewayResult<Vec<Product>> {
        self.get(PRODUCTS_PATH).await
    }

    #[instrument(skip_all, fields(title = %record.title, kind = %record.kind()))]
    async fn create_product(&self, record: &ProductRecord) -> GatewayResult<()> {
        self.send_json(Method::POST, PRODUCTS_PATH, None, record)
            .await
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn update_product(&self, id: &ProductId, record: &ProductRecord) -> GatewayResult<()> {
        self.send_json(Method::PATCH, PRODUCTS_PATH, Some(id.as_str()), record)
            .await
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn delete_product(&self, id: &ProductId) -> GatewayResult<()> {
        self.delete(PRODUCTS_PATH, id.as_str()).await
    }
}
