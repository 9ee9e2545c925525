//! reqwest implementation of the backend traits.
//!
//! Works both natively and on `wasm32` (where reqwest goes through the
//! browser's `fetch`). In the browser the session and CSRF cookies travel
//! with same-origin requests automatically, so `session_cookie` stays
//! `None`; the CLI sets it to act as an existing visitor.

use crate::backend::{CartBackend, GeoSource, LocationBackend};
use crate::cart::{CartCount, CartEnvelope, CartUpdate, ProductRequest, QuantityRequest};
use crate::config::WidgetConfig;
use crate::csrf::CSRF_HEADER;
use crate::error::SyncError;
use crate::id::ProductId;
use crate::location::{LocationEnvelope, Region, SaveLocationRequest};
use log::debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: WidgetConfig,
    csrf_token: Option<String>,
    session_cookie: Option<String>,
}

impl HttpClient {
    pub fn new(client: Client, config: WidgetConfig) -> Self {
        Self {
            client,
            config,
            csrf_token: None,
            session_cookie: None,
        }
    }

    /// Client with reqwest defaults, as used in the browser.
    pub fn from_config(config: WidgetConfig) -> Self {
        Self::new(Client::new(), config)
    }

    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token;
        self
    }

    /// Raw `Cookie` header to send along (native clients only).
    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie;
        self
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    fn with_cookies(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => request.header(COOKIE, cookie.as_str()),
            None => request,
        }
    }

    fn get(&self, url: &str) -> RequestBuilder {
        debug!("GET {}", url);
        self.with_cookies(self.client.get(url))
    }

    fn post(&self, url: &str) -> RequestBuilder {
        debug!("POST {}", url);
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json");
        let request = match &self.csrf_token {
            Some(token) => request.header(CSRF_HEADER, token.as_str()),
            None => request,
        };
        self.with_cookies(request)
    }

    fn post_json<T: Serialize>(&self, url: &str, body: &T) -> Result<RequestBuilder, SyncError> {
        Ok(self.post(url).body(serde_json::to_string(body)?))
    }

    /// Send and return the body of a 2xx response.
    async fn body(request: RequestBuilder) -> Result<String, SyncError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    async fn cart_call(request: RequestBuilder) -> Result<CartUpdate, SyncError> {
        let body = Self::body(request).await?;
        CartEnvelope::from_json(&body)?.into_update()
    }

    async fn regions(&self, url: &str) -> Result<Vec<Region>, SyncError> {
        let body = Self::body(self.get(url).header(ACCEPT, "application/json")).await?;
        Region::list_from_json(&body)
    }

    /// Item count and total without the line list.
    pub async fn cart_count(&self) -> Result<CartCount, SyncError> {
        let body = Self::body(self.get(&self.config.cart_count_url())).await?;
        #[derive(serde::Deserialize)]
        struct CountEnvelope {
            success: bool,
            #[serde(flatten)]
            count: CartCount,
            #[serde(default)]
            error: Option<String>,
        }
        let envelope: CountEnvelope = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(SyncError::Rejected(envelope.error));
        }
        Ok(envelope.count)
    }
}

impl CartBackend for HttpClient {
    async fn summary(&self) -> Result<CartUpdate, SyncError> {
        Self::cart_call(self.get(&self.config.cart_summary_url())).await
    }

    async fn add(&self, product_id: ProductId, quantity: u32) -> Result<CartUpdate, SyncError> {
        let body = QuantityRequest {
            product_id,
            quantity,
        };
        Self::cart_call(self.post_json(&self.config.cart_add_url(), &body)?).await
    }

    async fn remove(&self, product_id: ProductId) -> Result<CartUpdate, SyncError> {
        let body = ProductRequest { product_id };
        Self::cart_call(self.post_json(&self.config.cart_remove_url(), &body)?).await
    }

    async fn update(&self, product_id: ProductId, quantity: u32) -> Result<CartUpdate, SyncError> {
        let body = QuantityRequest {
            product_id,
            quantity,
        };
        Self::cart_call(self.post_json(&self.config.cart_update_url(), &body)?).await
    }

    async fn clear(&self) -> Result<CartUpdate, SyncError> {
        Self::cart_call(self.post(&self.config.cart_clear_url())).await
    }
}

impl GeoSource for HttpClient {
    async fn states(&self) -> Result<Vec<Region>, SyncError> {
        self.regions(&self.config.states_url()).await
    }

    async fn cities(&self, state_id: &str) -> Result<Vec<Region>, SyncError> {
        self.regions(&self.config.cities_url(state_id)).await
    }
}

impl LocationBackend for HttpClient {
    async fn save_location(&self, request: &SaveLocationRequest) -> Result<String, SyncError> {
        let body =
            Self::body(self.post_json(&self.config.save_location_url(), request)?).await?;
        LocationEnvelope::from_json(&body)?.into_address()
    }

    async fn saved_location(&self) -> Result<String, SyncError> {
        let body = Self::body(self.get(&self.config.get_location_url())).await?;
        LocationEnvelope::from_json(&body)?.into_address()
    }
}
