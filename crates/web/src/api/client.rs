//! HTTP plumbing shared by every endpoint.

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::ApiError;
use crate::config::ApiConfig;
use crate::models::BearerToken;

/// Client for the BizSphere REST API.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    health_url: Url,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.base_url.clone(),
                health_url: config.health_url.clone(),
            }),
        })
    }

    /// Base URL endpoint paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub(crate) fn health_url(&self) -> &Url {
        &self.inner.health_url
    }

    /// Resolve an endpoint path (`auth/login`, `/products/my-products`) under the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&BearerToken>,
    ) -> Result<RequestBuilder, ApiError> {
        let builder = self.inner.http.request(method, self.url(path)?);
        Ok(match token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        })
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or an undecodable body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&BearerToken>,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path, token)?.send().await?;
        decode(response).await
    }

    /// `GET` an absolute URL outside the API prefix.
    pub(crate) async fn get_absolute<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.inner.http.get(url).send().await?;
        decode(response).await
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or an undecodable body.
    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        token: Option<&BearerToken>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, path, token)?
            .json(body)
            .send()
            .await?;
        decode(response).await
    }

    /// `POST` a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn post_ack<B>(
        &self,
        path: &str,
        body: &B,
        token: Option<&BearerToken>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let response = self
            .request(Method::POST, path, token)?
            .json(body)
            .send()
            .await?;
        acknowledge(response).await
    }

    /// `PUT` a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn put<B>(
        &self,
        path: &str,
        body: &B,
        token: Option<&BearerToken>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let response = self
            .request(Method::PUT, path, token)?
            .json(body)
            .send()
            .await?;
        acknowledge(response).await
    }

    /// `DELETE` a resource.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn delete(&self, path: &str, token: Option<&BearerToken>) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path, token)?.send().await?;
        acknowledge(response).await
    }
}

/// Map a non-2xx response to [`ApiError::Status`].
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
}

async fn acknowledge(response: Response) -> Result<(), ApiError> {
    check_status(response).await.map(drop)
}
