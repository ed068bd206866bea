//! Reqwest-backed adapter over the shortening service's JSON endpoints.
//!
//! This adapter owns transport details only: default headers, cookie
//! persistence, timeout, and the classification of every failure mode into a
//! [`ClassifiedError`]. The classification itself is a pure function over
//! `(status, body)` so it is testable without sockets.

use std::time::Duration;

use reqwest::{Client, Method, Url, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ports::ShortenerApi;
use crate::domain::{
    ApiEnvelope, ClassifiedError, Identity, LoginRequest, RegisterRequest, ShortLink,
    ShortenRequest,
};
use crate::outbound::http::dto::{DeleteLinkRequest, LoginIdentityDto};

use async_trait::async_trait;

const REGISTER_PATH: &str = "api/v1/create-user";
const LOGIN_PATH: &str = "api/v1/login";
const LOGOUT_PATH: &str = "api/v1/logout";
const LINKS_PATH: &str = "api/v1/urls";
const SHORTEN_PATH: &str = "api/v1/shorten";
const DELETE_PATH: &str = "api/v1/delete";

const SERVER_UNAVAILABLE_MESSAGE: &str = "API server is unavailable. Please try again later.";
const NETWORK_MESSAGE: &str =
    "Unable to connect to the API server. Please check if the server is running.";
const FALLBACK_FAILURE_MESSAGE: &str = "An error occurred";

/// Typed HTTP client for the shortening service.
///
/// Stateless beyond connection and cookie reuse; safe to share across call
/// sites. The cookie jar carries the session cookie on every request,
/// success and failure paths alike.
pub struct HttpShortenerApi {
    client: Client,
    base_url: Url,
}

impl HttpShortenerApi {
    /// Build the adapter with cookie persistence and an explicit timeout.
    ///
    /// `base_url` is the service origin; endpoint paths are joined onto it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(u16, ApiEnvelope<T>), ClassifiedError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = self.endpoint(path)?;
        let mut request = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(payload) = body {
            request = request.json(payload);
        }
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status().as_u16();
        if status >= 500 {
            // The body may be a proxy's HTML error page; never parse it.
            return Err(server_unavailable(status));
        }
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        decode_envelope(status, bytes.as_ref()).map(|envelope| (status, envelope))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClassifiedError> {
        self.base_url
            .join(path)
            .map_err(|error| ClassifiedError::unknown(0, format!("invalid endpoint URL: {error}")))
    }
}

#[async_trait]
impl ShortenerApi for HttpShortenerApi {
    async fn register(&self, request: &RegisterRequest) -> Result<Identity, ClassifiedError> {
        let (status, envelope) = self
            .request::<Identity, _>(Method::POST, REGISTER_PATH, Some(request))
            .await?;
        require_data(status, envelope)
    }

    async fn login(&self, request: &LoginRequest) -> Result<Identity, ClassifiedError> {
        let (status, envelope) = self
            .request::<LoginIdentityDto, _>(Method::POST, LOGIN_PATH, Some(request))
            .await?;
        require_data(status, envelope).map(Identity::from)
    }

    async fn logout(&self) -> Result<(), ClassifiedError> {
        self.request::<serde_json::Value, ()>(Method::POST, LOGOUT_PATH, None)
            .await
            .map(|_| ())
    }

    async fn list_links(&self) -> Result<Vec<ShortLink>, ClassifiedError> {
        let (_, envelope) = self
            .request::<Vec<ShortLink>, ()>(Method::GET, LINKS_PATH, None)
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn shorten(&self, request: &ShortenRequest) -> Result<ShortLink, ClassifiedError> {
        let (status, envelope) = self
            .request::<ShortLink, _>(Method::POST, SHORTEN_PATH, Some(request))
            .await?;
        require_data(status, envelope)
    }

    async fn delete_link(&self, id: &str) -> Result<(), ClassifiedError> {
        self.request::<serde_json::Value, _>(
            Method::DELETE,
            DELETE_PATH,
            Some(&DeleteLinkRequest { id }),
        )
        .await
        .map(|_| ())
    }
}

/// Classify a completed response into an envelope or a [`ClassifiedError`].
///
/// The envelope's `success` flag is authoritative over the HTTP status: a
/// 200 carrying `success == false` is an application failure, and a 4xx
/// carrying `success == true` would pass through untouched.
fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<ApiEnvelope<T>, ClassifiedError> {
    if status >= 500 {
        return Err(server_unavailable(status));
    }
    let envelope: ApiEnvelope<T> = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(error) => {
            return Err(ClassifiedError::unknown(
                status,
                format!("unexpected response payload: {error}"),
            ));
        }
    };
    if !envelope.success {
        let message = if envelope.message.trim().is_empty() {
            FALLBACK_FAILURE_MESSAGE.to_owned()
        } else {
            envelope.message
        };
        let classified = ClassifiedError::application(status, message);
        return Err(match envelope.error {
            Some(code) => classified.with_code(code),
            None => classified,
        });
    }
    Ok(envelope)
}

fn require_data<T>(status: u16, envelope: ApiEnvelope<T>) -> Result<T, ClassifiedError> {
    envelope
        .data
        .ok_or_else(|| ClassifiedError::unknown(status, "response envelope carried no data"))
}

fn map_transport_error(error: reqwest::Error) -> ClassifiedError {
    debug!(error = %error, "transport failure");
    ClassifiedError::network(NETWORK_MESSAGE).with_code("Network error")
}

fn server_unavailable(status: u16) -> ClassifiedError {
    ClassifiedError::server_unavailable(status, SERVER_UNAVAILABLE_MESSAGE)
        .with_code("Server error")
}
