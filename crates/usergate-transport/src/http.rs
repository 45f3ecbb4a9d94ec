//! HTTP identity client using `reqwest`.

use std::time::Duration;

use reqwest::{Client, Method};

use crate::{ApiResponse, IdentityApi, TransportError};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// An [`IdentityApi`] backed by a real HTTP service.
///
/// Endpoints are resolved relative to the base URL:
///
/// | Call | Request |
/// |---|---|
/// | `current_user` | `GET {base}/id` |
/// | `log_in` | `GET {base}/login/{account}/{password}` |
/// | `log_out` | `PUT {base}/logout` |
///
/// The default client keeps a cookie store, so a session cookie set by
/// the login response is sent with later calls, the way a browser would.
#[derive(Debug, Clone)]
pub struct HttpIdentityApi {
    base_url: String,
    client: Client,
}

impl HttpIdentityApi {
    /// Creates a client for `base_url` with default settings.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, TransportError> {
        HttpIdentityApiBuilder::new(base_url).build()
    }

    /// Starts a builder for `base_url`.
    pub fn builder(base_url: impl AsRef<str>) -> HttpIdentityApiBuilder {
        HttpIdentityApiBuilder::new(base_url)
    }

    /// The base URL every endpoint hangs off.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        endpoint: &'static str,
        method: Method,
        path: &str,
    ) -> Result<ApiResponse, TransportError> {
        // Only the endpoint name is logged, never the path.
        tracing::debug!(endpoint, %method, "sending identity request");

        let url = format!("{}{}", self.base_url, path);
        // reqwest errors carry the request URL; the login URL contains the
        // password, so it is stripped before the error leaves this crate.
        let response = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.without_url()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.without_url()))?
            .to_vec();

        tracing::debug!(endpoint, status, "identity request completed");
        Ok(ApiResponse::new(status, body))
    }
}

impl IdentityApi for HttpIdentityApi {
    async fn current_user(&self) -> Result<ApiResponse, TransportError> {
        self.send("current_user", Method::GET, "/id").await
    }

    async fn log_in(
        &self,
        account: &str,
        password: &str,
    ) -> Result<ApiResponse, TransportError> {
        let path = format!("/login/{account}/{password}");
        self.send("login", Method::GET, &path).await
    }

    async fn log_out(&self) -> Result<ApiResponse, TransportError> {
        self.send("logout", Method::PUT, "/logout").await
    }
}

/// Builder for [`HttpIdentityApi`].
pub struct HttpIdentityApiBuilder {
    base_url: String,
    request_timeout: Duration,
    connect_timeout: Duration,
    client: Option<Client>,
}

impl HttpIdentityApiBuilder {
    /// Creates a builder with default timeouts. A trailing `/` on the
    /// base URL is dropped.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            client: None,
        }
    }

    /// Total time allowed for one request, body included.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Time allowed to establish the connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Uses a preconfigured client. Timeouts and the cookie store set on
    /// this builder are ignored in that case.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the identity client.
    ///
    /// # Errors
    /// - [`TransportError::InvalidEndpoint`] — the base URL is empty or
    ///   not `http(s)`
    /// - [`TransportError::Request`] — the HTTP client could not be built
    pub fn build(self) -> Result<HttpIdentityApi, TransportError> {
        if !(self.base_url.starts_with("http://")
            || self.base_url.starts_with("https://"))
        {
            return Err(TransportError::InvalidEndpoint(self.base_url));
        }

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .cookie_store(true)
                .timeout(self.request_timeout)
                .connect_timeout(self.connect_timeout)
                .build()
                .map_err(TransportError::Request)?,
        };

        Ok(HttpIdentityApi {
            base_url: self.base_url,
            client,
        })
    }
}
