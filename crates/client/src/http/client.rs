//! Request pipeline
//!
//! [`ApiClient`] wraps a [`reqwest`] client with the application's request
//! and response phases. The request phase registers the call in the
//! pending registry (cancelling any duplicate), drives the loading hook
//! and injects the bearer token. The response phase classifies the result
//! into exactly one terminal outcome, running its side effects
//! (notification, session recovery, redirect) once per failed call.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client as ReqwestClient, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use vaultview_domain::constants::{CODE_FORBIDDEN, CODE_UNAUTHORIZED};
use vaultview_domain::Envelope;

use super::errors::ApiError;
use super::pending::{fingerprint, PendingRequests};
use super::status::status_message;
use crate::config::ApiClientConfig;
use crate::session::SessionStore;
use crate::ui::{NavTarget, UiHooks};

const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please sign in again";
const TIMEOUT_MESSAGE: &str = "Request timed out, please try again later";

/// Per-call options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Do not attach the `Authorization` header.
    pub skip_auth: bool,
    /// Do not drive the loading indicator for this call.
    pub no_loading: bool,
}

/// How the serialized parameters travel with the request.
enum ParamStyle {
    Query,
    Json,
}

/// Interceptor-style HTTP pipeline over a single enveloped JSON API.
///
/// Constructed once at the application's composition point and cloned
/// freely; clones share the session store and the pending registry.
#[derive(Clone)]
pub struct ApiClient {
    http: ReqwestClient,
    config: ApiClientConfig,
    session: Arc<SessionStore>,
    pending: PendingRequests,
    ui: UiHooks,
}

impl ApiClient {
    /// Build the pipeline over the given configuration, session store and
    /// UI collaborators.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the underlying transport cannot be
    /// constructed.
    pub fn new(
        config: ApiClientConfig,
        session: Arc<SessionStore>,
        ui: UiHooks,
    ) -> Result<Self, ApiError> {
        let http = ReqwestClient::builder()
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self { http, config, session, pending: PendingRequests::new(), ui })
    }

    /// The session store this pipeline reads tokens from and clears on
    /// authentication failure.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Execute a GET request; `params` become the query string.
    pub async fn get<T, P>(
        &self,
        path: &str,
        params: Option<&P>,
        options: RequestOptions,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.execute(Method::GET, path, to_value(params)?, ParamStyle::Query, options).await
    }

    /// Execute a POST request; `params` become the JSON body.
    pub async fn post<T, P>(
        &self,
        path: &str,
        params: Option<&P>,
        options: RequestOptions,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, to_value(params)?, ParamStyle::Json, options).await
    }

    /// Execute a PUT request; `params` become the JSON body.
    pub async fn put<T, P>(
        &self,
        path: &str,
        params: Option<&P>,
        options: RequestOptions,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, to_value(params)?, ParamStyle::Json, options).await
    }

    /// Execute a DELETE request; `params` become the query string.
    pub async fn delete<T, P>(
        &self,
        path: &str,
        params: Option<&P>,
        options: RequestOptions,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.execute(Method::DELETE, path, to_value(params)?, ParamStyle::Query, options).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Option<Value>,
        style: ParamStyle,
        options: RequestOptions,
    ) -> Result<Envelope<T>, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);
        let params_repr = params.as_ref().map(Value::to_string).unwrap_or_default();

        // Request phase: cancel-and-replace any in-flight duplicate, then
        // hold the registry entry until this call settles. The guard's
        // drop is what guarantees removal on every settlement path.
        let guard = self.pending.register(fingerprint(&method, &url, &params_repr));

        if !options.no_loading {
            self.ui.loading.begin();
        }
        let result = self.dispatch(method, &url, params, style, options, guard.token()).await;
        if !options.no_loading {
            self.ui.loading.finish();
        }
        result
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        params: Option<Value>,
        style: ParamStyle,
        options: RequestOptions,
        cancel: &CancellationToken,
    ) -> Result<Envelope<T>, ApiError> {
        let mut request = self.http.request(method.clone(), url);
        if let Some(params) = params {
            request = match style {
                ParamStyle::Query => request.query(&params),
                ParamStyle::Json => request.json(&params),
            };
        }
        if !options.skip_auth {
            request =
                request.header(AUTHORIZATION, format!("Bearer {}", self.session.bearer_token()));
        }

        debug!(%method, %url, "sending request");
        let outcome = tokio::select! {
            () = cancel.cancelled() => {
                debug!(%method, %url, "request superseded by a duplicate");
                return Err(ApiError::Cancelled);
            }
            outcome = request.send() => outcome,
        };

        match outcome {
            Ok(response) => self.classify_response(&method, url, response).await,
            Err(err) => Err(self.classify_transport_failure(&err)),
        }
    }

    async fn classify_response<T: DeserializeOwned>(
        &self,
        method: &Method,
        url: &str,
        response: Response,
    ) -> Result<Envelope<T>, ApiError> {
        let status = response.status();
        debug!(%method, %url, %status, "received response");

        if !status.is_success() {
            // Round-trip completed but without a usable envelope; the
            // classifier supplies the user-facing message.
            let message = status_message(status);
            self.ui.notifier.error(message);
            self.redirect_if_offline();
            return Err(ApiError::Status { status: status.as_u16(), message: message.to_string() });
        }

        let envelope: Envelope<T> =
            response.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;

        if envelope.code == CODE_UNAUTHORIZED {
            warn!(%url, "server declared the session invalid");
            self.ui.notifier.error(SESSION_EXPIRED_MESSAGE);
            self.session.clear_identity();
            self.ui.navigator.redirect(NavTarget::Login);
            return Err(ApiError::Unauthorized(envelope.message));
        }

        if envelope.code == CODE_FORBIDDEN {
            self.ui.notifier.error(&envelope.message);
            return Err(ApiError::Forbidden(envelope.message));
        }

        if !envelope.is_success() {
            // Deliberately no notification: responses that do not carry a
            // meaningful envelope (e.g. raw downloads) land here.
            return Err(ApiError::Api { code: envelope.code, message: envelope.message });
        }

        Ok(envelope)
    }

    fn classify_transport_failure(&self, err: &reqwest::Error) -> ApiError {
        if err.is_timeout() {
            self.ui.notifier.error(TIMEOUT_MESSAGE);
            self.redirect_if_offline();
            return ApiError::Timeout(self.config.timeout);
        }

        warn!(error = %err, "transport failure without a response");
        self.redirect_if_offline();
        ApiError::Network(err.to_string())
    }

    fn redirect_if_offline(&self) {
        if !self.ui.connectivity.is_online() {
            self.ui.navigator.redirect(NavTarget::Offline);
        }
    }
}

fn to_value<P: Serialize + ?Sized>(params: Option<&P>) -> Result<Option<Value>, ApiError> {
    params
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| ApiError::Decode(format!("unserializable request parameters: {e}")))
}
