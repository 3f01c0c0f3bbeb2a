use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::{
    HeaderMap as Headers,
    HeaderName,
    HeaderValue,
    AUTHORIZATION,
    CONTENT_TYPE,
    USER_AGENT,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use tracing::{debug, instrument, trace};

use super::{ErrorResponse, HttpError, Request, RequestHandler};
use crate::builder::CreateAttachment;
use crate::constants;
use crate::internal::prelude::*;
use crate::json;
use crate::settings::Settings;

const AUDIT_LOG_REASON: &str = "x-audit-log-reason";

/// A builder for the underlying [`Http`] client.
///
/// If you do not need to use a custom client, use [`Http::new`] instead.
#[must_use]
pub struct HttpBuilder {
    client: Option<Client>,
    token: SecretString,
    api_base: String,
}

impl HttpBuilder {
    /// Construct a new builder to call methods on for the HTTP construction. The `token` will
    /// automatically be prefixed "Bot " if not already.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            client: None,
            token: SecretString::new(parse_token(token)),
            api_base: constants::API_BASE.to_string(),
        }
    }

    /// Uses the settings' token and API base.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.token.expose_secret()).api_base(settings.api_base.clone())
    }

    /// Sets the [`reqwest::Client`]. If one isn't provided, a default one will be used.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the base every route path is appended to, such as a proxy in front of Discord.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }

        self.api_base = api_base;
        self
    }

    /// Use the given configuration to build the `Http` client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Request`] if the default client cannot be built.
    pub fn build(self) -> Result<Http> {
        let client = match self.client {
            Some(client) => client,
            None => configure_client_backend(Client::builder()).build()?,
        };

        Ok(Http {
            client,
            token: self.token,
            api_base: Arc::from(self.api_base),
        })
    }
}

fn parse_token(token: impl AsRef<str>) -> Arc<str> {
    let token = token.as_ref().trim();

    if token.starts_with("Bot ") || token.starts_with("Bearer ") {
        Arc::from(token)
    } else {
        Arc::from(format!("Bot {token}"))
    }
}

fn reason_into_header(reason: &str) -> Result<Headers> {
    let mut headers = Headers::new();

    // "The X-Audit-Log-Reason header supports 1-512 URL-encoded UTF-8 characters."
    // https://discord.com/developers/docs/resources/audit-log#audit-log-entry-object
    let header_value = utf8_percent_encode(reason, NON_ALPHANUMERIC).to_string();
    let header_value = HeaderValue::from_str(&header_value).map_err(HttpError::InvalidHeader)?;

    headers.insert(HeaderName::from_static(AUDIT_LOG_REASON), header_value);
    Ok(headers)
}

/// A reqwest-backed [`RequestHandler`].
///
/// Requests are sent once: there is no retrying and no ratelimit tracking. Unsuccessful
/// responses are reported as [`HttpError::UnsuccessfulRequest`].
#[derive(Clone)]
pub struct Http {
    client: Client,
    token: SecretString,
    api_base: Arc<str>,
}

impl std::fmt::Debug for Http {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Http").field("api_base", &self.api_base).finish_non_exhaustive()
    }
}

impl Http {
    /// Creates a client with the default settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Request`] if the TLS backend cannot be initialised.
    pub fn new(token: &str) -> Result<Self> {
        HttpBuilder::new(token).build()
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, request: &Request<'_>) -> Result<Url> {
        let path = request.route.path();
        let mut url =
            Url::parse(&format!("{}{}", self.api_base, path)).map_err(HttpError::Url)?;

        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.params);
        }

        Ok(url)
    }

    fn form(body: Option<&Value>, files: Vec<CreateAttachment>) -> Result<Form> {
        let mut multipart = Form::new();

        for (file_num, file) in files.into_iter().enumerate() {
            let mime_type = mime_guess::from_path(&file.filename).first_or_octet_stream();
            let part = Part::bytes(file.data)
                .file_name(file.filename)
                .mime_str(mime_type.essence_str())?;

            multipart = multipart.part(format!("files[{file_num}]"), part);
        }

        if let Some(payload_json) = body {
            multipart = multipart.text("payload_json", json::to_string(payload_json)?);
        }

        Ok(multipart)
    }
}

#[async_trait]
impl RequestHandler for Http {
    #[instrument(
        skip(self, request),
        fields(method = ?request.method, route = request.route.kind()),
    )]
    async fn request(&self, request: Request<'_>) -> Result<Value> {
        let url = self.url(&request)?;
        let method = request.method;
        let route = request.route.kind();

        let mut headers = Headers::with_capacity(4);
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));
        if request.authenticated {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(self.token.expose_secret())
                    .map_err(HttpError::InvalidHeader)?,
            );
        }
        if let Some(reason) = request.audit_log_reason {
            headers.extend(reason_into_header(reason)?);
        }

        let mut builder = self.client.request(method.reqwest_method(), url);

        if request.files.is_empty() {
            // Discord will return a 400: Bad Request response if we set the content type header,
            // but don't give a body.
            if let Some(body) = &request.body {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                builder = builder.body(json::to_string(body)?);
            }
        } else {
            trace!(files = request.files.len(), "sending multipart request");
            builder = builder.multipart(Self::form(request.body.as_ref(), request.files)?);
        }

        let response = builder.headers(headers).send().await?;
        let status = response.status();
        debug!(%status, "received response");

        if !status.is_success() {
            let error = ErrorResponse::from_response(response, method, route.to_string()).await;
            return Err(Error::Http(HttpError::UnsuccessfulRequest(error)));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_slice(&bytes)?)
        }
    }
}

#[cfg(feature = "rustls_backend")]
fn configure_client_backend(builder: ClientBuilder) -> ClientBuilder {
    builder.use_rustls_tls()
}

#[cfg(all(feature = "native_tls_backend", not(feature = "rustls_backend")))]
fn configure_client_backend(builder: ClientBuilder) -> ClientBuilder {
    builder.use_native_tls()
}

#[cfg(not(any(feature = "rustls_backend", feature = "native_tls_backend")))]
fn configure_client_backend(builder: ClientBuilder) -> ClientBuilder {
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_prefixed() {
        assert_eq!(&*parse_token("abc"), "Bot abc");
        assert_eq!(&*parse_token(" Bot abc "), "Bot abc");
        assert_eq!(&*parse_token("Bearer xyz"), "Bearer xyz");
    }

    #[test]
    fn reasons_are_percent_encoded() {
        let headers = reason_into_header("spam & abuse").unwrap();
        assert_eq!(headers[AUDIT_LOG_REASON], "spam%20%26%20abuse");
    }

    #[test]
    fn api_base_loses_trailing_slashes() {
        let http = HttpBuilder::new("t").api_base("http://localhost:8080/api/").build().unwrap();
        assert_eq!(http.api_base(), "http://localhost:8080/api");
    }
}
