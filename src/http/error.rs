use std::error::Error as StdError;
use std::fmt;

#[cfg(feature = "http")]
use reqwest::header::InvalidHeaderValue;
#[cfg(feature = "http")]
use reqwest::{Error as ReqwestError, Response};
use url::ParseError as UrlError;

use super::LightMethod;
use crate::internal::prelude::*;

/// The error body Discord sends with an unsuccessful response.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct DiscordJsonError {
    /// The error code.
    pub code: isize,
    /// The error message.
    pub message: String,
    /// The per-field errors, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

/// An unsuccessful response from the API, as surfaced to callers unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ErrorResponse {
    pub status_code: u16,
    /// The [`Route::kind`] of the failed request. Never contains tokens.
    ///
    /// [`Route::kind`]: super::Route::kind
    pub route: String,
    pub method: LightMethod,
    pub error: DiscordJsonError,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(
        status_code: u16,
        route: impl Into<String>,
        method: LightMethod,
        error: DiscordJsonError,
    ) -> Self {
        Self {
            status_code,
            route: route.into(),
            method,
            error,
        }
    }

    // We need a custom implementation for parsing the error body because the API can return
    // something other than JSON.
    #[cfg(feature = "http")]
    pub(super) async fn from_response(r: Response, method: LightMethod, route: String) -> Self {
        let status_code = r.status().as_u16();
        let body = r.bytes().await.ok();

        let parsed = body.as_deref().and_then(|body| serde_json::from_slice(body).ok());
        let error = parsed.unwrap_or_else(|| DiscordJsonError {
            code: -1,
            message: body.map_or_else(
                || "[riposte] Could not read the response body".to_string(),
                |b| String::from_utf8_lossy(&b).into_owned(),
            ),
            errors: None,
        });

        Self {
            status_code,
            route,
            method,
            error,
        }
    }
}

/// The transport failure kind: every error a [`RequestHandler`] may report.
///
/// [`RequestHandler`]: super::RequestHandler
#[derive(Debug)]
#[non_exhaustive]
pub enum HttpError {
    /// When a non-successful status code was received for a request.
    UnsuccessfulRequest(ErrorResponse),
    /// When parsing an URL failed due to invalid input.
    Url(UrlError),
    /// Header value contains invalid input.
    #[cfg(feature = "http")]
    InvalidHeader(InvalidHeaderValue),
    /// Reqwest's Error contain information on why sending a request failed.
    #[cfg(feature = "http")]
    Request(ReqwestError),
    /// A failure reported by a custom transport.
    Transport(Box<dyn StdError + Send + Sync>),
}

impl HttpError {
    /// Returns true when the error is caused by an unsuccessful request
    #[must_use]
    pub fn is_unsuccessful_request(&self) -> bool {
        matches!(self, Self::UnsuccessfulRequest(_))
    }

    /// Returns the status code if the error is an unsuccessful request
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnsuccessfulRequest(res) => Some(res.status_code),
            _ => None,
        }
    }
}

impl From<ErrorResponse> for HttpError {
    fn from(error: ErrorResponse) -> Self {
        Self::UnsuccessfulRequest(error)
    }
}

#[cfg(feature = "http")]
impl From<ReqwestError> for HttpError {
    fn from(error: ReqwestError) -> Self {
        Self::Request(error)
    }
}

impl From<UrlError> for HttpError {
    fn from(error: UrlError) -> Self {
        Self::Url(error)
    }
}

#[cfg(feature = "http")]
impl From<InvalidHeaderValue> for HttpError {
    fn from(error: InvalidHeaderValue) -> Self {
        Self::InvalidHeader(error)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsuccessfulRequest(e) => f.write_str(&e.error.message),
            Self::Url(_) => f.write_str("Provided URL is incorrect."),
            #[cfg(feature = "http")]
            Self::InvalidHeader(_) => f.write_str("Provided value is an invalid header value."),
            #[cfg(feature = "http")]
            Self::Request(_) => f.write_str("Error while sending HTTP request."),
            Self::Transport(e) => write!(f, "Transport failure: {e}"),
        }
    }
}

impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Url(inner) => Some(inner),
            #[cfg(feature = "http")]
            Self::InvalidHeader(inner) => Some(inner),
            #[cfg(feature = "http")]
            Self::Request(inner) => Some(inner),
            Self::Transport(inner) => Some(&**inner),
            Self::UnsuccessfulRequest(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn unsuccessful_requests_expose_status_and_message() {
        let error: DiscordJsonError =
            from_value(json!({"code": 10062, "message": "Unknown interaction"})).unwrap();
        let error =
            HttpError::from(ErrorResponse::new(404, "InteractionResponse", LightMethod::Post, error));

        assert!(error.is_unsuccessful_request());
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.to_string(), "Unknown interaction");
    }
}
