#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use riposte::builder::{ContentNormalizer, CreateAttachment};
use riposte::http::{DiscordJsonError, ErrorResponse, HttpError, LightMethod, Request, RequestHandler};
use riposte::json::{from_value, json, Value};
use riposte::model::application::{DefaultModelFactory, Interaction};
use riposte::{async_trait, Error, Result};

pub const INTERACTION_ID: u64 = 846462639134605312;
pub const APPLICATION_ID: u64 = 772115283915735061;
pub const TOKEN: &str = "aW50ZXJhY3Rpb246ODQ2NDYyNjM5MTM0NjA1MzEy";

/// A request as seen by the transport, with the route rendered to its path.
#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    pub method: LightMethod,
    pub path: String,
    pub authenticated: bool,
    pub body: Option<Value>,
    pub files: Vec<CreateAttachment>,
    pub params: Vec<(&'static str, String)>,
    pub audit_log_reason: Option<String>,
}

/// Records every request and answers with scripted responses, `null` once they run out.
#[derive(Default)]
pub struct Recorder {
    requests: Mutex<Vec<Recorded>>,
    responses: Mutex<VecDeque<Result<Value>>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond_with(&self, response: Result<Value>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn single(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:#?}");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl RequestHandler for Recorder {
    async fn request(&self, request: Request<'_>) -> Result<Value> {
        self.requests.lock().unwrap().push(Recorded {
            method: request.method,
            path: request.route.path().into_owned(),
            authenticated: request.authenticated,
            body: request.body,
            files: request.files,
            params: request.params,
            audit_log_reason: request.audit_log_reason.map(str::to_owned),
        });

        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(Value::Null))
    }
}

/// A transport whose requests never complete.
pub struct Stalled;

#[async_trait]
impl RequestHandler for Stalled {
    async fn request(&self, _: Request<'_>) -> Result<Value> {
        std::future::pending().await
    }
}

/// An unsuccessful response as the transport would report it.
pub fn unsuccessful(status_code: u16, code: isize, message: &str) -> Error {
    let error: DiscordJsonError = from_value(json!({"code": code, "message": message})).unwrap();
    Error::Http(HttpError::UnsuccessfulRequest(ErrorResponse::new(
        status_code,
        "InteractionResponse",
        LightMethod::Post,
        error,
    )))
}

/// The wire payload of an interaction of the given type.
pub fn payload(kind: u8) -> Value {
    json!({
        "id": INTERACTION_ID.to_string(),
        "application_id": APPLICATION_ID.to_string(),
        "type": kind,
        "token": TOKEN,
        "channel_id": "645027906669510667",
        "guild_id": "290926798626357999",
        "version": 1,
    })
}

pub fn interaction_from(payload: Value, recorder: &Arc<Recorder>) -> Interaction {
    interaction_with(payload, Arc::clone(recorder) as Arc<dyn RequestHandler>)
}

pub fn interaction_with(payload: Value, http: Arc<dyn RequestHandler>) -> Interaction {
    Interaction::from_value(payload, http, Arc::new(ContentNormalizer::default()), &DefaultModelFactory)
        .unwrap()
}

pub fn interaction(kind: u8, recorder: &Arc<Recorder>) -> Interaction {
    interaction_from(payload(kind), recorder)
}

pub fn callback_path() -> String {
    format!("/interactions/{INTERACTION_ID}/{TOKEN}/callback")
}

pub fn webhook_path() -> String {
    format!("/webhooks/{APPLICATION_ID}/{TOKEN}")
}

pub fn default_mentions() -> Value {
    json!({"parse": ["roles", "users"]})
}
