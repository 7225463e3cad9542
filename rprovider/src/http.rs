//! Generic HTTP provider driven by a declarative endpoint descriptor.
//!
//! Most free generation endpoints differ only in URL, payload shape, and the
//! JSON path holding the result, so one provider type configured by an
//! [`HttpEndpointDescriptor`] covers them all. The wire itself sits behind
//! the [`HttpExchange`] trait so tests can substitute a fake.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::Rng as _;
use reqwest::Client;

use crate::{
    Capability, GenProvider, GenerationRequest, Payload, ProviderError, ProviderFuture,
};

/// Template placeholders accepted in URLs, query values, and JSON body
/// strings.
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";
pub const SYSTEM_PLACEHOLDER: &str = "{system}";
/// Replaced with a fresh random integer on each attempt (cache busting).
pub const SEED_PLACEHOLDER: &str = "{seed}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// How to pull the generated payload out of a 2xx reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// The raw body is the payload (image bytes).
    BodyBytes,
    /// The raw body is the payload (plain text).
    BodyText,
    /// JSON pointer to a string field holding the text payload.
    TextPointer(String),
    /// JSON pointer to a base64-encoded string holding image bytes.
    Base64Pointer(String),
    /// JSON pointer to a URL; a follow-up GET fetches the payload bytes.
    UrlPointer(String),
}

/// Declarative description of one upstream endpoint.
#[derive(Debug, Clone)]
pub struct HttpEndpointDescriptor {
    pub method: HttpMethod,
    /// May contain `{prompt}` (percent-encoded on substitution).
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Query values may contain any placeholder.
    pub query: Vec<(String, String)>,
    /// JSON body template; string values may contain any placeholder.
    pub body: Option<serde_json::Value>,
    pub response: ResponseShape,
}

impl HttpEndpointDescriptor {
    pub fn get(url: impl Into<String>, response: ResponseShape) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            response,
        }
    }

    pub fn post_json(
        url: impl Into<String>,
        body: serde_json::Value,
        response: ResponseShape,
    ) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: Some(body),
            response,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// One rendered request, ready for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpCall {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The wire seam. Implementations map their transport faults to
/// [`ProviderError`] and never panic.
pub trait HttpExchange: Send + Sync {
    fn execute<'a>(&'a self, call: HttpCall) -> ProviderFuture<'a, Result<HttpReply, ProviderError>>;
}

/// reqwest-backed exchange used in production wiring.
#[derive(Debug, Clone)]
pub struct ReqwestExchange {
    client: Client,
}

impl ReqwestExchange {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl HttpExchange for ReqwestExchange {
    fn execute<'a>(&'a self, call: HttpCall) -> ProviderFuture<'a, Result<HttpReply, ProviderError>> {
        Box::pin(async move {
            let mut builder = match call.method {
                HttpMethod::Get => self.client.get(&call.url),
                HttpMethod::Post => self.client.post(&call.url),
            };

            for (name, value) in &call.headers {
                builder = builder.header(name, value);
            }

            if !call.query.is_empty() {
                builder = builder.query(&call.query);
            }

            if let Some(body) = &call.body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(|err| {
                if err.is_timeout() {
                    ProviderError::timeout(err.to_string())
                } else {
                    ProviderError::transport(err.to_string())
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))?
                .to_vec();

            Ok(HttpReply { status, body })
        })
    }
}

/// A provider whose entire upstream integration is an endpoint descriptor.
pub struct HttpProvider {
    name: String,
    capability: Capability,
    priority: u32,
    timeout: Duration,
    descriptor: HttpEndpointDescriptor,
    exchange: Arc<dyn HttpExchange>,
}

impl HttpProvider {
    pub fn new(
        name: impl Into<String>,
        capability: Capability,
        priority: u32,
        timeout: Duration,
        descriptor: HttpEndpointDescriptor,
        exchange: Arc<dyn HttpExchange>,
    ) -> Self {
        Self {
            name: name.into(),
            capability,
            priority,
            timeout,
            descriptor,
            exchange,
        }
    }

    fn render_call(&self, request: &GenerationRequest) -> HttpCall {
        let seed = rand::thread_rng().gen_range(1..=10_000_u32).to_string();
        let encoded_prompt = urlencoding::encode(&request.prompt).into_owned();

        let url = self
            .descriptor
            .url
            .replace(PROMPT_PLACEHOLDER, &encoded_prompt)
            .replace(SEED_PLACEHOLDER, &seed);

        let query = self
            .descriptor
            .query
            .iter()
            .map(|(name, value)| (name.clone(), substitute(value, request, &seed)))
            .collect();

        let body = self
            .descriptor
            .body
            .as_ref()
            .map(|template| render_json(template, request, &seed));

        HttpCall {
            method: self.descriptor.method,
            url,
            headers: self.descriptor.headers.clone(),
            query,
            body,
        }
    }

    async fn decode_reply(&self, reply: HttpReply) -> Result<Option<Payload>, ProviderError> {
        if !reply.is_success() {
            return Err(ProviderError::transport(format!(
                "{} replied with status {}",
                self.name, reply.status
            )));
        }

        match &self.descriptor.response {
            ResponseShape::BodyBytes => {
                if reply.body.is_empty() {
                    return Ok(None);
                }
                Ok(Some(Payload::Bytes(reply.body)))
            }
            ResponseShape::BodyText => {
                let text = String::from_utf8(reply.body)
                    .map_err(|err| ProviderError::decode(err.to_string()))?;
                if text.trim().is_empty() {
                    return Ok(None);
                }
                Ok(Some(Payload::Text(text)))
            }
            ResponseShape::TextPointer(pointer) => {
                let text = json_string_at(&reply.body, pointer)?;
                if text.is_empty() {
                    return Ok(None);
                }
                Ok(Some(Payload::Text(text)))
            }
            ResponseShape::Base64Pointer(pointer) => {
                let encoded = json_string_at(&reply.body, pointer)?;
                let bytes = BASE64
                    .decode(encoded.as_bytes())
                    .map_err(|err| ProviderError::decode(err.to_string()))?;
                if bytes.is_empty() {
                    return Ok(None);
                }
                Ok(Some(Payload::Bytes(bytes)))
            }
            ResponseShape::UrlPointer(pointer) => {
                let url = json_string_at(&reply.body, pointer)?;
                let follow = HttpCall {
                    method: HttpMethod::Get,
                    url,
                    headers: Vec::new(),
                    query: Vec::new(),
                    body: None,
                };

                let fetched = self.exchange.execute(follow).await?;
                if !fetched.is_success() {
                    return Err(ProviderError::transport(format!(
                        "payload fetch replied with status {}",
                        fetched.status
                    )));
                }
                if fetched.body.is_empty() {
                    return Ok(None);
                }
                Ok(Some(Payload::Bytes(fetched.body)))
            }
        }
    }
}

impl GenProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        self.capability
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn attempt<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> ProviderFuture<'a, Result<Option<Payload>, ProviderError>> {
        Box::pin(async move {
            let call = self.render_call(request);
            let reply = self.exchange.execute(call).await?;
            self.decode_reply(reply).await
        })
    }
}

fn substitute(template: &str, request: &GenerationRequest, seed: &str) -> String {
    template
        .replace(PROMPT_PLACEHOLDER, &request.prompt)
        .replace(SYSTEM_PLACEHOLDER, request.system_context_or_default())
        .replace(SEED_PLACEHOLDER, seed)
}

fn render_json(
    template: &serde_json::Value,
    request: &GenerationRequest,
    seed: &str,
) -> serde_json::Value {
    match template {
        serde_json::Value::String(text) => {
            serde_json::Value::String(substitute(text, request, seed))
        }
        serde_json::Value::Array(items) => serde_json::Value::Array(
            items
                .iter()
                .map(|item| render_json(item, request, seed))
                .collect(),
        ),
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), render_json(value, request, seed)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn json_string_at(body: &[u8], pointer: &str) -> Result<String, ProviderError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|err| ProviderError::malformed(err.to_string()))?;

    value
        .pointer(pointer)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ProviderError::malformed(format!("missing string field at '{pointer}'")))
}
