//! Provider that delegates to an external runtime bridge process.
//!
//! Some upstreams are only reachable through a JavaScript SDK. This variant
//! writes a small script to a temp file, runs it under `node`, and reads a
//! single JSON object from stdout: `{"success": bool, "data": <base64>}` for
//! images or `{"success": bool, "text": <string>}` for text. How the bridge
//! reaches its upstream is invisible to the orchestrator; the variant honors
//! the same `attempt` contract as every other provider.

use std::io::Write as _;
use std::process::Stdio;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tokio::process::Command;

use crate::{
    Capability, GenProvider, GenerationRequest, Payload, ProviderError, ProviderFuture,
};

/// Placeholders accepted in bridge script templates. Both are substituted
/// with JSON string literals, so the script can splice them directly.
pub const PROMPT_JSON_PLACEHOLDER: &str = "{prompt_json}";
pub const SYSTEM_JSON_PLACEHOLDER: &str = "{system_json}";

pub struct BridgeProvider {
    name: String,
    capability: Capability,
    priority: u32,
    timeout: Duration,
    runtime: String,
    script_template: String,
}

impl BridgeProvider {
    pub fn new(
        name: impl Into<String>,
        capability: Capability,
        priority: u32,
        timeout: Duration,
        script_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            capability,
            priority,
            timeout,
            runtime: "node".to_string(),
            script_template: script_template.into(),
        }
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    fn render_script(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let prompt_json = serde_json::to_string(&request.prompt)
            .map_err(|err| ProviderError::decode(err.to_string()))?;
        let system_json = serde_json::to_string(request.system_context_or_default())
            .map_err(|err| ProviderError::decode(err.to_string()))?;

        Ok(self
            .script_template
            .replace(PROMPT_JSON_PLACEHOLDER, &prompt_json)
            .replace(SYSTEM_JSON_PLACEHOLDER, &system_json))
    }

    fn parse_output(&self, stdout: &[u8]) -> Result<Option<Payload>, ProviderError> {
        let text = std::str::from_utf8(stdout)
            .map_err(|err| ProviderError::decode(err.to_string()))?;

        // The bridge prints exactly one JSON object, but the runtime may
        // prepend warnings; take the last non-empty line.
        let line = text
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| ProviderError::malformed("bridge produced no output"))?;

        let reply: BridgeReply = serde_json::from_str(line.trim())
            .map_err(|err| ProviderError::malformed(err.to_string()))?;

        if !reply.success {
            return Ok(None);
        }

        match self.capability {
            Capability::Image => {
                let encoded = reply.data.ok_or_else(|| {
                    ProviderError::malformed("bridge reply missing 'data' field")
                })?;
                let bytes = BASE64
                    .decode(encoded.as_bytes())
                    .map_err(|err| ProviderError::decode(err.to_string()))?;
                if bytes.is_empty() {
                    return Ok(None);
                }
                Ok(Some(Payload::Bytes(bytes)))
            }
            Capability::Text => {
                let text = reply.text.ok_or_else(|| {
                    ProviderError::malformed("bridge reply missing 'text' field")
                })?;
                if text.is_empty() {
                    return Ok(None);
                }
                Ok(Some(Payload::Text(text)))
            }
        }
    }
}

impl GenProvider for BridgeProvider {
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
            let script = self.render_script(request)?;

            // The temp file lives until `script_file` drops, after the
            // process has exited.
            let mut script_file = tempfile::Builder::new()
                .suffix(".js")
                .tempfile()
                .map_err(|err| ProviderError::transport(err.to_string()))?;
            script_file
                .write_all(script.as_bytes())
                .map_err(|err| ProviderError::transport(err.to_string()))?;

            let output = Command::new(&self.runtime)
                .arg(script_file.path())
                .stdin(Stdio::null())
                .output()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(ProviderError::transport(format!(
                    "bridge exited with {}: {}",
                    output.status,
                    rcommon::preview(stderr.trim(), 200)
                )));
            }

            self.parse_output(&output.stdout)
        })
    }
}

#[derive(Debug, Deserialize)]
struct BridgeReply {
    success: bool,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    fn text_bridge() -> BridgeProvider {
        BridgeProvider::new(
            "bridge-text",
            Capability::Text,
            1,
            Duration::from_secs(60),
            "chat({prompt_json}, {system_json});",
        )
    }

    fn image_bridge() -> BridgeProvider {
        BridgeProvider::new(
            "bridge-image",
            Capability::Image,
            1,
            Duration::from_secs(30),
            "txt2img({prompt_json});",
        )
    }

    #[test]
    fn render_script_splices_json_string_literals() {
        let request = GenerationRequest::new("say \"hi\"").with_system_context("be kind");
        let script = text_bridge().render_script(&request).expect("render");
        assert_eq!(script, "chat(\"say \\\"hi\\\"\", \"be kind\");");
    }

    #[test]
    fn parse_output_reads_text_reply() {
        let payload = text_bridge()
            .parse_output(b"{\"success\":true,\"text\":\"hello\"}\n")
            .expect("parse should succeed");
        assert_eq!(payload, Some(Payload::Text("hello".to_string())));
    }

    #[test]
    fn parse_output_decodes_image_reply() {
        let encoded = BASE64.encode([7_u8, 8]);
        let line = format!("{{\"success\":true,\"data\":\"{encoded}\"}}");
        let payload = image_bridge()
            .parse_output(line.as_bytes())
            .expect("parse should succeed");
        assert_eq!(payload, Some(Payload::Bytes(vec![7, 8])));
    }

    #[test]
    fn parse_output_skips_runtime_warnings() {
        let payload = text_bridge()
            .parse_output(b"(node) warning: something\n{\"success\":true,\"text\":\"ok\"}\n")
            .expect("parse should succeed");
        assert_eq!(payload, Some(Payload::Text("ok".to_string())));
    }

    #[test]
    fn unsuccessful_reply_is_no_result() {
        let payload = text_bridge()
            .parse_output(b"{\"success\":false,\"error\":\"quota\"}")
            .expect("parse should succeed");
        assert_eq!(payload, None);
    }

    #[test]
    fn garbage_output_is_malformed() {
        let error = text_bridge()
            .parse_output(b"not json at all")
            .expect_err("parse should fail");
        assert_eq!(error.kind, ProviderErrorKind::MalformedResponse);

        let error = text_bridge()
            .parse_output(b"   \n  ")
            .expect_err("parse should fail");
        assert_eq!(error.kind, ProviderErrorKind::MalformedResponse);
    }

    #[test]
    fn missing_payload_field_is_malformed() {
        let error = image_bridge()
            .parse_output(b"{\"success\":true,\"text\":\"wrong shape\"}")
            .expect_err("parse should fail");
        assert_eq!(error.kind, ProviderErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn missing_runtime_is_a_transport_error() {
        let provider = BridgeProvider::new(
            "bridge",
            Capability::Text,
            1,
            Duration::from_secs(5),
            "chat({prompt_json}, {system_json});",
        )
        .with_runtime("definitely-not-a-real-runtime");

        let error = provider
            .attempt(&GenerationRequest::new("hi"))
            .await
            .expect_err("attempt should fail");
        assert_eq!(error.kind, ProviderErrorKind::TransportUnreachable);
    }
}
