//! Deterministic local backstop providers.
//!
//! Registered last, these guarantee the fallback chain of a capability is
//! never fully exhausted: they make no network calls, touch no shared state,
//! never block, and always return a payload.

use std::time::Duration;

use rcommon::preview;

use crate::{
    Capability, GenProvider, GenerationRequest, Payload, ProviderError, ProviderFuture,
};

/// Canned-reply text backstop.
pub struct TextBackstop {
    name: String,
    priority: u32,
}

impl TextBackstop {
    pub fn new(name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }
}

impl GenProvider for TextBackstop {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        Capability::Text
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(1)
    }

    fn attempt<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> ProviderFuture<'a, Result<Option<Payload>, ProviderError>> {
        let reply = format!(
            "Automatic fallback reply: every upstream text service is \
             currently unavailable. Please retry in a moment.\n\nYour prompt: {}",
            preview(&request.prompt, 100)
        );
        Box::pin(async move { Ok(Some(Payload::Text(reply))) })
    }
}

/// Placeholder-image backstop. Renders a deterministic SVG so the payload is
/// a valid image document without any raster codec.
pub struct ImageBackstop {
    name: String,
    priority: u32,
}

impl ImageBackstop {
    pub fn new(name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }

    fn render(&self, prompt: &str) -> String {
        let (r, g, b) = background_for(prompt);
        let caption = xml_escape(&preview(prompt, 50));
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1024\" height=\"1024\">\
             <rect width=\"1024\" height=\"1024\" fill=\"rgb({r},{g},{b})\"/>\
             <text x=\"50\" y=\"80\" font-size=\"32\" fill=\"white\">{caption}</text>\
             <text x=\"50\" y=\"130\" font-size=\"20\" fill=\"rgb(220,220,220)\">\
             Generated by local fallback</text>\
             </svg>"
        )
    }
}

impl GenProvider for ImageBackstop {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        Capability::Image
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(1)
    }

    fn attempt<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> ProviderFuture<'a, Result<Option<Payload>, ProviderError>> {
        let svg = self.render(&request.prompt);
        Box::pin(async move { Ok(Some(Payload::Bytes(svg.into_bytes()))) })
    }
}

/// FNV-1a over the prompt, folded into a muted RGB background. Same prompt,
/// same image.
fn background_for(prompt: &str) -> (u8, u8, u8) {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in prompt.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }

    let channel = |shift: u32| 50 + ((hash >> shift) as u8 % 151);
    (channel(0), channel(8), channel(16))
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn text_backstop_always_returns_a_payload() {
        let backstop = TextBackstop::new("backstop", 10);
        let request = GenerationRequest::new("what is rust?");

        let payload = backstop
            .attempt(&request)
            .await
            .expect("backstop never errors")
            .expect("backstop never returns empty");

        let text = payload.as_text().expect("text payload");
        assert!(text.contains("what is rust?"));
        assert_eq!(backstop.capability(), Capability::Text);
    }

    #[tokio::test]
    async fn image_backstop_is_deterministic() {
        let backstop = ImageBackstop::new("backstop", 9);
        let request = GenerationRequest::new("a red fox");

        let first = backstop.attempt(&request).await.expect("ok").expect("some");
        let second = backstop.attempt(&request).await.expect("ok").expect("some");
        assert_eq!(first, second);

        let svg = String::from_utf8(first.as_bytes().to_vec()).expect("utf8 svg");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("a red fox"));
    }

    #[tokio::test]
    async fn image_backstop_escapes_markup_in_prompts() {
        let backstop = ImageBackstop::new("backstop", 9);
        let request = GenerationRequest::new("<script>&\"alert\"</script>");

        let payload = backstop.attempt(&request).await.expect("ok").expect("some");
        let svg = String::from_utf8(payload.as_bytes().to_vec()).expect("utf8 svg");
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn different_prompts_produce_different_backgrounds() {
        assert_ne!(background_for("a"), background_for("b"));
        assert_eq!(background_for("same"), background_for("same"));
    }
}
