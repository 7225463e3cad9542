//! Default provider catalog: the free-tier endpoint set the framework ships
//! with, ranked and registered per capability with a backstop closing each
//! chain.
//!
//! Composition is static: a deployment wanting a different chain builds its
//! own registry instead of mutating this one.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use rprovider::{
    BridgeProvider, Capability, HttpEndpointDescriptor, HttpExchange, HttpProvider,
    ImageBackstop, ProviderRegistry, ReqwestExchange, ResponseShape, TextBackstop,
};
use serde_json::json;

const HTTP_TIMEOUT: Duration = Duration::from_secs(45);
const BRIDGE_TIMEOUT: Duration = Duration::from_secs(60);

/// The stock registry: image and text chains mirroring the hosted
/// deployment's provider set.
pub fn default_registry(client: Client) -> ProviderRegistry {
    let exchange: Arc<dyn HttpExchange> = Arc::new(ReqwestExchange::new(client));

    ProviderRegistry::builder()
        // Image chain.
        .register(felo_image(Arc::clone(&exchange)))
        .register(pollinations_image(Arc::clone(&exchange)))
        .register(duck_image(Arc::clone(&exchange)))
        .register(nanobanana_image(Arc::clone(&exchange)))
        .register(higgsfield_image(Arc::clone(&exchange)))
        .register(puter_image())
        .register(ImageBackstop::new("local-placeholder", 90))
        // Text chain.
        .register(puter_gemini_text())
        .register(openrouter_text(Arc::clone(&exchange)))
        .register(duck_text(Arc::clone(&exchange)))
        .register(nanobanana_text(Arc::clone(&exchange)))
        .register(felo_text(Arc::clone(&exchange)))
        .register(higgsfield_text(Arc::clone(&exchange)))
        .register(TextBackstop::new("local-reply", 90))
        .build()
}

fn felo_image(exchange: Arc<dyn HttpExchange>) -> HttpProvider {
    let descriptor = HttpEndpointDescriptor::post_json(
        "https://api.felo.ai/v1/gemini-image-gen",
        json!({
            "prompt": "{prompt}",
            "model": "gemini-3-pro-image-preview",
            "width": 1024,
            "height": 1024,
            "response_format": "b64_json"
        }),
        ResponseShape::Base64Pointer("/data/0/b64_json".to_string()),
    )
    .with_header("Authorization", "Bearer free");

    HttpProvider::new(
        "felo-image",
        Capability::Image,
        1,
        HTTP_TIMEOUT,
        descriptor,
        exchange,
    )
}

fn pollinations_image(exchange: Arc<dyn HttpExchange>) -> HttpProvider {
    let descriptor = HttpEndpointDescriptor::get(
        "https://pollinations.ai/prompt/{prompt}",
        ResponseShape::BodyBytes,
    )
    .with_query("width", "1024")
    .with_query("height", "1024")
    .with_query("model", "flux")
    .with_query("nologo", "true")
    .with_query("seed", "{seed}");

    HttpProvider::new(
        "pollinations",
        Capability::Image,
        2,
        HTTP_TIMEOUT,
        descriptor,
        exchange,
    )
}

fn duck_image(exchange: Arc<dyn HttpExchange>) -> HttpProvider {
    let descriptor = HttpEndpointDescriptor::post_json(
        "https://duck.ai/api/generate",
        json!({
            "prompt": "{prompt}",
            "model": "dall-e-3",
            "size": "1024x1024",
            "n": 1
        }),
        ResponseShape::UrlPointer("/data/0/url".to_string()),
    )
    .with_header("User-Agent", "Mozilla/5.0");

    HttpProvider::new(
        "duck-image",
        Capability::Image,
        3,
        HTTP_TIMEOUT,
        descriptor,
        exchange,
    )
}

fn nanobanana_image(exchange: Arc<dyn HttpExchange>) -> HttpProvider {
    let descriptor = HttpEndpointDescriptor::get(
        "https://api.nanobanana-pro.com/v1/generate",
        ResponseShape::BodyBytes,
    )
    .with_query("prompt", "{prompt}")
    .with_query("model", "gemini-3-pro")
    .with_query("format", "png");

    HttpProvider::new(
        "nanobanana-image",
        Capability::Image,
        4,
        HTTP_TIMEOUT,
        descriptor,
        exchange,
    )
}

fn higgsfield_image(exchange: Arc<dyn HttpExchange>) -> HttpProvider {
    let descriptor = HttpEndpointDescriptor::get(
        "https://api.higgsfield.ai/v1/generate",
        ResponseShape::BodyBytes,
    )
    .with_header("User-Agent", "Mozilla/5.0")
    .with_header("Accept", "image/*")
    .with_query("prompt", "{prompt}")
    .with_query("model", "nano-banana-pro");

    HttpProvider::new(
        "higgsfield-image",
        Capability::Image,
        5,
        HTTP_TIMEOUT,
        descriptor,
        exchange,
    )
}

fn puter_image() -> BridgeProvider {
    BridgeProvider::new(
        "puter-image",
        Capability::Image,
        6,
        BRIDGE_TIMEOUT,
        r#"const { puter } = require('@heyputer/puter.js');

(async () => {
    try {
        const image = await puter.ai.txt2img({prompt_json});
        const data = image.toString('base64');
        console.log(JSON.stringify({ success: true, data }));
    } catch (error) {
        console.log(JSON.stringify({ success: false }));
    }
})();
"#,
    )
}

fn puter_gemini_text() -> BridgeProvider {
    BridgeProvider::new(
        "puter-gemini",
        Capability::Text,
        1,
        BRIDGE_TIMEOUT,
        r#"const { puter } = require('@heyputer/puter.js');

(async () => {
    try {
        const fullPrompt = `${ {system_json} }\n\n${ {prompt_json} }`;
        const response = await puter.ai.chat(fullPrompt, { model: "gemini-3-pro-preview" });
        console.log(JSON.stringify({ success: true, text: response }));
    } catch (error) {
        console.log(JSON.stringify({ success: false }));
    }
})();
"#,
    )
}

fn openrouter_text(exchange: Arc<dyn HttpExchange>) -> HttpProvider {
    let descriptor = HttpEndpointDescriptor::post_json(
        "https://openrouter.ai/api/v1/chat/completions",
        json!({
            "model": "google/gemini-2.5-flash-preview-09-2025:free",
            "messages": [
                {"role": "system", "content": "{system}"},
                {"role": "user", "content": "{prompt}"}
            ],
            "temperature": 0.7
        }),
        ResponseShape::TextPointer("/choices/0/message/content".to_string()),
    );

    HttpProvider::new(
        "openrouter",
        Capability::Text,
        2,
        HTTP_TIMEOUT,
        descriptor,
        exchange,
    )
}

fn duck_text(exchange: Arc<dyn HttpExchange>) -> HttpProvider {
    let descriptor = HttpEndpointDescriptor::post_json(
        "https://duck.ai/api/chat",
        json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "{system}"},
                {"role": "user", "content": "{prompt}"}
            ],
            "stream": false
        }),
        ResponseShape::TextPointer("/choices/0/message/content".to_string()),
    )
    .with_header("User-Agent", "Mozilla/5.0");

    HttpProvider::new(
        "duck-chat",
        Capability::Text,
        3,
        HTTP_TIMEOUT,
        descriptor,
        exchange,
    )
}

fn nanobanana_text(exchange: Arc<dyn HttpExchange>) -> HttpProvider {
    let descriptor = HttpEndpointDescriptor::get(
        "https://api.nanobanana-pro.com/v1/chat",
        ResponseShape::BodyText,
    )
    .with_query("prompt", "{prompt}")
    .with_query("system", "{system}")
    .with_query("model", "gemini-3-pro");

    HttpProvider::new(
        "nanobanana-chat",
        Capability::Text,
        4,
        HTTP_TIMEOUT,
        descriptor,
        exchange,
    )
}

fn felo_text(exchange: Arc<dyn HttpExchange>) -> HttpProvider {
    let descriptor = HttpEndpointDescriptor::post_json(
        "https://api.felo.ai/v1/chat",
        json!({
            "model": "gemini-3-pro",
            "messages": [
                {"role": "system", "content": "{system}"},
                {"role": "user", "content": "{prompt}"}
            ]
        }),
        ResponseShape::TextPointer("/choices/0/message/content".to_string()),
    )
    .with_header("Authorization", "Bearer free");

    HttpProvider::new(
        "felo-chat",
        Capability::Text,
        5,
        HTTP_TIMEOUT,
        descriptor,
        exchange,
    )
}

fn higgsfield_text(exchange: Arc<dyn HttpExchange>) -> HttpProvider {
    let descriptor = HttpEndpointDescriptor::get(
        "https://api.higgsfield.ai/v1/chat",
        ResponseShape::BodyText,
    )
    .with_query("prompt", "{prompt}")
    .with_query("system", "{system}")
    .with_query("model", "nano-banana");

    HttpProvider::new(
        "higgsfield-chat",
        Capability::Text,
        6,
        HTTP_TIMEOUT,
        descriptor,
        exchange,
    )
}
