use crate::models::config::OcrConfig;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Vision model family used when none is selected on the command line
pub const DEFAULT_MODEL: &str = "Llama-3.2-90B-Vision";

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Instruction sent alongside the image. The model must return bare markdown,
/// with no code fences and no commentary around it.
const MARKDOWN_PROMPT: &str = "Convert the provided image into Markdown format. \
Ensure that all content from the page is included, such as headers, footers, \
subtexts, images (with alt text if possible), tables, and any other elements.\n\n\
Requirements:\n\n\
- Output Only Markdown: Return solely the Markdown content without any additional explanations or comments.\n\
- No Delimiters: Do not use code fences or delimiters like ```markdown.\n\
- Include All Page Content: Include all content on the page, including headers, footers, and subtexts.";

/// HTTP client for the Together AI vision chat-completions endpoint
#[derive(Clone)]
pub struct TogetherOcrClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Map a user-facing model name to the full Together model id.
/// "free" selects the free-tier vision model.
pub fn resolve_model(name: &str) -> String {
    if name == "free" {
        "meta-llama/Llama-Vision-Free".to_string()
    } else {
        format!("meta-llama/{}-Instruct-Turbo", name)
    }
}

/// Remote sources are passed to the API verbatim instead of being read from disk
fn is_remote_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read a local image and encode it as a data URL for the request payload
fn encode_image(path: &str) -> Result<String, String> {
    let bytes =
        std::fs::read(path).map_err(|e| format!("Failed to read image '{}': {}", path, e))?;

    let format = image::guess_format(&bytes)
        .map_err(|e| format!("Unrecognized image format for '{}': {}", path, e))?;

    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        general_purpose::STANDARD.encode(&bytes)
    ))
}

/// Pull the provider's error message out of a JSON error body when present
fn extract_api_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

impl TogetherOcrClient {
    /// Create a new client from resolved configuration
    pub fn new(config: OcrConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url,
            api_key: config.api_key,
        }
    }

    /// Send one image to the vision model and return the extracted markdown.
    ///
    /// `source` is either a local file path or an http(s) URL. Exactly one
    /// request is issued per call; failures are returned, never retried.
    pub async fn extract_markdown(&self, source: &str, model: &str) -> Result<String, String> {
        let model = resolve_model(model);

        let image_url = if is_remote_source(source) {
            debug!(source = %source, "passing remote image url through");
            source.to_string()
        } else {
            debug!(source = %source, "encoding local image");
            encode_image(source)?
        };

        info!(model = %model, "requesting markdown extraction");

        let request = ChatRequest {
            model,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: MARKDOWN_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: image_url },
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!(
                "OCR API error ({}): {}",
                status,
                extract_api_error(&body)
            ));
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        data.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| "Empty response from OCR API".to_string())
    }
}
