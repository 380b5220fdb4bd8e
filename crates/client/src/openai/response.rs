//! Responses API response types and answer extraction.

use searchkit_core::Usage;
use serde::Deserialize;

/// Raw response from the Responses API.
#[derive(Debug, Deserialize)]
pub struct ResponsesApiResponse {
    pub output: Vec<OutputItem>,
    pub usage: ApiUsage,
}

/// One item of the response's `output` array.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentItem>,
    },
    /// Tool calls, reasoning and anything else without answer text.
    #[serde(other)]
    Other,
}

/// One content part of a message.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    OutputText {
        text: String,
        #[serde(default)]
        annotations: Vec<Annotation>,
    },
    #[serde(other)]
    Other,
}

/// Annotation attached to a span of output text.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    UrlCitation { title: String, url: String },
    #[serde(other)]
    Other,
}

/// Token accounting as reported by the API.
#[derive(Debug, Deserialize)]
pub struct ApiUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub input_tokens_details: InputTokensDetails,
}

#[derive(Debug, Deserialize)]
pub struct InputTokensDetails {
    pub cached_tokens: u64,
}

impl Annotation {
    /// Format a URL citation as `"<title>: <url>"`.
    pub fn as_citation(&self) -> Option<String> {
        match self {
            Annotation::UrlCitation { title, url } => Some(format!("{title}: {url}")),
            Annotation::Other => None,
        }
    }
}

impl ResponsesApiResponse {
    /// Extract the answer text.
    ///
    /// The last `output_text` part wins. With `max_sources` set, up to that many
    /// URL citations per text part are collected and, if any were found, listed
    /// under a `Sources:` heading after the text.
    pub fn output_text(&self, max_sources: Option<usize>) -> String {
        let mut text = String::new();
        let mut sources = Vec::new();

        for item in &self.output {
            let OutputItem::Message { content } = item else {
                continue;
            };

            for part in content {
                let ContentItem::OutputText { text: part_text, annotations } = part else {
                    continue;
                };

                text.clone_from(part_text);

                if let Some(max) = max_sources {
                    sources.extend(annotations.iter().filter_map(Annotation::as_citation).take(max));
                }
            }
        }

        if let Some(max) = max_sources
            && !sources.is_empty()
        {
            sources.truncate(max);
            text.push_str("\n\nSources:\n");
            text.push_str(&sources.join("\n"));
        }

        text
    }

    pub fn usage(&self) -> Usage {
        Usage {
            prompt_tokens: self.usage.input_tokens,
            completion_tokens: self.usage.output_tokens,
            cached_prompt_tokens: self.usage.input_tokens_details.cached_tokens,
        }
    }
}
