use std::fs;
use std::path::Path;
use std::time::Duration;

use ramhorns::Template;
use serde::{Deserialize, Serialize};

use crate::error::SummarizeError;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
// A letter over a full day of posts can take a while to generate
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(ramhorns::Content)]
struct PromptData<'a> {
    content: &'a str,
    model: &'a str,
    date: &'a str,
}

/// Renders the prompt template with the aggregated content, the model name
/// and a human-readable date.
pub fn build_prompt(
    template_path: &Path,
    content: &str,
    model: &str,
    date: &str,
) -> Result<String, SummarizeError> {
    let source = fs::read_to_string(template_path)
        .map_err(|_| SummarizeError::TemplateMissing(template_path.to_path_buf()))?;
    let template =
        Template::new(source).map_err(|e| SummarizeError::TemplateParse(e.to_string()))?;

    Ok(template.render(&PromptData {
        content,
        model,
        date,
    }))
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
pub struct ModelInfo {
    pub name: String,
}

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    pub model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Result<GeminiClient, SummarizeError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(GeminiClient {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// One completion call, no retries. The caller decides whether a failure
    /// aborts the run.
    pub fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        let url = format!("{}/models/{}:generateContent", API_BASE, self.model);
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json()?;
        let text = collect_text(body);
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyResponse);
        }
        Ok(text)
    }

    pub fn list_models(&self) -> Result<Vec<ModelInfo>, SummarizeError> {
        let url = format!("{}/models", API_BASE);
        let response = self
            .http
            .get(&url)
            .query(&[("pageSize", "100"), ("key", self.api_key.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ModelsResponse = response.json()?;
        Ok(body.models)
    }
}

fn collect_text(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::test_data::GEMINI_RESPONSE_JSON;

    use super::*;

    #[test]
    fn test_build_prompt() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "You are {{{{model}}}}. Today is {{{{date}}}}.\n\n{{{{{{content}}}}}}"
        )
        .unwrap();

        let prompt = build_prompt(
            file.path(),
            "--- Post 1: GME & AMC ---",
            "gemini-3-flash-preview",
            "February 01, 2026",
        )
        .unwrap();
        assert_eq!(
            prompt,
            "You are gemini-3-flash-preview. Today is February 01, 2026.\n\n--- Post 1: GME & AMC ---"
        );
    }

    #[test]
    fn test_build_prompt_missing_template() {
        let res = build_prompt(
            Path::new("/nonexistent/prompt.txt"),
            "content",
            "model",
            "date",
        );
        assert!(matches!(res, Err(SummarizeError::TemplateMissing(_))));
    }

    #[test]
    fn test_collect_text() {
        let response: GenerateResponse = serde_json::from_str(GEMINI_RESPONSE_JSON).unwrap();
        assert_eq!(
            collect_text(response),
            "**Subject:** Bulls On Parade\n\nMarkets rallied today."
        );
    }

    #[test]
    fn test_collect_text_empty_response() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(collect_text(response), "");
    }
}
