use std::time::Duration;

use async_trait::async_trait;
use lexicon_analyzer::schema::lexicon_schema;
use lexicon_analyzer::{
    AnalysisError, Analyzer, BackendCause, ExamplePolicy, PromptSpec, ProviderMetadata,
    parse_record,
};
use lexicon_config::analyzer::AnalyzerConfig;
use lexicon_types::LexiconRecord;

use crate::wire::{GenerateRequest, GenerateResponse};

#[derive(Clone)]
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    prompt: PromptSpec,
    policy: ExamplePolicy,
    timeout: Option<Duration>,
}

impl GeminiAnalyzer {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
            prompt: PromptSpec::default(),
            policy: ExamplePolicy::Lenient,
            timeout: None,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let policy = if config.strict_examples {
            ExamplePolicy::Exactly(config.example_count)
        } else {
            ExamplePolicy::Lenient
        };
        let timeout =
            (config.request_timeout_secs > 0).then(|| Duration::from_secs(config.request_timeout_secs));

        Self::new(
            config.api_key.clone(),
            config.api_url.clone(),
            config.model.clone(),
        )
        .with_prompt(PromptSpec {
            explanation_language: config.explanation_language.clone(),
            example_count: config.example_count,
        })
        .with_policy(policy)
        .with_timeout(timeout)
    }

    pub fn with_prompt(mut self, prompt: PromptSpec) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_policy(mut self, policy: ExamplePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    /// Send the request and return the raw model text
    async fn generate(&self, word: &str) -> Result<String, BackendCause> {
        let request = GenerateRequest::new(
            self.prompt.render(word),
            lexicon_schema(&self.prompt.explanation_language),
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendCause::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = serde_json::from_slice(&response.bytes().await?)?;

        body.into_text().ok_or(BackendCause::EmptyPayload)
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, word: &str) -> Result<LexiconRecord, AnalysisError> {
        tracing::debug!(word, model = %self.model, "Requesting analysis");

        let text = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.generate(word))
                .await
                .map_err(|_| BackendCause::Timeout(limit))??,
            None => self.generate(word).await?,
        };

        let record = parse_record(&text, self.policy)?;
        tracing::debug!(word = %record.word, "Analysis parsed");

        Ok(record)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use lexicon_analyzer::BACKEND_FAILURE_MESSAGE;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;

    use super::*;

    fn record_json(examples: usize) -> serde_json::Value {
        let examples: Vec<String> = (0..examples).map(|i| format!("Quote {i}")).collect();
        json!({
            "word": "Nostalgia",
            "phonetics": { "ipa": "/nɒˈstældʒə/", "syllables": "nos-TAL-gia", "tip": "像 “no stall ja”" },
            "etymology": { "rootAnalysis": "nostos + algos", "backstory": "1688 年一位瑞士医学生……" },
            "cognates": [{ "word": "analgesic", "connection": "同含 algos（痛）" }],
            "nuance": {
                "synonyms": [{ "word": "longing", "context": "更泛指渴望" }],
                "antonym": "indifference",
                "examples": examples
            }
        })
    }

    fn envelope(text: &str) -> String {
        json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serve one canned response and hand back the raw request
    async fn serve_once(status: &'static str, body: String) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            let _ = tx.send(request);
        });

        (format!("http://{addr}/v1beta"), rx)
    }

    /// Accept one connection and never answer
    async fn serve_silence() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let _ = read_request(&mut socket).await;
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        addr
    }

    fn analyzer(url: String) -> GeminiAnalyzer {
        GeminiAnalyzer::new("test-key".to_string(), url, "gemini-test".to_string())
    }

    #[tokio::test]
    async fn test_valid_response_yields_record() {
        let (url, request_rx) = serve_once("200 OK", envelope(&record_json(5).to_string())).await;

        let record = analyzer(url).analyze("Nostalgia").await.unwrap();
        assert_eq!(record.word, "Nostalgia");
        assert_eq!(record.nuance.examples.len(), 5);

        let request = request_rx.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-test:generateContent"));
        assert!(request.to_lowercase().contains("x-goog-api-key: test-key"));
        assert!(request.contains("\\\"Nostalgia\\\""));
        assert!(request.contains("\"responseMimeType\":\"application/json\""));
        assert!(request.contains("\"responseSchema\""));
    }

    #[tokio::test]
    async fn test_malformed_model_text_is_backend_failure() {
        let (url, _rx) = serve_once("200 OK", envelope("{\"word\": \"Nostal")).await;

        let error = analyzer(url).analyze("Nostalgia").await.unwrap_err();
        assert!(matches!(
            error,
            AnalysisError::BackendFailure(BackendCause::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_candidates_is_empty_payload() {
        let (url, _rx) = serve_once("200 OK", json!({ "candidates": [] }).to_string()).await;

        let error = analyzer(url).analyze("Nostalgia").await.unwrap_err();
        assert!(matches!(
            error,
            AnalysisError::BackendFailure(BackendCause::EmptyPayload)
        ));
    }

    #[tokio::test]
    async fn test_error_status_is_backend_failure() {
        let body = json!({ "error": { "code": 403, "message": "API key not valid" } }).to_string();
        let (url, _rx) = serve_once("403 Forbidden", body).await;

        let error = analyzer(url).analyze("Nostalgia").await.unwrap_err();
        match error {
            AnalysisError::BackendFailure(BackendCause::Status { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refused_connection_is_backend_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let error = analyzer(format!("http://{addr}"))
            .analyze("Nostalgia")
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            AnalysisError::BackendFailure(BackendCause::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let addr = serve_silence().await;
        let analyzer = analyzer(format!("http://{addr}"))
            .with_timeout(Some(Duration::from_millis(200)));

        let error = analyzer.analyze("Nostalgia").await.unwrap_err();
        assert!(matches!(
            error,
            AnalysisError::BackendFailure(BackendCause::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_and_timeout_share_user_message() {
        let (url, _rx) = serve_once("200 OK", envelope("not json at all")).await;
        let malformed = analyzer(url).analyze("Nostalgia").await.unwrap_err();

        let addr = serve_silence().await;
        let timed_out = analyzer(format!("http://{addr}"))
            .with_timeout(Some(Duration::from_millis(100)))
            .analyze("Nostalgia")
            .await
            .unwrap_err();

        assert_ne!(malformed.to_string(), timed_out.to_string());
        assert_eq!(malformed.user_message(), timed_out.user_message());
        assert_eq!(malformed.user_message(), BACKEND_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_short_example_list() {
        let (url, _rx) = serve_once("200 OK", envelope(&record_json(4).to_string())).await;

        let error = analyzer(url)
            .with_policy(ExamplePolicy::Exactly(5))
            .analyze("Nostalgia")
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            AnalysisError::BackendFailure(BackendCause::Schema(_))
        ));
    }

    #[test]
    fn test_from_config_maps_settings() {
        let config = AnalyzerConfig {
            api_key: "k".to_string(),
            api_url: "http://localhost:1/v1beta/".to_string(),
            strict_examples: true,
            request_timeout_secs: 0,
            ..AnalyzerConfig::default()
        };
        let analyzer = GeminiAnalyzer::from_config(&config);

        assert_eq!(
            analyzer.endpoint(),
            "http://localhost:1/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(analyzer.policy, ExamplePolicy::Exactly(5));
        assert!(analyzer.timeout.is_none());
        assert_eq!(analyzer.metadata().model, "gemini-2.5-flash");
        assert!(analyzer.metadata().requires_api_key);
    }
}
