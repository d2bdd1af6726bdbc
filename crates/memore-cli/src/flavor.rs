use std::{
    fmt,
    sync::{
        Arc,
        mpsc::{self, Receiver, TryRecvError},
    },
    thread,
    time::Duration,
};

use anyhow::Context as _;
use memore_engine::GameSession;
use serde::{Deserialize, Serialize};

/// Shown when no service is configured or the service fails.
pub(crate) const FALLBACK_TEXT: &str = "You put on a remarkable performance!";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// The numbers a game-over comment is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GameSummary {
    pub(crate) score: u64,
    pub(crate) level: u32,
    pub(crate) correct_answers: usize,
    pub(crate) wrong_answers: usize,
}

impl GameSummary {
    pub(crate) fn from_session(session: &GameSession) -> Self {
        let stats = session.stats();
        Self {
            score: stats.score(),
            level: session.level(),
            correct_answers: stats.correct_answers(),
            wrong_answers: stats.wrong_answers(),
        }
    }

    pub(crate) fn prompt(&self) -> String {
        format!(
            "Here are the results of a visual memory game. Reply with one short, \
             motivating sentence of feedback for the player. Score: {}, Level: {}, \
             Correct: {}, Wrong: {}.",
            self.score, self.level, self.correct_answers, self.wrong_answers
        )
    }
}

/// Source of the one-line comment shown on the game-over screen.
pub(crate) trait FlavorText: fmt::Debug + Send + Sync {
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Text generation through an Ollama-compatible `/api/generate` endpoint.
#[derive(Debug)]
pub(crate) struct OllamaFlavorText {
    client: reqwest::blocking::Client,
    url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaFlavorText {
    pub(crate) fn new(endpoint: &str, model: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: format!("{}/api/generate", endpoint.trim_end_matches('/')),
            model: model.into(),
        })
    }
}

impl FlavorText for OllamaFlavorText {
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        let response: GenerateResponse = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .with_context(|| format!("Request to {} failed", self.url))?
            .json()
            .with_context(|| format!("Unexpected response from {}", self.url))?;

        let text = response.response.trim();
        anyhow::ensure!(!text.is_empty(), "Empty response from {}", self.url);
        Ok(text.to_owned())
    }
}

/// A comment being generated on a worker thread.
///
/// The game never waits for it: the screen polls once per tick and shows the
/// text when it arrives. Any failure turns into [`FALLBACK_TEXT`].
#[derive(Debug)]
pub(crate) struct PendingFlavorText {
    receiver: Option<Receiver<String>>,
    text: Option<String>,
}

impl PendingFlavorText {
    /// Text that is available right away.
    pub(crate) fn ready(text: impl Into<String>) -> Self {
        Self {
            receiver: None,
            text: Some(text.into()),
        }
    }

    pub(crate) fn spawn(service: Arc<dyn FlavorText>, summary: GameSummary) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let text = match service.generate(&summary.prompt()) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("flavor text unavailable: {e:#}");
                    FALLBACK_TEXT.to_owned()
                }
            };
            // the receiver is gone if the player already left the screen
            let _ = sender.send(text);
        });
        Self {
            receiver: Some(receiver),
            text: None,
        }
    }

    /// Picks up the text if the worker has finished. Returns whether text is available.
    pub(crate) fn poll(&mut self) -> bool {
        if let Some(receiver) = &self.receiver {
            match receiver.try_recv() {
                Ok(text) => self.text = Some(text),
                Err(TryRecvError::Disconnected) => self.text = Some(FALLBACK_TEXT.to_owned()),
                Err(TryRecvError::Empty) => return false,
            }
            self.receiver = None;
        }
        self.text.is_some()
    }

    #[must_use]
    pub(crate) fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::{net::TcpListener, time::Instant};

    use super::*;

    #[derive(Debug)]
    struct Fixed(&'static str);

    impl FlavorText for Fixed {
        fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok(self.0.to_owned())
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl FlavorText for Failing {
        fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            anyhow::bail!("service down")
        }
    }

    #[derive(Debug)]
    struct Panicking;

    impl FlavorText for Panicking {
        fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            panic!("worker crashed")
        }
    }

    const SUMMARY: GameSummary = GameSummary {
        score: 137,
        level: 6,
        correct_answers: 21,
        wrong_answers: 4,
    };

    fn wait(pending: &mut PendingFlavorText) -> String {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !pending.poll() {
            assert!(Instant::now() < deadline, "worker did not report");
            thread::sleep(Duration::from_millis(5));
        }
        pending.text().unwrap().to_owned()
    }

    #[test]
    fn test_prompt_mentions_results() {
        let prompt = SUMMARY.prompt();
        for expected in ["Score: 137", "Level: 6", "Correct: 21", "Wrong: 4"] {
            assert!(prompt.contains(expected), "{prompt}");
        }
    }

    #[test]
    fn test_ready_text() {
        let mut pending = PendingFlavorText::ready(FALLBACK_TEXT);
        assert!(pending.poll());
        assert_eq!(pending.text(), Some(FALLBACK_TEXT));
    }

    #[test]
    fn test_service_text_arrives() {
        let mut pending = PendingFlavorText::spawn(Arc::new(Fixed("Sharp eyes!")), SUMMARY);
        assert_eq!(wait(&mut pending), "Sharp eyes!");
    }

    #[test]
    fn test_failure_falls_back() {
        let mut pending = PendingFlavorText::spawn(Arc::new(Failing), SUMMARY);
        assert_eq!(wait(&mut pending), FALLBACK_TEXT);
    }

    #[test]
    fn test_crashed_worker_falls_back() {
        let mut pending = PendingFlavorText::spawn(Arc::new(Panicking), SUMMARY);
        assert_eq!(wait(&mut pending), FALLBACK_TEXT);
    }

    #[test]
    fn test_unreachable_endpoint_is_an_error() {
        // a port that was just free and has nobody listening on it
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let endpoint = format!("http://127.0.0.1:{port}/");
        let service = OllamaFlavorText::new(&endpoint, "llama3").unwrap();
        assert_eq!(service.url, format!("http://127.0.0.1:{port}/api/generate"));

        let started = Instant::now();
        assert!(service.generate("hello").is_err());
        assert!(started.elapsed() < REQUEST_TIMEOUT);
    }
}
