//! Chat session controller.
//!
//! Drives one conversation's message list through the send lifecycle:
//! Idle -> Sending -> Resolved | Failed. The transcript is append-only; the
//! assistant placeholder appended at submit time is the only message whose
//! text mutates, exactly once, when the request settles.

use async_trait::async_trait;

use crate::api::{ApiClient, ApiError};
use crate::core::message::{ChatMessage, Role};

/// Placeholder text while a request is outstanding.
pub const THINKING_PLACEHOLDER: &str = "Thinking…";

/// Instructive placeholder when no backend is configured.
pub const DISABLED_PLACEHOLDER: &str = "Set CONTEXTIQ_BASE_URL to enable backend";

/// Shown when the backend answers with an empty reply.
pub const NO_RESPONSE_FALLBACK: &str = "No response";

/// The seam between the session controller and the network layer, so tests
/// can drive the state machine against mock backends.
#[async_trait]
pub trait ChatBackend {
    fn is_disabled(&self) -> bool;
    async fn chat(&self, text: &str) -> Result<String, ApiError>;
}

#[async_trait]
impl ChatBackend for ApiClient {
    fn is_disabled(&self) -> bool {
        ApiClient::is_disabled(self)
    }

    async fn chat(&self, text: &str) -> Result<String, ApiError> {
        ApiClient::chat(self, text).await
    }
}

/// Handle for a send that has been admitted and is awaiting its reply.
#[derive(Debug)]
pub struct PendingSend {
    placeholder_id: u64,
    pub prompt: String,
}

/// What happened to one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty input or a send already in flight; nothing changed.
    Ignored,
    /// No backend configured; the instructive placeholder is final text.
    Disabled,
    /// The reply landed in the placeholder.
    Resolved,
    /// The error text landed in the placeholder.
    Failed,
}

pub struct ChatSession<B> {
    backend: B,
    messages: Vec<ChatMessage>,
    next_id: u64,
    in_flight: bool,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            messages: Vec::new(),
            next_id: 0,
            in_flight: false,
        }
    }

    /// Seed the transcript, e.g. with a greeting, before any sends.
    pub fn push_system(&mut self, text: impl Into<String>) {
        let id = self.allocate_id();
        self.messages.push(ChatMessage::new(id, Role::System, text));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight
    }

    pub fn last_assistant_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.is_assistant())
            .map(|message| message.text.as_str())
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Admit a submission, or reject it.
    ///
    /// On admission the user message and the assistant placeholder are both
    /// appended immediately; the placeholder's position is fixed from here
    /// on. At most one send may be in flight, so a second call before
    /// [`finish_send`](Self::finish_send) returns `None` and leaves the
    /// transcript untouched. A disabled backend short-circuits to a terminal
    /// state with the instructive text as final.
    pub fn begin_send(&mut self, input: &str) -> Option<PendingSend> {
        let prompt = input.trim();
        if prompt.is_empty() || self.in_flight {
            return None;
        }

        let user_id = self.allocate_id();
        self.messages
            .push(ChatMessage::new(user_id, Role::User, prompt));

        let disabled = self.backend.is_disabled();
        let placeholder_text = if disabled {
            DISABLED_PLACEHOLDER
        } else {
            THINKING_PLACEHOLDER
        };
        let placeholder_id = self.allocate_id();
        self.messages
            .push(ChatMessage::new(placeholder_id, Role::Assistant, placeholder_text));

        if disabled {
            return None;
        }

        self.in_flight = true;
        Some(PendingSend {
            placeholder_id,
            prompt: prompt.to_string(),
        })
    }

    /// Apply a settled request to its placeholder and re-enable submission.
    ///
    /// Applied unconditionally: there is no cancellation primitive, so a
    /// request always runs to completion and its result always lands.
    pub fn finish_send(
        &mut self,
        pending: PendingSend,
        result: Result<String, ApiError>,
    ) -> SendOutcome {
        let (text, outcome) = match result {
            Ok(reply) if reply.is_empty() => (NO_RESPONSE_FALLBACK.to_string(), SendOutcome::Resolved),
            Ok(reply) => (reply, SendOutcome::Resolved),
            Err(err) => (format!("Error: {}", err.message()), SendOutcome::Failed),
        };

        if let Some(placeholder) = self
            .messages
            .iter_mut()
            .find(|message| message.id == pending.placeholder_id)
        {
            placeholder.text = text;
        }
        self.in_flight = false;
        outcome
    }

    /// Full send cycle: admit, call the backend, settle the placeholder.
    pub async fn submit(&mut self, input: &str) -> SendOutcome {
        let Some(pending) = self.begin_send(input) else {
            // Distinguish "ignored" from the disabled terminal state so the
            // caller can render something either way.
            if self.backend.is_disabled() && !input.trim().is_empty() && !self.in_flight {
                return SendOutcome::Disabled;
            }
            return SendOutcome::Ignored;
        };

        let result = self.backend.chat(&pending.prompt).await;
        self.finish_send(pending, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Backend;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockBackend {
        disabled: bool,
        reply: Result<String, String>,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn replying(reply: &str) -> Self {
            Self {
                disabled: false,
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                disabled: false,
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn disabled() -> Self {
            Self {
                disabled: true,
                reply: Ok(String::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatBackend for MockBackend {
        fn is_disabled(&self) -> bool {
            self.disabled
        }

        async fn chat(&self, _text: &str) -> Result<String, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(message) => Err(ApiError::Http {
                    status: 500,
                    message: message.clone(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn happy_path_resolves_placeholder_with_reply() {
        let mut session = ChatSession::new(MockBackend::replying("Hello"));

        let outcome = session.submit("Hi").await;
        assert_eq!(outcome, SendOutcome::Resolved);

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_user());
        assert_eq!(messages[0].text, "Hi");
        assert!(messages[1].is_assistant());
        assert_eq!(messages[1].text, "Hello");
        assert!(!session.is_sending());
    }

    #[tokio::test]
    async fn empty_reply_falls_back_to_no_response() {
        let mut session = ChatSession::new(MockBackend::replying(""));
        session.submit("Hi").await;
        assert_eq!(session.last_assistant_text(), Some(NO_RESPONSE_FALLBACK));
    }

    #[tokio::test]
    async fn failure_lands_error_text_in_placeholder() {
        let mut session = ChatSession::new(MockBackend::failing("boom"));

        let outcome = session.submit("Hi").await;
        assert_eq!(outcome, SendOutcome::Failed);
        assert_eq!(session.last_assistant_text(), Some("Error: boom"));
        assert!(!session.is_sending());
    }

    #[tokio::test]
    async fn disabled_backend_never_calls_the_network() {
        let backend = MockBackend::disabled();
        let mut session = ChatSession::new(backend);

        let outcome = session.submit("anything").await;
        assert_eq!(outcome, SendOutcome::Disabled);

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, DISABLED_PLACEHOLDER);
        assert!(!session.is_sending());
        assert_eq!(session.backend.call_count(), 0);

        // Terminal state: a later submission is admitted again.
        session.submit("follow-up").await;
        assert_eq!(session.messages().len(), 4);
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let mut session = ChatSession::new(MockBackend::replying("Hello"));
        assert_eq!(session.submit("   ").await, SendOutcome::Ignored);
        assert!(session.messages().is_empty());
        assert_eq!(session.backend.call_count(), 0);
    }

    #[test]
    fn second_send_while_in_flight_is_a_no_op() {
        let mut session = ChatSession::new(MockBackend::replying("Hello"));

        let pending = session.begin_send("first").expect("first send admitted");
        let len_while_pending = session.messages().len();
        assert!(session.is_sending());

        // The in-flight flag suppresses a second submission entirely.
        assert!(session.begin_send("second").is_none());
        assert_eq!(session.messages().len(), len_while_pending);

        session.finish_send(pending, Ok("done".to_string()));
        assert!(!session.is_sending());
        assert_eq!(session.last_assistant_text(), Some("done"));

        // After resolution, sends are admitted again.
        assert!(session.begin_send("third").is_some());
    }

    #[test]
    fn placeholder_position_is_fixed_at_append_time() {
        let mut session = ChatSession::new(MockBackend::replying("unused"));

        let first = session.begin_send("one").expect("admitted");
        session.finish_send(first, Ok("first reply".to_string()));
        let second = session.begin_send("two").expect("admitted");
        session.finish_send(second, Ok("second reply".to_string()));

        let texts: Vec<&str> = session
            .messages()
            .iter()
            .map(|message| message.text.as_str())
            .collect();
        assert_eq!(texts, ["one", "first reply", "two", "second reply"]);
    }

    #[test]
    fn session_over_real_client_in_disabled_mode_compiles_the_seam() {
        // The ApiClient itself satisfies the backend trait.
        let client = ApiClient::new(Backend::Disabled);
        let session = ChatSession::new(client);
        assert!(session.messages().is_empty());
    }
}
