//! Conversation client: the chat widget's state machine.
//!
//! A [`ConversationClient`] owns one session's conversation history, the
//! visible transcript and the single-flight send flag. `submit` performs all
//! optimistic transcript updates synchronously, then hands the relay round
//! trip to a spawned task whose continuation resolves the loader and returns
//! the client to idle on every path.
//!
//! Rendering and delivery are injected through [`view::TranscriptView`] and
//! [`transport::RelayTransport`], so several independent clients can coexist.

pub mod transcript;
pub mod transport;
pub mod view;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::FutureExt;
use tokio::task::JoinHandle;

use leadrelay_types::chat::{ChatReply, ChatRequest};
use leadrelay_types::config::ClientConfig;
use leadrelay_types::error::TransportError;
use leadrelay_types::llm::{Message, MessageRole};

use self::transcript::{Transcript, TranscriptEntry};
use self::transport::RelayTransport;
use self::view::TranscriptView;

/// Status shown when a send is attempted while one is already in flight.
pub const BUSY_STATUS: &str = "One sec\u{2014}finishing the last plan.";

/// Status shown while a request is in flight.
pub const SENDING_STATUS: &str = "Strategizing next steps\u{2026}";

/// Shown when the relay answered with an empty message.
pub const EMPTY_REPLY_FALLBACK: &str =
    "Thanks for the detail! Let me follow up with a tailored answer.";

/// Shown when the relay could not be reached or answered non-2xx.
pub const TRANSPORT_FAILURE_REPLY: &str =
    "Something went wrong. Give it another try in a moment or drop us a note.";

/// Whether a request is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending,
}

/// What `submit` did with a message.
#[derive(Debug)]
pub enum Submission {
    /// Blank after trimming; nothing happened.
    Ignored,
    /// A request was already in flight; the message was dropped.
    Busy,
    /// The message was shown and the relay request spawned.
    Dispatched(JoinHandle<()>),
}

impl Submission {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Submission::Dispatched(_))
    }

    /// Wait until a dispatched request has been resolved into the transcript.
    pub async fn settled(self) {
        if let Submission::Dispatched(handle) = self {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "chat relay task did not complete");
            }
        }
    }

    /// Like [`Submission::settled`], but gives up after `limit`.
    ///
    /// On expiry the relay task is aborted and `false` is returned. The
    /// client then stays in `Sending`, so only use this when tearing down.
    pub async fn settled_within(self, limit: Duration) -> bool {
        let Submission::Dispatched(mut handle) = self else {
            return true;
        };
        match tokio::time::timeout(limit, &mut handle).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "chat relay task did not complete");
                true
            }
            Err(_) => {
                tracing::warn!(limit_secs = limit.as_secs(), "abandoning pending chat reply");
                handle.abort();
                false
            }
        }
    }
}

/// Per-client behaviour taken from `[client]` configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    pub request_timeout: Option<Duration>,
    pub greeting: String,
    pub quick_prompts: Vec<String>,
}

impl From<&ClientConfig> for ClientSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            request_timeout: config.request_timeout_secs.map(Duration::from_secs),
            greeting: config.greeting.clone(),
            quick_prompts: config.quick_prompts.clone(),
        }
    }
}

struct ClientState {
    history: Vec<Message>,
    transcript: Transcript,
    send_state: SendState,
}

/// One chat widget session.
pub struct ConversationClient<T, V> {
    transport: T,
    view: V,
    settings: ClientSettings,
    state: Mutex<ClientState>,
}

impl<T: RelayTransport, V: TranscriptView> ConversationClient<T, V> {
    pub fn new(transport: T, view: V, settings: ClientSettings) -> Arc<Self> {
        Arc::new(Self {
            transport,
            view,
            settings,
            state: Mutex::new(ClientState {
                history: Vec::new(),
                transcript: Transcript::new(),
                send_state: SendState::Idle,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show the configured greeting. It is display-only and never replayed
    /// to the relay.
    pub fn greet(&self) {
        let greeting = self.settings.greeting.trim();
        if greeting.is_empty() {
            return;
        }
        let mut state = self.lock();
        self.append(&mut state, TranscriptEntry::text(MessageRole::Assistant, greeting));
    }

    /// Submit one user message.
    ///
    /// Must be called from within a tokio runtime when the message is
    /// accepted, since the relay round trip is spawned.
    pub fn submit(self: &Arc<Self>, text: &str) -> Submission {
        let message = text.trim();
        if message.is_empty() {
            return Submission::Ignored;
        }

        let mut state = self.lock();
        if state.send_state == SendState::Sending {
            tracing::debug!("submit rejected, request already in flight");
            self.set_status(&mut state, Some(BUSY_STATUS));
            return Submission::Busy;
        }

        self.append(&mut state, TranscriptEntry::text(MessageRole::User, message));
        state.send_state = SendState::Sending;
        self.set_status(&mut state, Some(SENDING_STATUS));

        let request = ChatRequest {
            message: message.to_string(),
            conversation: state.history.clone(),
        };
        let loader = self.append(&mut state, TranscriptEntry::loader());
        let pre_call_len = state.history.len();
        state.history.push(Message::user(message));
        drop(state);

        let client = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let outcome = client.exchange(request).await;
            client.resolve(loader, pre_call_len, outcome);
        });
        Submission::Dispatched(handle)
    }

    /// Submit the quick prompt at `index`. `None` if there is no such prompt.
    pub fn submit_quick_prompt(self: &Arc<Self>, index: usize) -> Option<Submission> {
        let prompt = self.settings.quick_prompts.get(index)?.clone();
        Some(self.submit(&prompt))
    }

    pub fn quick_prompts(&self) -> &[String] {
        &self.settings.quick_prompts
    }

    /// Snapshot of the remembered conversation.
    pub fn history(&self) -> Vec<Message> {
        self.lock().history.clone()
    }

    /// Snapshot of the visible transcript.
    pub fn transcript(&self) -> Transcript {
        self.lock().transcript.clone()
    }

    pub fn status(&self) -> Option<String> {
        self.lock().transcript.status().map(str::to_string)
    }

    pub fn send_state(&self) -> SendState {
        self.lock().send_state
    }

    pub fn is_sending(&self) -> bool {
        self.send_state() == SendState::Sending
    }

    /// Run the transport call. Panics and timeouts become transport errors.
    async fn exchange(&self, request: ChatRequest) -> Result<ChatReply, TransportError> {
        let call = AssertUnwindSafe(self.transport.send(request)).catch_unwind();
        let result = match self.settings.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => return Err(TransportError::Timeout(limit.as_secs())),
            },
            None => call.await,
        };
        result.unwrap_or_else(|panic| Err(TransportError::Aborted(panic_message(&*panic))))
    }

    /// Replace the loader with the outcome and go back to idle.
    fn resolve(
        &self,
        loader: usize,
        pre_call_len: usize,
        outcome: Result<ChatReply, TransportError>,
    ) {
        let mut state = self.lock();

        let text = match outcome {
            Ok(reply) => {
                let trimmed = reply.message.trim();
                let text = if trimmed.is_empty() {
                    EMPTY_REPLY_FALLBACK.to_string()
                } else {
                    trimmed.to_string()
                };
                state.history.push(Message::assistant(text.clone()));
                text
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat relay request failed");
                state.history.truncate(pre_call_len);
                TRANSPORT_FAILURE_REPLY.to_string()
            }
        };

        if let Some(entry) = state.transcript.resolve_loader(loader, text) {
            self.view.entry_replaced(loader, entry);
        }
        self.view.scroll_to_latest();

        self.set_status(&mut state, None);
        state.send_state = SendState::Idle;
    }

    fn append(&self, state: &mut ClientState, entry: TranscriptEntry) -> usize {
        let index = state.transcript.push(entry);
        self.view.entry_appended(index, &state.transcript.entries()[index]);
        self.view.scroll_to_latest();
        index
    }

    fn set_status(&self, state: &mut ClientState, status: Option<&str>) {
        state.transcript.set_status(status.map(str::to_string));
        self.view.status_changed(status);
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "transport panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::future::Future;

    use tokio::sync::oneshot;

    use super::transcript::EntryBody;
    use super::*;
    use crate::relay::PROVIDER_FAILURE_REPLY;

    type Held = oneshot::Receiver<Result<ChatReply, TransportError>>;

    enum Scripted {
        Reply(&'static str),
        Status(u16),
        Held(Held),
        Panic,
    }

    struct ScriptedTransport {
        script: Mutex<VecDeque<Scripted>>,
        requests: Arc<Mutex<Vec<ChatRequest>>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Scripted>) -> (Self, Arc<Mutex<Vec<ChatRequest>>>) {
            let requests = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    script: Mutex::new(script.into()),
                    requests: Arc::clone(&requests),
                },
                requests,
            )
        }
    }

    impl RelayTransport for ScriptedTransport {
        fn send(
            &self,
            request: ChatRequest,
        ) -> impl Future<Output = Result<ChatReply, TransportError>> + Send {
            self.requests.lock().unwrap().push(request);
            let next = self.script.lock().unwrap().pop_front();
            async move {
                match next {
                    Some(Scripted::Reply(text)) => Ok(ChatReply::new(text)),
                    Some(Scripted::Status(code)) => Err(TransportError::Status(code)),
                    Some(Scripted::Held(rx)) => rx
                        .await
                        .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".into()))),
                    Some(Scripted::Panic) => panic!("transport blew up"),
                    None => Err(TransportError::Network("nothing scripted".into())),
                }
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum ViewEvent {
        Appended(usize, TranscriptEntry),
        Replaced(usize, TranscriptEntry),
        Status(Option<String>),
        Scroll,
    }

    #[derive(Default)]
    struct RecordingView {
        events: Arc<Mutex<Vec<ViewEvent>>>,
    }

    impl TranscriptView for RecordingView {
        fn entry_appended(&self, index: usize, entry: &TranscriptEntry) {
            self.events
                .lock()
                .unwrap()
                .push(ViewEvent::Appended(index, entry.clone()));
        }

        fn entry_replaced(&self, index: usize, entry: &TranscriptEntry) {
            self.events
                .lock()
                .unwrap()
                .push(ViewEvent::Replaced(index, entry.clone()));
        }

        fn status_changed(&self, status: Option<&str>) {
            self.events
                .lock()
                .unwrap()
                .push(ViewEvent::Status(status.map(str::to_string)));
        }

        fn scroll_to_latest(&self) {
            self.events.lock().unwrap().push(ViewEvent::Scroll);
        }
    }

    fn settings() -> ClientSettings {
        ClientSettings {
            request_timeout: None,
            greeting: "Hey there! What should we transform first?".to_string(),
            quick_prompts: vec!["Book a demo".to_string()],
        }
    }

    type TestClient = Arc<ConversationClient<ScriptedTransport, RecordingView>>;

    fn client(
        script: Vec<Scripted>,
    ) -> (TestClient, Arc<Mutex<Vec<ChatRequest>>>, Arc<Mutex<Vec<ViewEvent>>>) {
        client_with(script, settings())
    }

    fn client_with(
        script: Vec<Scripted>,
        settings: ClientSettings,
    ) -> (TestClient, Arc<Mutex<Vec<ChatRequest>>>, Arc<Mutex<Vec<ViewEvent>>>) {
        let (transport, requests) = ScriptedTransport::new(script);
        let view = RecordingView::default();
        let events = Arc::clone(&view.events);
        (ConversationClient::new(transport, view, settings), requests, events)
    }

    fn texts(client: &TestClient) -> Vec<Option<String>> {
        client
            .transcript()
            .entries()
            .iter()
            .map(|e| e.as_text().map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn test_happy_path_sends_empty_conversation() {
        let (client, requests, _) = client(vec![Scripted::Reply("Great! What's your name?")]);

        let submission = client.submit("I run a dental clinic and need appointment reminders");
        assert!(submission.is_dispatched());
        submission.settled().await;

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].message,
            "I run a dental clinic and need appointment reminders"
        );
        assert!(requests[0].conversation.is_empty());

        assert_eq!(
            texts(&client),
            vec![
                Some("I run a dental clinic and need appointment reminders".to_string()),
                Some("Great! What's your name?".to_string()),
            ]
        );
        assert_eq!(
            client.history(),
            vec![
                Message::user("I run a dental clinic and need appointment reminders"),
                Message::assistant("Great! What's your name?"),
            ]
        );
        assert_eq!(client.send_state(), SendState::Idle);
        assert!(client.status().is_none());
    }

    #[tokio::test]
    async fn test_blank_messages_are_ignored() {
        let (client, requests, events) = client(vec![]);

        for blank in ["", "   ", "\n\t "] {
            assert!(matches!(client.submit(blank), Submission::Ignored));
        }

        assert!(client.transcript().is_empty());
        assert!(requests.lock().unwrap().is_empty());
        assert!(events.lock().unwrap().is_empty());
        assert!(!client.is_sending());
    }

    #[tokio::test]
    async fn test_message_is_trimmed_before_sending() {
        let (client, requests, _) = client(vec![Scripted::Reply("ok")]);
        client.submit("  hello  ").settled().await;
        assert_eq!(requests.lock().unwrap()[0].message, "hello");
        assert_eq!(client.history()[0], Message::user("hello"));
    }

    #[tokio::test]
    async fn test_second_submit_while_sending_is_dropped() {
        let (tx, rx) = oneshot::channel();
        let (client, requests, _) = client(vec![Scripted::Held(rx), Scripted::Reply("unused")]);

        let first = client.submit("A");
        assert!(first.is_dispatched());
        assert!(client.is_sending());

        assert!(matches!(client.submit("B"), Submission::Busy));
        assert_eq!(client.status().as_deref(), Some(BUSY_STATUS));

        let transcript = client.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.entries()[0].as_text(), Some("A"));
        assert!(transcript.entries()[1].is_loading());

        tx.send(Ok(ChatReply::new("Got it"))).unwrap();
        first.settled().await;

        assert_eq!(requests.lock().unwrap().len(), 1);
        assert_eq!(
            texts(&client),
            vec![Some("A".to_string()), Some("Got it".to_string())]
        );
        assert!(client.history().iter().all(|m| m.content != "B"));
        assert!(client.status().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_remembered() {
        let (client, requests, _) = client(vec![
            Scripted::Reply("Hello!"),
            Scripted::Status(502),
            Scripted::Reply("Back again"),
        ]);

        client.submit("first").settled().await;
        let before = client.history();
        assert_eq!(before.len(), 2);

        client.submit("second").settled().await;
        assert_eq!(client.history(), before);
        assert_eq!(
            client.transcript().entries()[3].as_text(),
            Some(TRANSPORT_FAILURE_REPLY)
        );
        assert_eq!(client.send_state(), SendState::Idle);

        let third = client.submit("third");
        assert!(third.is_dispatched());
        third.settled().await;

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].conversation, before);
    }

    #[tokio::test]
    async fn test_relay_apology_is_remembered() {
        let (client, _, _) = client(vec![Scripted::Reply(PROVIDER_FAILURE_REPLY)]);
        client.submit("hello").settled().await;

        assert_eq!(
            client.transcript().entries()[1].as_text(),
            Some(PROVIDER_FAILURE_REPLY)
        );
        assert_eq!(
            client.history(),
            vec![Message::user("hello"), Message::assistant(PROVIDER_FAILURE_REPLY)]
        );
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let (client, _, _) = client(vec![Scripted::Reply("   ")]);
        client.submit("hello").settled().await;
        assert_eq!(
            client.transcript().entries()[1].as_text(),
            Some(EMPTY_REPLY_FALLBACK)
        );
        assert_eq!(client.history()[1], Message::assistant(EMPTY_REPLY_FALLBACK));
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let (client, _, _) = client(vec![Scripted::Reply("\n  Sure thing.  \n")]);
        client.submit("hello").settled().await;
        assert_eq!(client.history()[1], Message::assistant("Sure thing."));
    }

    #[tokio::test]
    async fn test_each_request_carries_prior_history_only() {
        let (client, requests, _) = client(vec![
            Scripted::Reply("one"),
            Scripted::Reply("two"),
            Scripted::Reply("three"),
        ]);

        let mut snapshots = Vec::new();
        for msg in ["a", "b", "c"] {
            snapshots.push(client.history());
            client.submit(msg).settled().await;
        }

        let requests = requests.lock().unwrap();
        for (request, snapshot) in requests.iter().zip(&snapshots) {
            assert_eq!(&request.conversation, snapshot);
            assert!(!request.conversation.contains(&Message::user(request.message.clone())));
        }
        assert_eq!(client.history().len(), 6);
    }

    #[tokio::test]
    async fn test_panicking_transport_still_returns_to_idle() {
        let (client, _, _) = client(vec![Scripted::Panic, Scripted::Reply("fine")]);

        client.submit("hello").settled().await;
        assert_eq!(client.send_state(), SendState::Idle);
        assert_eq!(
            client.transcript().entries()[1].as_text(),
            Some(TRANSPORT_FAILURE_REPLY)
        );
        assert!(client.history().is_empty());

        assert!(client.submit("again").is_dispatched());
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_timeout_is_a_transport_failure() {
        let (_tx, rx) = oneshot::channel();
        let settings = ClientSettings {
            request_timeout: Some(Duration::from_secs(10)),
            ..settings()
        };
        let (client, _, _) = client_with(vec![Scripted::Held(rx)], settings);

        client.submit("hello").settled().await;
        assert_eq!(client.send_state(), SendState::Idle);
        assert_eq!(
            client.transcript().entries()[1].as_text(),
            Some(TRANSPORT_FAILURE_REPLY)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_within_gives_up_on_a_hung_relay() {
        let (_tx, rx) = oneshot::channel();
        let (client, _, _) = client(vec![Scripted::Held(rx)]);

        let pending = client.submit("hello");
        assert!(!pending.settled_within(Duration::from_secs(3)).await);
        assert!(client.is_sending());
        assert!(client.transcript().entries()[1].is_loading());
    }

    #[tokio::test]
    async fn test_settled_within_returns_once_resolved() {
        let (tx, rx) = oneshot::channel();
        let (client, _, _) = client(vec![Scripted::Held(rx)]);

        let pending = client.submit("hello");
        tx.send(Ok(ChatReply::new("Hi!"))).unwrap();
        assert!(pending.settled_within(Duration::from_secs(3)).await);
        assert_eq!(client.send_state(), SendState::Idle);

        assert!(Submission::Busy.settled_within(Duration::ZERO).await);
    }

    #[tokio::test]
    async fn test_view_sees_loader_replaced_in_place() {
        let (client, _, events) = client(vec![Scripted::Reply("Hi!")]);
        client.submit("hello").settled().await;

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                ViewEvent::Appended(0, TranscriptEntry::text(MessageRole::User, "hello")),
                ViewEvent::Scroll,
                ViewEvent::Status(Some(SENDING_STATUS.to_string())),
                ViewEvent::Appended(1, TranscriptEntry::loader()),
                ViewEvent::Scroll,
                ViewEvent::Replaced(
                    1,
                    TranscriptEntry {
                        speaker: MessageRole::Assistant,
                        body: EntryBody::Text("Hi!".to_string()),
                    }
                ),
                ViewEvent::Scroll,
                ViewEvent::Status(None),
            ]
        );
    }

    #[tokio::test]
    async fn test_quick_prompt_goes_through_submit() {
        let (tx, rx) = oneshot::channel();
        let (client, requests, _) = client(vec![Scripted::Held(rx)]);

        assert!(client.submit_quick_prompt(5).is_none());

        let first = client.submit_quick_prompt(0).unwrap();
        assert!(first.is_dispatched());
        assert!(matches!(client.submit_quick_prompt(0), Some(Submission::Busy)));

        tx.send(Ok(ChatReply::new("Sure"))).unwrap();
        first.settled().await;

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].message, "Book a demo");
    }

    #[tokio::test]
    async fn test_greeting_is_display_only() {
        let (client, requests, _) = client(vec![Scripted::Reply("Hello")]);
        client.greet();

        assert_eq!(client.transcript().len(), 1);
        assert!(client.history().is_empty());

        client.submit("hi").settled().await;
        assert!(requests.lock().unwrap()[0].conversation.is_empty());
        assert_eq!(client.history().len(), 2);
        assert_eq!(client.transcript().len(), 3);
    }
}
