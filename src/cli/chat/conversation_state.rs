use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use super::catalog::ResponseCatalog;
use super::intent::classify;
use super::message::{Author, Message};
use crate::config::TypingDelay;

const EVENT_CAPACITY: usize = 64;

/// State change a front end can react to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    MessageAppended(Message),
    PendingChanged(bool),
}

/// What [`ConversationSession::submit`] did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// A user message was appended and a reply is on its way.
    Accepted,
    /// Input was empty after trimming; nothing changed.
    Blank,
    /// A reply is still pending; nothing changed.
    Busy,
}

struct SessionState {
    messages: Vec<Message>,
    pending: bool,
    next_id: u64,
}

impl SessionState {
    fn append(&mut self, author: Author, body: &str) -> Message {
        let message = Message::new(self.next_id, author, body);
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }
}

/// Append-only log of one chat plus the "awaiting reply" flag.
///
/// Each front end owns its own session. Replies are produced by a tokio
/// task that only holds a weak handle to the state; dropping the session
/// aborts that task and any late wake-up finds nothing to mutate.
pub struct ConversationSession {
    state: Arc<Mutex<SessionState>>,
    events: broadcast::Sender<SessionEvent>,
    catalog: ResponseCatalog,
    typing_delay: TypingDelay,
    reply_task: Option<JoinHandle<()>>,
}

impl ConversationSession {
    pub fn new(typing_delay: TypingDelay) -> Self {
        let catalog = ResponseCatalog::new();
        let mut state = SessionState {
            messages: Vec::new(),
            pending: false,
            next_id: 1,
        };
        state.append(Author::Assistant, catalog.welcome());

        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            state: Arc::new(Mutex::new(state)),
            events,
            catalog,
            typing_delay,
            reply_task: None,
        }
    }

    /// Receive every event emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the transcript so far.
    pub fn messages(&self) -> Vec<Message> {
        lock(&self.state).messages.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).messages.len()
    }

    /// Never true in practice: every session opens with the welcome message.
    pub fn is_empty(&self) -> bool {
        lock(&self.state).messages.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.state).pending
    }

    /// Send a user message and schedule Nova's reply.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, text: &str) -> Submission {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank submission");
            return Submission::Blank;
        }

        let user_message = {
            let mut state = lock(&self.state);
            if state.pending {
                debug!("Ignoring submission while a reply is pending");
                return Submission::Busy;
            }
            let message = state.append(Author::User, text);
            state.pending = true;
            message
        };
        let _ = self.events.send(SessionEvent::MessageAppended(user_message));
        let _ = self.events.send(SessionEvent::PendingChanged(true));

        let delay = self.typing_delay.sample();
        debug!("Scheduling reply in {:?}", delay);

        let state = Arc::downgrade(&self.state);
        let events = self.events.clone();
        let catalog = self.catalog;
        let text = text.to_string();

        self.reply_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            deliver_reply(state, events, catalog, &text);
        }));

        Submission::Accepted
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        if let Some(task) = self.reply_task.take() {
            task.abort();
        }
    }
}

fn deliver_reply(
    state: Weak<Mutex<SessionState>>,
    events: broadcast::Sender<SessionEvent>,
    catalog: ResponseCatalog,
    text: &str,
) {
    let Some(state) = state.upgrade() else {
        debug!("Session closed before the reply was ready, discarding it");
        return;
    };

    let intent = classify(text);
    debug!("Resolved intent: {}", intent);

    let reply = {
        let mut state = lock(&state);
        let message = state.append(Author::Assistant, catalog.get(intent));
        state.pending = false;
        message
    };
    let _ = events.send(SessionEvent::MessageAppended(reply));
    let _ = events.send(SessionEvent::PendingChanged(false));
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
