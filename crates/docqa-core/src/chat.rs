//! Chat view state machine.
//!
//! Conversation lifecycle:
//! unselected → loading → loaded → unselected (new conversation, or the
//! open thread was deleted). Sending appends the user entry immediately;
//! the assistant entry (or a synthetic error entry) follows when the
//! request settles.

use std::collections::BTreeSet;

use docqa_types::{
    chat::{ChatMessage, Thread},
    event::AppEvent,
};

use crate::ports::ApiPort;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversation {
    Unselected,
    Loading { thread_id: String },
    Loaded { thread_id: String },
}

impl Conversation {
    pub fn thread_id(&self) -> Option<&str> {
        match self {
            Conversation::Unselected => None,
            Conversation::Loading { thread_id } | Conversation::Loaded { thread_id } => {
                Some(thread_id)
            }
        }
    }
}

/// A message ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub thread_id: String,
    pub text: String,
    /// First message of a thread the backend has not seen yet
    pub is_new_thread: bool,
}

/// Inline rename in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDraft {
    pub thread_id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ChatState {
    pub threads: Vec<Thread>,
    pub messages: Vec<ChatMessage>,
    pub conversation: Conversation,
    pub input: String,
    /// Awaiting an assistant reply
    pub sending: bool,
    pub selection_mode: bool,
    selected: BTreeSet<String>,
    pub rename: Option<RenameDraft>,
    /// Preview URL of the source citation being viewed
    pub viewing_source: Option<String>,
    pub threads_error: Option<String>,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            threads: Vec::new(),
            messages: Vec::new(),
            conversation: Conversation::Unselected,
            input: String::new(),
            sending: false,
            selection_mode: false,
            selected: BTreeSet::new(),
            rename: None,
            viewing_source: None,
            threads_error: None,
        }
    }

    pub fn current_thread(&self) -> Option<&str> {
        self.conversation.thread_id()
    }

    pub fn is_busy(&self) -> bool {
        self.sending || matches!(self.conversation, Conversation::Loading { .. })
    }

    /// Open a thread. Returns false when busy or already open.
    pub fn begin_load(&mut self, thread_id: &str) -> bool {
        if self.is_busy() || self.current_thread() == Some(thread_id) {
            return false;
        }
        self.conversation = Conversation::Loading { thread_id: thread_id.to_string() };
        self.messages.clear();
        self.viewing_source = None;
        true
    }

    pub fn start_new_conversation(&mut self) {
        self.conversation = Conversation::Unselected;
        self.messages.clear();
        self.rename = None;
        self.viewing_source = None;
    }

    /// Take the input box content and queue it for sending.
    pub fn begin_send(&mut self) -> Option<Outgoing> {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.is_busy() {
            return None;
        }

        let (thread_id, is_new_thread) = match self.current_thread() {
            Some(id) => (id.to_string(), false),
            None => (Thread::new_id(), true),
        };
        if is_new_thread {
            self.conversation = Conversation::Loaded { thread_id: thread_id.clone() };
        }

        self.messages.push(ChatMessage::user(text.clone()));
        self.input.clear();
        self.sending = true;
        Some(Outgoing { thread_id, text, is_new_thread })
    }

    pub fn begin_rename(&mut self, thread: &Thread) {
        self.rename = Some(RenameDraft {
            thread_id: thread.thread_id.clone(),
            name: thread.name.clone(),
        });
    }

    /// Finish the inline rename. A blank name keeps the editor open.
    pub fn commit_rename(&mut self) -> Option<RenameDraft> {
        let draft = self.rename.as_ref()?;
        let name = draft.name.trim();
        if name.is_empty() {
            return None;
        }
        let out = RenameDraft { thread_id: draft.thread_id.clone(), name: name.to_string() };
        self.rename = None;
        Some(out)
    }

    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    // ─── Selection mode ──────────────────────────────────────

    pub fn toggle_selection_mode(&mut self) {
        self.selection_mode = !self.selection_mode;
        if !self.selection_mode {
            self.selected.clear();
        }
    }

    pub fn toggle_selected(&mut self, thread_id: &str) {
        if !self.selected.remove(thread_id) {
            self.selected.insert(thread_id.to_string());
        }
    }

    pub fn is_selected(&self, thread_id: &str) -> bool {
        self.selected.contains(thread_id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Ids selected for batch deletion, in list order. None if nothing is selected.
    pub fn batch_delete_ids(&self) -> Option<Vec<String>> {
        if self.selected.is_empty() {
            return None;
        }
        let mut ids: Vec<String> = self
            .threads
            .iter()
            .filter(|t| self.selected.contains(&t.thread_id))
            .map(|t| t.thread_id.clone())
            .collect();
        // Selected ids no longer listed still go to the backend.
        for id in &self.selected {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        Some(ids)
    }

    pub fn view_source(&mut self, url: &str) {
        self.viewing_source = Some(source_preview_url(url));
    }

    fn remove_threads(&mut self, ids: &[String]) {
        self.threads.retain(|t| !ids.contains(&t.thread_id));
        for id in ids {
            self.selected.remove(id);
        }
        let open_deleted = self
            .current_thread()
            .map(|current| ids.iter().any(|id| id == current))
            .unwrap_or(false);
        if open_deleted {
            self.start_new_conversation();
        }
    }

    /// Apply the result of a background call.
    pub fn apply(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ThreadsLoaded { threads } => {
                self.threads = threads.clone();
                self.threads_error = None;
            }
            AppEvent::ThreadsFailed { message, .. } => {
                self.threads_error = Some(message.clone());
            }
            AppEvent::HistoryLoaded { thread_id, messages } => {
                if self.conversation == (Conversation::Loading { thread_id: thread_id.clone() }) {
                    self.messages = messages.clone();
                    self.conversation = Conversation::Loaded { thread_id: thread_id.clone() };
                }
            }
            AppEvent::HistoryFailed { thread_id, .. } => {
                if self.conversation == (Conversation::Loading { thread_id: thread_id.clone() }) {
                    self.messages = vec![ChatMessage::ai("Could not load this conversation.")];
                    self.conversation = Conversation::Loaded { thread_id: thread_id.clone() };
                }
            }
            AppEvent::ReplyReceived { thread_id, reply, created } => {
                self.sending = false;
                if self.current_thread() == Some(thread_id.as_str()) {
                    self.messages.push(reply.clone());
                }
                if let Some(thread) = created {
                    if !self.threads.iter().any(|t| t.thread_id == thread.thread_id) {
                        self.threads.insert(0, thread.clone());
                    }
                }
            }
            AppEvent::ReplyFailed { thread_id, message, .. } => {
                self.sending = false;
                if self.current_thread() == Some(thread_id.as_str()) {
                    self.messages.push(ChatMessage::ai(format!(
                        "Sorry, something went wrong: {}",
                        message
                    )));
                }
            }
            AppEvent::ThreadRenamed { thread_id, name } => {
                if let Some(t) = self.threads.iter_mut().find(|t| &t.thread_id == thread_id) {
                    t.name = name.clone();
                }
            }
            AppEvent::ThreadDeleted { thread_id } => {
                self.remove_threads(std::slice::from_ref(thread_id));
            }
            AppEvent::ThreadsDeleted { thread_ids } => {
                self.remove_threads(thread_ids);
                self.selected.clear();
                self.selection_mode = false;
            }
            _ => {}
        }
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite Google Drive share links to their embeddable preview form.
pub fn source_preview_url(url: &str) -> String {
    url.replace("/view?usp=sharing", "/preview")
        .replace("/view?usp=drive_link", "/preview")
        .replace("/edit?usp=drive_link&ouid=", "/preview?ouid=")
}

// ─── Background operations ───────────────────────────────────
//
// Each performs one backend call and reports the outcome as an event.

pub async fn load_threads(api: &dyn ApiPort) -> AppEvent {
    match api.list_threads().await {
        Ok(threads) => AppEvent::ThreadsLoaded { threads },
        Err(e) => AppEvent::ThreadsFailed {
            unauthorized: e.is_unauthorized(),
            message: e.to_string(),
        },
    }
}

pub async fn load_history(api: &dyn ApiPort, thread_id: String) -> AppEvent {
    match api.thread_history(&thread_id).await {
        Ok(history) => AppEvent::HistoryLoaded {
            thread_id,
            messages: history.messages.into_iter().map(ChatMessage::from).collect(),
        },
        Err(e) => AppEvent::HistoryFailed {
            thread_id,
            unauthorized: e.is_unauthorized(),
            message: e.to_string(),
        },
    }
}

pub async fn send_message(api: &dyn ApiPort, outgoing: Outgoing) -> AppEvent {
    match api.post_chat_message(&outgoing.thread_id, &outgoing.text).await {
        Ok(reply) => AppEvent::ReplyReceived {
            created: outgoing
                .is_new_thread
                .then(|| Thread::started_with(outgoing.thread_id.clone(), &outgoing.text)),
            thread_id: outgoing.thread_id,
            reply: reply.into(),
        },
        Err(e) => AppEvent::ReplyFailed {
            thread_id: outgoing.thread_id,
            unauthorized: e.is_unauthorized(),
            message: e.to_string(),
        },
    }
}

pub async fn rename_thread(api: &dyn ApiPort, draft: RenameDraft) -> AppEvent {
    match api.rename_thread(&draft.thread_id, &draft.name).await {
        Ok(()) => AppEvent::ThreadRenamed { thread_id: draft.thread_id, name: draft.name },
        Err(e) => AppEvent::ThreadActionFailed {
            message: format!("Could not rename the conversation: {}", e),
        },
    }
}

pub async fn delete_thread(api: &dyn ApiPort, thread_id: String) -> AppEvent {
    match api.delete_thread(&thread_id).await {
        Ok(()) => AppEvent::ThreadDeleted { thread_id },
        Err(e) => AppEvent::ThreadActionFailed {
            message: format!("Could not delete the conversation: {}", e),
        },
    }
}

pub async fn delete_threads(api: &dyn ApiPort, thread_ids: Vec<String>) -> AppEvent {
    match api.delete_threads(&thread_ids).await {
        Ok(()) => AppEvent::ThreadsDeleted { thread_ids },
        Err(e) => AppEvent::ThreadActionFailed {
            message: format!("Could not delete the selected conversations: {}", e),
        },
    }
}
