use crate::admin::{Dashboard, DocumentPage};
use crate::chat::{ChatMessage, Thread};

/// Results of background API calls.
/// Async tasks emit these; the UI drains and applies them each frame.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    LoginSucceeded { token: String },
    LoginFailed { message: String },

    RegisterSucceeded { username: String },
    RegisterFailed { message: String },

    ThreadsLoaded { threads: Vec<Thread> },
    ThreadsFailed { message: String, unauthorized: bool },

    HistoryLoaded { thread_id: String, messages: Vec<ChatMessage> },
    HistoryFailed { thread_id: String, message: String, unauthorized: bool },

    /// Assistant answered; `created` is set when this opened a new thread
    ReplyReceived { thread_id: String, reply: ChatMessage, created: Option<Thread> },
    ReplyFailed { thread_id: String, message: String, unauthorized: bool },

    ThreadRenamed { thread_id: String, name: String },
    ThreadDeleted { thread_id: String },
    ThreadsDeleted { thread_ids: Vec<String> },
    ThreadActionFailed { message: String },

    DashboardLoaded { dashboard: Box<Dashboard> },
    DashboardFailed { message: String },

    UploadSucceeded { collection: String },
    UploadFailed { message: String },

    CollectionDeleted { name: String },
    CollectionDeleteFailed { name: String, message: String },

    DocumentsLoaded { collection: String, page: DocumentPage },
    DocumentsFailed { collection: String, message: String },
}
