//! The slice of the editor the command handlers talk to.
//!
//! Handlers never touch Zed directly; they prompt, notify, and open
//! documents through [`Host`]. The Zed adapter lives in `slash`.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// One line of free text
    Line,
    /// A multi-line block, e.g. a unified diff
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub message: &'static str,
    pub kind: PromptKind,
}

impl Prompt {
    pub const fn line(message: &'static str) -> Self {
        Self {
            message,
            kind: PromptKind::Line,
        }
    }

    pub const fn block(message: &'static str) -> Self {
        Self {
            message,
            kind: PromptKind::Block,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Hint for how a document's content should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Markdown,
    Json,
}

impl ContentType {
    pub fn language_id(self) -> &'static str {
        match self {
            ContentType::Markdown => "markdown",
            ContentType::Json => "json",
        }
    }
}

/// A new read-only document opened in the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
}

pub trait Host {
    /// Asks the user for input. `None` means the prompt was cancelled.
    fn prompt(&mut self, prompt: &Prompt) -> Option<String>;

    /// Filesystem path of the document the user is looking at
    fn active_document(&self) -> Option<PathBuf>;

    fn notify(&mut self, notification: Notification);

    fn open_document(&mut self, document: Document);
}

/// Read access to the files of the current worktree
pub trait WorkspaceFiles {
    fn root_path(&self) -> Option<String>;

    /// `path` is relative to the worktree root
    fn read_text_file(&self, path: &str) -> Result<String, String>;
}

impl WorkspaceFiles for zed_extension_api::Worktree {
    fn root_path(&self) -> Option<String> {
        Some(zed_extension_api::Worktree::root_path(self))
    }

    fn read_text_file(&self, path: &str) -> Result<String, String> {
        zed_extension_api::Worktree::read_text_file(self, path)
    }
}
