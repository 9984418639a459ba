//! Command handlers: prompt, one POST, render.

use serde_json::Value;

use crate::error::ActionError;
use crate::host::{ContentType, Document, Host, Notification, Prompt};
use crate::registry::CommandId;
use crate::transport::{Endpoint, Transport};

/// Characters of an analysis shown in the preview notification
pub const PREVIEW_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Empty or cancelled input; nothing was sent
    Cancelled,
    Completed,
    /// The message that was shown to the user
    Failed(String),
}

pub trait Action: Send + Sync {
    fn id(&self) -> CommandId;

    /// Leads the error notification when the service call fails
    fn failure_prefix(&self) -> &'static str;

    fn execute(&self, host: &mut dyn Host, transport: &dyn Transport) -> Result<Outcome, ActionError>;
}

/// Runs `action` and turns any error into a single error notification.
pub fn run(action: &dyn Action, host: &mut dyn Host, transport: &dyn Transport) -> Outcome {
    match action.execute(host, transport) {
        Ok(outcome) => outcome,
        Err(err) => {
            let message = match &err {
                ActionError::NoActiveDocument => err.to_string(),
                ActionError::Transport(cause) => format!("{}: {}", action.failure_prefix(), cause),
            };
            log::error!("{} failed: {}", action.id(), message);
            host.notify(Notification::error(message.clone()));
            Outcome::Failed(message)
        }
    }
}

pub fn builtin_actions() -> Vec<Box<dyn Action>> {
    vec![
        Box::new(Chat),
        Box::new(AnalyzeFile),
        Box::new(ApplyPatch),
        Box::new(RunCommand),
    ]
}

fn ask(host: &mut dyn Host, prompt: &Prompt) -> Option<String> {
    host.prompt(prompt).filter(|input| !input.is_empty())
}

/// `field` when it is a string, otherwise the whole reply as compact JSON
fn field_or_body(reply: &Value, field: &str) -> String {
    match reply.get(field).and_then(Value::as_str) {
        Some(text) => text.to_string(),
        None => reply.to_string(),
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

pub struct Chat;

impl Action for Chat {
    fn id(&self) -> CommandId {
        CommandId::Chat
    }

    fn failure_prefix(&self) -> &'static str {
        "Error calling AI"
    }

    fn execute(&self, host: &mut dyn Host, transport: &dyn Transport) -> Result<Outcome, ActionError> {
        let Some(text) = ask(host, &Prompt::line("Ask the AI (chat):")) else {
            return Ok(Outcome::Cancelled);
        };

        let reply = transport.post(Endpoint::Chat, &Endpoint::Chat.payload(text))?;
        host.notify(Notification::info(format!("AI: {}", field_or_body(&reply, "response"))));
        Ok(Outcome::Completed)
    }
}

pub struct AnalyzeFile;

impl Action for AnalyzeFile {
    fn id(&self) -> CommandId {
        CommandId::AnalyzeFile
    }

    fn failure_prefix(&self) -> &'static str {
        "Error analyzing file"
    }

    fn execute(&self, host: &mut dyn Host, transport: &dyn Transport) -> Result<Outcome, ActionError> {
        let path = host.active_document().ok_or(ActionError::NoActiveDocument)?;
        let path = path.to_string_lossy().into_owned();

        let reply = transport.post(Endpoint::AnalyzeFile, &Endpoint::AnalyzeFile.payload(path.as_str()))?;
        let analysis = match reply.get("analysis").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => reply.to_string(),
        };

        host.notify(Notification::info(format!(
            "Analysis produced (first {} chars): {}",
            PREVIEW_CHARS,
            preview(&analysis)
        )));
        host.open_document(Document {
            title: format!("Analysis of {}", path),
            content: analysis,
            content_type: ContentType::Markdown,
        });
        Ok(Outcome::Completed)
    }
}

/// Forwards a unified diff untouched; whether it applied is for the
/// service to say.
pub struct ApplyPatch;

impl Action for ApplyPatch {
    fn id(&self) -> CommandId {
        CommandId::ApplyPatch
    }

    fn failure_prefix(&self) -> &'static str {
        "Error applying patch"
    }

    fn execute(&self, host: &mut dyn Host, transport: &dyn Transport) -> Result<Outcome, ActionError> {
        let Some(patch) = ask(host, &Prompt::block("Paste unified diff patch to apply:")) else {
            return Ok(Outcome::Cancelled);
        };

        let reply = transport.post(Endpoint::ApplyPatch, &Endpoint::ApplyPatch.payload(patch))?;
        host.notify(Notification::info(format!("Apply patch result: {}", reply)));
        Ok(Outcome::Completed)
    }
}

/// Pass-through to the service's `/run_command`. No local confirmation or
/// allow-list.
pub struct RunCommand;

impl Action for RunCommand {
    fn id(&self) -> CommandId {
        CommandId::RunCommand
    }

    fn failure_prefix(&self) -> &'static str {
        "Error running command"
    }

    fn execute(&self, host: &mut dyn Host, transport: &dyn Transport) -> Result<Outcome, ActionError> {
        let Some(command) = ask(host, &Prompt::line("Shell command to run (cwd: workspace root):")) else {
            return Ok(Outcome::Cancelled);
        };

        let reply = transport.post(Endpoint::RunCommand, &Endpoint::RunCommand.payload(command.as_str()))?;
        let content = serde_json::to_string_pretty(&reply).unwrap_or_else(|_| reply.to_string());

        host.open_document(Document {
            title: format!("$ {}", command),
            content,
            content_type: ContentType::Json,
        });
        Ok(Outcome::Completed)
    }
}
