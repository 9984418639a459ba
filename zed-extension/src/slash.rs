//! [`Host`] for Zed slash commands.
//!
//! A slash command has no modal prompt and no notification area: the
//! arguments typed after the command answer the prompt, and everything the
//! handler shows becomes a labelled section of the command output.

use std::path::{Path, PathBuf};

use zed_extension_api::{self as zed, SlashCommandOutput, SlashCommandOutputSection};

use crate::host::{ContentType, Document, Host, Notification, NotificationLevel, Prompt, PromptKind, WorkspaceFiles};

pub struct SlashCommandHost<'a> {
    args: Vec<String>,
    files: Option<&'a dyn WorkspaceFiles>,
    sections: Vec<(String, String)>,
}

impl<'a> SlashCommandHost<'a> {
    pub fn new(args: Vec<String>, files: Option<&'a dyn WorkspaceFiles>) -> Self {
        Self {
            args,
            files,
            sections: Vec::new(),
        }
    }

    /// Block prompts accept a worktree file in place of inline text, since
    /// Zed splits arguments on whitespace and loses the newlines of a diff.
    fn read_block_from_file(&self) -> Option<String> {
        let [path] = self.args.as_slice() else {
            return None;
        };
        let files = self.files?;
        match files.read_text_file(path) {
            Ok(content) => {
                log::debug!("read prompt input from {}", path);
                Some(content)
            }
            Err(_) => None,
        }
    }

    pub fn into_output(self) -> SlashCommandOutput {
        let mut text = String::new();
        let mut sections = Vec::with_capacity(self.sections.len());

        for (label, body) in self.sections {
            if !text.is_empty() {
                text.push('\n');
            }
            let start = text.len();
            text.push_str(&body);
            let end = text.len();
            text.push('\n');

            sections.push(SlashCommandOutputSection {
                range: zed::Range {
                    start: start as u32,
                    end: end as u32,
                },
                label,
            });
        }

        SlashCommandOutput { text, sections }
    }
}

impl Host for SlashCommandHost<'_> {
    fn prompt(&mut self, prompt: &Prompt) -> Option<String> {
        log::debug!("{} ({} args)", prompt.message, self.args.len());
        if prompt.kind == PromptKind::Block {
            if let Some(content) = self.read_block_from_file() {
                return Some(content);
            }
        }

        let answer = self.args.join(" ");
        if answer.is_empty() {
            None
        } else {
            Some(answer)
        }
    }

    fn active_document(&self) -> Option<PathBuf> {
        let first = self.args.first()?;
        let path = Path::new(first);
        if path.is_absolute() {
            return Some(path.to_path_buf());
        }
        match self.files.and_then(|files| files.root_path()) {
            Some(root) => Some(Path::new(&root).join(path)),
            None => Some(path.to_path_buf()),
        }
    }

    fn notify(&mut self, notification: Notification) {
        let label = match notification.level {
            NotificationLevel::Info => "Local AI",
            NotificationLevel::Error => "Local AI error",
        };
        self.sections.push((label.to_string(), notification.message));
    }

    fn open_document(&mut self, document: Document) {
        let body = match document.content_type {
            ContentType::Markdown => document.content,
            ContentType::Json => format!(
                "```{}\n{}\n```",
                document.content_type.language_id(),
                document.content
            ),
        };
        self.sections.push((document.title, body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Files {
        root: &'static str,
        files: HashMap<&'static str, &'static str>,
    }

    impl WorkspaceFiles for Files {
        fn root_path(&self) -> Option<String> {
            Some(self.root.to_string())
        }

        fn read_text_file(&self, path: &str) -> Result<String, String> {
            self.files
                .get(path)
                .map(|s| s.to_string())
                .ok_or_else(|| "not found".to_string())
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_line_prompt_joins_arguments() {
        let mut host = SlashCommandHost::new(args(&["cargo", "test", "--all"]), None);
        assert_eq!(
            host.prompt(&Prompt::line("cmd")),
            Some("cargo test --all".to_string())
        );

        let mut empty = SlashCommandHost::new(Vec::new(), None);
        assert_eq!(empty.prompt(&Prompt::line("cmd")), None);
    }

    #[test]
    fn test_block_prompt_reads_worktree_file() {
        let diff = "--- a/x\n+++ b/x\n@@ -1 +1 @@\n-a\n+b\n";
        let files = Files {
            root: "/work",
            files: HashMap::from([("fix.patch", diff)]),
        };

        let mut host = SlashCommandHost::new(args(&["fix.patch"]), Some(&files));
        assert_eq!(host.prompt(&Prompt::block("patch")), Some(diff.to_string()));

        // Line prompts never read files.
        assert_eq!(host.prompt(&Prompt::line("chat")), Some("fix.patch".to_string()));

        let mut inline = SlashCommandHost::new(args(&["missing.patch"]), Some(&files));
        assert_eq!(inline.prompt(&Prompt::block("patch")), Some("missing.patch".to_string()));
    }

    #[test]
    fn test_active_document_resolves_against_root() {
        let files = Files {
            root: "/work",
            files: HashMap::new(),
        };

        let host = SlashCommandHost::new(args(&["src/lib.rs"]), Some(&files));
        assert_eq!(host.active_document(), Some(PathBuf::from("/work/src/lib.rs")));

        let host = SlashCommandHost::new(args(&["/etc/hosts"]), Some(&files));
        assert_eq!(host.active_document(), Some(PathBuf::from("/etc/hosts")));

        let host = SlashCommandHost::new(Vec::new(), Some(&files));
        assert_eq!(host.active_document(), None);
    }

    #[test]
    fn test_output_sections_cover_rendered_text() {
        let mut host = SlashCommandHost::new(Vec::new(), None);
        host.notify(Notification::info("AI: hello"));
        host.open_document(Document {
            title: "$ ls".to_string(),
            content: "{\n  \"code\": 0\n}".to_string(),
            content_type: ContentType::Json,
        });
        host.notify(Notification::error("Error running command: boom"));

        let output = host.into_output();
        let labels: Vec<_> = output.sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Local AI", "$ ls", "Local AI error"]);

        let slices: Vec<_> = output
            .sections
            .iter()
            .map(|s| &output.text[s.range.start as usize..s.range.end as usize])
            .collect();
        assert_eq!(
            slices,
            vec![
                "AI: hello",
                "```json\n{\n  \"code\": 0\n}\n```",
                "Error running command: boom",
            ]
        );
    }

    #[test]
    fn test_empty_output_when_nothing_rendered() {
        let output = SlashCommandHost::new(Vec::new(), None).into_output();
        assert!(output.text.is_empty());
        assert!(output.sections.is_empty());
    }
}
