pub mod actions;
pub mod config;
pub mod error;
pub mod host;
pub mod logger;
pub mod registry;
pub mod slash;
pub mod transport;

use zed_extension_api::{self as zed, Result, SlashCommand, SlashCommandOutput};

use crate::config::ServiceConfig;
use crate::host::WorkspaceFiles;
use crate::registry::Activation;
use crate::slash::SlashCommandHost;
use crate::transport::HttpTransport;

struct LocalAiExtension {
    activation: Activation,
}

impl LocalAiExtension {
    fn new() -> Self {
        if let Err(err) = logger::setup_logger() {
            eprintln!("Local AI logger not installed: {}", err);
        }

        Self {
            activation: Activation::activate(),
        }
    }
}

impl zed::Extension for LocalAiExtension {
    fn new() -> Self {
        Self::new()
    }

    fn run_slash_command(
        &self,
        command: SlashCommand,
        args: Vec<String>,
        worktree: Option<&zed::Worktree>,
    ) -> Result<SlashCommandOutput> {
        let files = worktree.map(|w| w as &dyn WorkspaceFiles);
        let config = files.map(ServiceConfig::load).unwrap_or_default();
        let transport = HttpTransport::new(config);

        let mut host = SlashCommandHost::new(args, files);
        self.activation
            .registry()
            .dispatch(&command.name, &mut host, &transport)
            .map_err(|e| e.to_string())?;

        Ok(host.into_output())
    }
}

impl Drop for LocalAiExtension {
    fn drop(&mut self) {
        self.activation.deactivate();
    }
}

zed::register_extension!(LocalAiExtension);
