use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::actions::{self, Action, Outcome};
use crate::error::RegistryError;
use crate::host::Host;
use crate::transport::Transport;

/// Identifier a command is registered and invoked under.
///
/// The string form is the slash command name declared in `extension.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandId {
    Chat,
    AnalyzeFile,
    ApplyPatch,
    RunCommand,
}

impl CommandId {
    pub const ALL: [CommandId; 4] = [
        CommandId::Chat,
        CommandId::AnalyzeFile,
        CommandId::ApplyPatch,
        CommandId::RunCommand,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommandId::Chat => "ai-chat",
            CommandId::AnalyzeFile => "ai-analyze-file",
            CommandId::ApplyPatch => "ai-apply-patch",
            CommandId::RunCommand => "ai-run-command",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownCommand(s.to_string()))
    }
}

/// Handle returned by [`CommandRegistry::register`]; give it back to
/// [`CommandRegistry::unregister`] to remove the command.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Registration {
    id: CommandId,
}

impl Registration {
    pub fn id(&self) -> CommandId {
        self.id
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    actions: BTreeMap<CommandId, Box<dyn Action>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, action: Box<dyn Action>) -> Result<Registration, RegistryError> {
        let id = action.id();
        if self.actions.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        self.actions.insert(id, action);
        log::debug!("registered {}", id);
        Ok(Registration { id })
    }

    /// Returns `false` if the command was already gone.
    pub fn unregister(&mut self, registration: Registration) -> bool {
        let removed = self.actions.remove(&registration.id).is_some();
        log::debug!("unregistered {}", registration.id);
        removed
    }

    pub fn contains(&self, id: CommandId) -> bool {
        self.actions.contains_key(&id)
    }

    pub fn commands(&self) -> impl Iterator<Item = CommandId> + '_ {
        self.actions.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn dispatch(
        &self,
        name: &str,
        host: &mut dyn Host,
        transport: &dyn Transport,
    ) -> Result<Outcome, RegistryError> {
        let id: CommandId = name.parse()?;
        let action = self
            .actions
            .get(&id)
            .ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))?;

        log::debug!("dispatching {}", id);
        Ok(actions::run(action.as_ref(), host, transport))
    }
}

/// The registry plus the handles taken out at activation.
pub struct Activation {
    registry: CommandRegistry,
    registrations: Vec<Registration>,
}

impl Activation {
    /// Registers every built-in command.
    pub fn activate() -> Self {
        let mut registry = CommandRegistry::new();
        let mut registrations = Vec::new();

        for action in actions::builtin_actions() {
            match registry.register(action) {
                Ok(registration) => registrations.push(registration),
                Err(err) => log::error!("failed to register command: {}", err),
            }
        }

        log::info!("activated {} commands", registrations.len());
        Self {
            registry,
            registrations,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn is_active(&self) -> bool {
        !self.registrations.is_empty()
    }

    /// Releases every registration. Safe to call more than once.
    pub fn deactivate(&mut self) {
        if self.registrations.is_empty() {
            return;
        }
        for registration in self.registrations.drain(..) {
            self.registry.unregister(registration);
        }
        log::info!("deactivated");
    }
}
