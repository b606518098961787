//! Built-in commands understood by the fake shell.

use crate::config::Config;

pub const COMMAND_NOT_FOUND: &str = "Command not found";

/// What dispatching a command does to the scrollback besides printing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandEffect {
    None,
    /// Prints the registry's current command names.
    ListCommands,
    ClearScrollback,
}

pub type Handler = Box<dyn Fn() -> Option<String> + Send + Sync>;

pub struct Command {
    pub name: String,
    pub effect: CommandEffect,
    handler: Handler,
}

impl Command {
    pub fn new(
        name: impl Into<String>,
        handler: impl Fn() -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            effect: CommandEffect::None,
            handler: Box::new(handler),
        }
    }

    pub fn with_effect(mut self, effect: CommandEffect) -> Self {
        self.effect = effect;
        self
    }

    /// Runs the handler. Empty output is reported as `None`.
    pub fn invoke(&self) -> Option<String> {
        (self.handler)().filter(|text| !text.is_empty())
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("effect", &self.effect)
            .finish_non_exhaustive()
    }
}

/// Name-unique command table. Iteration order is registration order, which is
/// also the order completion and suggestions consider names in.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin(config: &Config) -> Self {
        let about = config.about.clone();
        let socials = config.socials.clone();

        let mut registry = Self::new();
        registry.register(
            Command::new("help", || None).with_effect(CommandEffect::ListCommands),
        );
        registry.register(Command::new("about", move || Some(about.clone())));
        registry.register(Command::new("socials", move || Some(socials.clone())));
        registry.register(
            Command::new("clear", || None).with_effect(CommandEffect::ClearScrollback),
        );
        registry
    }

    /// `help` output, built from whatever is registered right now.
    pub fn help_text(&self) -> String {
        format!("Commands: {}", self.names().collect::<Vec<_>>().join(", "))
    }

    /// Adds a command, replacing any earlier one with the same name in place.
    pub fn register(&mut self, command: Command) {
        if let Some(existing) = self.commands.iter_mut().find(|c| c.name == command.name) {
            *existing = command;
        } else {
            self.commands.push(command);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All names starting with `prefix` (compared lower-cased), in order.
    pub fn matching(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.names()
            .filter(|name| name.starts_with(&prefix))
            .map(str::to_string)
            .collect()
    }

    pub fn first_match(&self, prefix: &str) -> Option<&str> {
        let prefix = prefix.to_lowercase();
        self.names().find(|name| name.starts_with(&prefix))
    }
}
