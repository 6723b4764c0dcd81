use scrollvis_protocol::VisualCommand;

/// Command buffer that sections write their transitions into.
///
/// Pushing a command is how a section *starts* a transition. Nothing here
/// waits for the host to finish animating; the driver drains the buffer
/// after each scroll event and hands it to the host.
#[derive(Debug, Default)]
pub struct Stage {
    commands: Vec<VisualCommand>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: VisualCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[VisualCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Take every pending command, leaving the stage empty.
    pub fn drain(&mut self) -> Vec<VisualCommand> {
        std::mem::take(&mut self.commands)
    }
}
