//! Command identifiers.

use std::fmt;

use crate::error::BusError;

/// A named command identifier, used as the registry key.
///
/// A command is valid iff its name is non-empty. No charset or length
/// restrictions are enforced beyond that.
///
/// ## Example
///
/// ```
/// use command_bus::Command;
///
/// let cmd = Command::new("order.create");
/// assert_eq!(cmd.name(), "order.create");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command(String);

impl Command {
    /// Create a new command identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.0
    }

    pub(crate) fn valid(&self) -> Result<(), BusError> {
        if self.0.is_empty() {
            return Err(BusError::InvalidCommand);
        }
        Ok(())
    }
}

impl From<&str> for Command {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Command {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
