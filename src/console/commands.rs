//! # Console Commands
//!
//! Parses one line of console input into a [`ConsoleCommand`]. Parsing is
//! pure; the app controller decides what each command does.

use crate::console::schema::SchemaRegistry;
use thiserror::Error;

/// Shown on the status line by `help`
pub const HELP_TEXT: &str = "list | use <entity> | new | edit <row> | delete <row> | \
set <field> <value> | <field>=<value> | save | cancel | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Blank line, just redraw
    Noop,
    Reload,
    Use(String),
    New,
    Edit(usize),
    Delete(usize),
    Set { field: String, value: String },
    Save,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for commands")]
    Unknown(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'{0}' is not a row number")]
    InvalidRow(String),
    #[error("Unknown entity '{0}'")]
    UnknownEntity(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str, registry: &SchemaRegistry) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Noop);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "list" | "ls" | "reload" => Ok(Self::Reload),
            "use" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "use",
                        argument: "an entity name",
                    });
                }
                let schema = registry
                    .get(rest)
                    .ok_or_else(|| CommandError::UnknownEntity(rest.to_string()))?;
                Ok(Self::Use(schema.plural.to_string()))
            }
            "new" | "create" => Ok(Self::New),
            "edit" => parse_row("edit", rest).map(Self::Edit),
            "delete" | "del" | "rm" => parse_row("delete", rest).map(Self::Delete),
            "set" => parse_set(rest),
            "save" | "submit" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => {
                if let Some((field, value)) = line.split_once('=') {
                    return Ok(Self::Set {
                        field: field.trim().to_string(),
                        value: value.trim().to_string(),
                    });
                }
                match registry.get(line) {
                    Some(schema) => Ok(Self::Use(schema.plural.to_string())),
                    None => Err(CommandError::Unknown(line.to_string())),
                }
            }
        }
    }
}

fn parse_row(command: &'static str, rest: &str) -> Result<usize, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a row number",
        });
    }
    match rest.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(CommandError::InvalidRow(rest.to_string())),
    }
}

fn parse_set(rest: &str) -> Result<ConsoleCommand, CommandError> {
    let missing = CommandError::MissingArgument {
        command: "set",
        argument: "a field name",
    };
    if rest.is_empty() {
        return Err(missing);
    }
    // `field=value` only when the name before `=` is a single word
    if let Some((field, value)) = rest
        .split_once('=')
        .filter(|(field, _)| !field.trim().contains(char::is_whitespace))
    {
        return Ok(ConsoleCommand::Set {
            field: field.trim().to_string(),
            value: value.trim().to_string(),
        });
    }
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (rest, ""),
    };
    Ok(ConsoleCommand::Set {
        field: field.to_string(),
        value: value.to_string(),
    })
}
