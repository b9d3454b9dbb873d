//! Special commands parser for the interactive chat
//!
//! Special commands control the dice and the chat session instead of being
//! sent to the assistant. They are prefixed with `/`; the command word is
//! case-insensitive, arguments keep their case.

use crate::catalog::Category;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Which sessions `/clear` drops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    /// Every session
    All,
    /// Every session except the current venue's
    Others,
}

/// Special commands that can be executed during the interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Roll the dice
    Roll,

    /// Switch category (`/food`, `/place`)
    SetCategory(Category),

    /// Toggle secret mode
    ToggleSecret,

    /// List the suggested questions for the current result
    Suggest,

    /// Send suggested question number n (1-based)
    AskSuggestion(usize),

    /// Ask the last question again for a fresh reply
    Regenerate,

    /// Replace the last question with new text and ask it
    Edit(String),

    /// Show the current venue's chat history
    History,

    /// Search the current venue's chat history
    Search(String),

    /// Show message statistics
    Stats,

    /// Export the current session, optionally into a directory
    Export(Option<String>),

    /// Import a session from a JSON file
    Import(String),

    /// Drop chat sessions
    Clear(ClearScope),

    /// Display dice and chat status
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the assistant as a question.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` for unrecognized `/` input,
/// `CommandError::MissingArgument` when a required argument is absent and
/// `CommandError::UnsupportedArgument` when an argument is invalid.
///
/// # Examples
///
/// ```
/// use dadu::catalog::Category;
/// use dadu::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/ROLL").unwrap(), SpecialCommand::Roll);
/// assert_eq!(
///     parse_special_command("/place").unwrap(),
///     SpecialCommand::SetCategory(Category::Place)
/// );
/// assert_eq!(
///     parse_special_command("/search Parkir").unwrap(),
///     SpecialCommand::Search("Parkir".to_string())
/// );
/// assert_eq!(
///     parse_special_command("Kenapa harus ke sini?").unwrap(),
///     SpecialCommand::None
/// );
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(SpecialCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, arg)) => (command.to_lowercase(), arg.trim()),
        None => (lower, ""),
    };

    match command.as_str() {
        "/roll" | "/r" => no_argument(SpecialCommand::Roll, &command, arg),
        "/food" => no_argument(SpecialCommand::SetCategory(Category::Food), &command, arg),
        "/place" => no_argument(SpecialCommand::SetCategory(Category::Place), &command, arg),
        "/secret" => no_argument(SpecialCommand::ToggleSecret, &command, arg),
        "/suggest" | "/prompts" => no_argument(SpecialCommand::Suggest, &command, arg),
        "/regen" | "/regenerate" => no_argument(SpecialCommand::Regenerate, &command, arg),
        "/history" => no_argument(SpecialCommand::History, &command, arg),
        "/stats" => no_argument(SpecialCommand::Stats, &command, arg),
        "/status" => no_argument(SpecialCommand::ShowStatus, &command, arg),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        "/ask" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command,
                    usage: "/ask <number>".to_string(),
                });
            }
            match arg.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(SpecialCommand::AskSuggestion(n)),
                _ => Err(CommandError::UnsupportedArgument {
                    command,
                    arg: arg.to_string(),
                }),
            }
        }

        "/search" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command,
                    usage: "/search <text>".to_string(),
                });
            }
            Ok(SpecialCommand::Search(arg.to_string()))
        }

        "/edit" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command,
                    usage: "/edit <text>".to_string(),
                });
            }
            Ok(SpecialCommand::Edit(arg.to_string()))
        }

        "/export" => Ok(SpecialCommand::Export(
            (!arg.is_empty()).then(|| arg.to_string()),
        )),

        "/import" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command,
                    usage: "/import <file>".to_string(),
                });
            }
            Ok(SpecialCommand::Import(arg.to_string()))
        }

        "/clear" => match arg.to_lowercase().as_str() {
            "" | "all" => Ok(SpecialCommand::Clear(ClearScope::All)),
            "others" => Ok(SpecialCommand::Clear(ClearScope::Others)),
            other => Err(CommandError::UnsupportedArgument {
                command,
                arg: other.to_string(),
            }),
        },

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn no_argument(
    parsed: SpecialCommand,
    command: &str,
    arg: &str,
) -> Result<SpecialCommand, CommandError> {
    if arg.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
    }
}

/// Print help for the interactive chat
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat
=====================================

DICE:
  /roll           - Roll the dice (also /r)
  /food           - Switch to "Makan Apa?"
  /place          - Switch to "Kemana Ya?"
  /secret         - Toggle secret mode

ASKING dnAI:
  <text>          - Ask a question about the current result
  /suggest        - List suggested questions
  /ask <n>        - Send suggested question number n
  /regen          - Ask the last question again
  /edit <text>    - Replace the last question and ask again

CHAT HISTORY:
  /history        - Show the conversation for the current result
  /search <text>  - Search the conversation
  /stats          - Show message statistics
  /export [dir]   - Save the conversation as JSON
  /import <file>  - Load a conversation from JSON
  /clear          - Forget every conversation
  /clear others   - Forget all but the current conversation

SESSION:
  /status         - Show dice and chat status
  /help           - Show this help message
  /?              - Same as /help
  exit            - Exit interactive mode
  quit            - Same as exit

NOTES:
  - Commands are case-insensitive
  - Rolling again starts every conversation from scratch
"#
    );
}
