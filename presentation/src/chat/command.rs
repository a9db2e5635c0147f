//! Parsing of REPL input lines

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    /// Text to send in the active chat
    Message(String),
    NewChat,
    List,
    /// Selector: list number, full id, or id prefix
    Switch(String),
    Delete(String),
    History,
    Title,
    Help,
    Quit,
    /// A command that needs an argument was given none
    MissingArgument(&'static str),
    Unknown(String),
}

impl ReplInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return ReplInput::Message(line.to_string());
        };

        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };

        match name {
            "new" | "n" => ReplInput::NewChat,
            "list" | "ls" | "l" => ReplInput::List,
            "switch" | "s" => Self::with_argument("/switch", argument, ReplInput::Switch),
            "delete" | "del" | "rm" => Self::with_argument("/delete", argument, ReplInput::Delete),
            "history" => ReplInput::History,
            "title" => ReplInput::Title,
            "help" | "h" | "?" => ReplInput::Help,
            "quit" | "exit" | "q" => ReplInput::Quit,
            _ => ReplInput::Unknown(line.to_string()),
        }
    }

    fn with_argument(
        command: &'static str,
        argument: &str,
        make: fn(String) -> ReplInput,
    ) -> ReplInput {
        if argument.is_empty() {
            ReplInput::MissingArgument(command)
        } else {
            make(argument.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(
            ReplInput::parse("  hello there \n"),
            ReplInput::Message("hello there".to_string())
        );
    }

    #[test]
    fn test_commands_and_aliases() {
        assert_eq!(ReplInput::parse("/new"), ReplInput::NewChat);
        assert_eq!(ReplInput::parse("/ls"), ReplInput::List);
        assert_eq!(ReplInput::parse("/history"), ReplInput::History);
        assert_eq!(ReplInput::parse("/title"), ReplInput::Title);
        assert_eq!(ReplInput::parse("/?"), ReplInput::Help);
        assert_eq!(ReplInput::parse("/exit"), ReplInput::Quit);
    }

    #[test]
    fn test_selector_arguments() {
        assert_eq!(
            ReplInput::parse("/switch 2"),
            ReplInput::Switch("2".to_string())
        );
        assert_eq!(
            ReplInput::parse("/delete   3f2a  "),
            ReplInput::Delete("3f2a".to_string())
        );
    }

    #[test]
    fn test_missing_selector() {
        assert_eq!(
            ReplInput::parse("/switch"),
            ReplInput::MissingArgument("/switch")
        );
        assert_eq!(
            ReplInput::parse("/delete  "),
            ReplInput::MissingArgument("/delete")
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            ReplInput::parse("/frobnicate now"),
            ReplInput::Unknown("/frobnicate now".to_string())
        );
    }
}
