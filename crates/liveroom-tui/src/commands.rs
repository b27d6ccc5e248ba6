//! Slash-command parsing for the input line.
//!
//! Anything that does not start with `/` is a chat line. Parsing is pure;
//! the input layer maps the result onto [`crate::App`] API calls.

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain chat text.
    Message {
        /// Chat text.
        text: String,
    },

    /// Switch between front and rear cameras.
    SwitchCamera,

    /// Start or stop local capture.
    Capture {
        /// Whether capture should run.
        enabled: bool,
    },

    /// Enable or disable the beauty filter.
    Beauty {
        /// Whether the filter should be on.
        enabled: bool,
    },

    /// Leave the room.
    Leave,

    /// Quit immediately.
    Quit,

    /// Unrecognized slash command.
    Unknown {
        /// The raw input.
        input: String,
    },

    /// Recognized command with bad arguments.
    InvalidArgs {
        /// Command name.
        command: &'static str,
        /// What was wrong.
        error: &'static str,
    },
}

/// Parse one submitted input line.
pub fn parse(input: &str) -> Command {
    let trimmed = input.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Message { text: trimmed.to_owned() };
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match name {
        "switch" => Command::SwitchCamera,
        "camera" => parse_toggle(arg).map_or(
            Command::InvalidArgs { command: "camera", error: "expected on or off" },
            |enabled| Command::Capture { enabled },
        ),
        "beauty" => parse_toggle(arg).map_or(
            Command::InvalidArgs { command: "beauty", error: "expected on or off" },
            |enabled| Command::Beauty { enabled },
        ),
        "leave" => Command::Leave,
        "quit" => Command::Quit,
        _ => Command::Unknown { input: trimmed.to_owned() },
    }
}

fn parse_toggle(arg: Option<&str>) -> Option<bool> {
    match arg {
        Some("on") => Some(true),
        Some("off") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_debug_snapshot;

    use super::*;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(parse("hello room"), Command::Message { text: "hello room".to_owned() });
    }

    #[test]
    fn simple_commands_parse() {
        assert_debug_snapshot!(parse("/switch"), @"SwitchCamera");
        assert_debug_snapshot!(parse("/leave"), @"Leave");
        assert_debug_snapshot!(parse("/quit"), @"Quit");
    }

    #[test]
    fn toggles_require_on_or_off() {
        assert_eq!(parse("/camera on"), Command::Capture { enabled: true });
        assert_eq!(parse("/camera off"), Command::Capture { enabled: false });
        assert_eq!(parse("/beauty on"), Command::Beauty { enabled: true });

        assert_eq!(
            parse("/camera up"),
            Command::InvalidArgs { command: "camera", error: "expected on or off" }
        );
        assert_eq!(
            parse("/beauty"),
            Command::InvalidArgs { command: "beauty", error: "expected on or off" }
        );
    }

    #[test]
    fn unknown_command_keeps_the_input() {
        assert_eq!(parse("/dance"), Command::Unknown { input: "/dance".to_owned() });
    }

    #[test]
    fn slash_inside_text_is_still_a_message() {
        assert_eq!(parse("on/off switch"), Command::Message { text: "on/off switch".to_owned() });
    }
}
