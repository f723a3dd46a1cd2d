//! Parses operator lines from stdin.

use crawldash_core::Msg;

use super::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub enum OperatorInput {
    Msg(Msg),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> OperatorInput {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim_start().strip_prefix(COMMAND_PREFIX) else {
        return OperatorInput::Msg(Msg::InputAppended(line.to_string()));
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command.trim(), ""),
    };

    match name.to_ascii_lowercase().as_str() {
        CMD_ENDPOINT => OperatorInput::Msg(Msg::EndpointSubmitted(argument.to_string())),
        CMD_LIMIT => OperatorInput::Msg(Msg::LimitSubmitted(argument.to_string())),
        CMD_SUBMIT => OperatorInput::Msg(Msg::UrlsSubmitted),
        CMD_CLEAR => OperatorInput::Msg(Msg::InputCleared),
        CMD_FILTER => OperatorInput::Msg(Msg::FilterChanged(
            Some(argument.to_string()).filter(|text| !text.is_empty()),
        )),
        CMD_HELP | "h" | "?" => OperatorInput::Help,
        CMD_QUIT | "q" | "exit" => OperatorInput::Quit,
        _ => OperatorInput::Unknown(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_input() {
        assert_eq!(
            parse_line("https://www.youtube.com/watch?v=abc\r\n"),
            OperatorInput::Msg(Msg::InputAppended(
                "https://www.youtube.com/watch?v=abc".to_string()
            ))
        );
        assert_eq!(
            parse_line(""),
            OperatorInput::Msg(Msg::InputAppended(String::new()))
        );
    }

    #[test]
    fn endpoint_keeps_argument() {
        assert_eq!(
            parse_line(":endpoint   http://crawler:8000/ "),
            OperatorInput::Msg(Msg::EndpointSubmitted("http://crawler:8000/".to_string()))
        );
        assert_eq!(
            parse_line(":endpoint"),
            OperatorInput::Msg(Msg::EndpointSubmitted(String::new()))
        );
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_line(":SUBMIT"), OperatorInput::Msg(Msg::UrlsSubmitted));
        assert_eq!(parse_line("  :Quit"), OperatorInput::Quit);
    }

    #[test]
    fn filter_without_text_clears() {
        assert_eq!(
            parse_line(":filter"),
            OperatorInput::Msg(Msg::FilterChanged(None))
        );
        assert_eq!(
            parse_line(":filter rust talk"),
            OperatorInput::Msg(Msg::FilterChanged(Some("rust talk".to_string())))
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse_line(":frobnicate now"),
            OperatorInput::Unknown("frobnicate".to_string())
        );
    }
}
