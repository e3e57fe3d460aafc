//! Line commands read from stdin, named after the page's `data-action` values.
use cards_core::{Language, Msg, UnknownLanguage};
use thiserror::Error;

use super::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Language(#[from] UnknownLanguage),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let action = words.next().ok_or(CommandError::Empty)?;
    let argument = words.next();

    let msg = match action {
        ACTION_LANG => {
            let code = argument.ok_or(CommandError::MissingArgument(ACTION_LANG))?;
            Msg::LanguageSelected(code.parse::<Language>()?)
        }
        ACTION_REFRESH => Msg::RefreshClicked,
        ACTION_RETRY => Msg::RetryClicked,
        ACTION_MORE => toggle(ACTION_MORE, argument, true)?,
        ACTION_LESS => toggle(ACTION_LESS, argument, false)?,
        ACTION_QUIT => return Ok(Command::Quit),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Command::Dispatch(msg))
}

fn toggle(
    action: &'static str,
    card_id: Option<&str>,
    show_detailed: bool,
) -> Result<Msg, CommandError> {
    let card_id = card_id.ok_or(CommandError::MissingArgument(action))?;
    Ok(Msg::ToggleSummary {
        card_id: card_id.to_string(),
        show_detailed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_map_to_messages() {
        assert_eq!(
            parse_command("lang th"),
            Ok(Command::Dispatch(Msg::LanguageSelected(Language::Th)))
        );
        assert_eq!(
            parse_command("  refresh  "),
            Ok(Command::Dispatch(Msg::RefreshClicked))
        );
        assert_eq!(parse_command("retry"), Ok(Command::Dispatch(Msg::RetryClicked)));
        assert_eq!(
            parse_command("more SecondaryTemperatureControl_pdf"),
            Ok(Command::Dispatch(Msg::ToggleSummary {
                card_id: "SecondaryTemperatureControl_pdf".to_string(),
                show_detailed: true,
            }))
        );
        assert_eq!(
            parse_command("less a_pdf"),
            Ok(Command::Dispatch(Msg::ToggleSummary {
                card_id: "a_pdf".to_string(),
                show_detailed: false,
            }))
        );
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert_eq!(
            parse_command("more"),
            Err(CommandError::MissingArgument("more"))
        );
        assert_eq!(
            parse_command("lang fr"),
            Err(CommandError::Language(UnknownLanguage("fr".to_string())))
        );
    }
}
