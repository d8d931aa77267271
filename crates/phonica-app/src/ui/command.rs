use phonica_types::UiEvent;

/// One parsed line of terminal input
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Forward these events to the backend, in order
    Send(Vec<UiEvent>),
    History,
    Help,
    Empty,
}

pub const HELP: &str = "\
<word>        look up a word
:type <text>  update the input and refresh suggestions
:search       look up the current input
:s <n>        look up suggestion n
:h <n>        look up history entry n
:play [n]     play the pronunciation (or audio clip n)
:reset        clear the input and result
:history      show recent searches
:q            quit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(Command::Empty);
    }

    let Some(rest) = line.trim_start().strip_prefix(':') else {
        return Ok(Command::Send(vec![
            UiEvent::TextInput(line.to_string()),
            UiEvent::Search(None),
        ]));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "q" | "quit" => Command::Send(vec![UiEvent::Close]),
        "type" => Command::Send(vec![UiEvent::TextInput(arg.to_string())]),
        "search" => Command::Send(vec![UiEvent::Search(None)]),
        "s" => Command::Send(vec![UiEvent::SelectSuggestion(parse_index(arg)?)]),
        "h" => Command::Send(vec![UiEvent::SelectHistory(parse_index(arg)?)]),
        "play" if arg.is_empty() => Command::Send(vec![UiEvent::Play(None)]),
        "play" => Command::Send(vec![UiEvent::Play(Some(parse_index(arg)?))]),
        "reset" => Command::Send(vec![UiEvent::Reset]),
        "history" => Command::History,
        "help" | "?" => Command::Help,
        other => return Err(format!("Unknown command ':{other}', try :help")),
    };

    Ok(command)
}

/// 1-based position to a 0-based index
fn parse_index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("Expected a number from 1, got '{arg}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_types_then_searches() {
        assert_eq!(
            parse_command("ice cream\n").unwrap(),
            Command::Send(vec![
                UiEvent::TextInput("ice cream".to_string()),
                UiEvent::Search(None),
            ])
        );
    }

    #[test]
    fn test_type_keeps_inner_text() {
        assert_eq!(
            parse_command(":type colo").unwrap(),
            Command::Send(vec![UiEvent::TextInput("colo".to_string())])
        );
        assert_eq!(
            parse_command(":type").unwrap(),
            Command::Send(vec![UiEvent::TextInput(String::new())])
        );
    }

    #[test]
    fn test_indices_are_one_based() {
        assert_eq!(
            parse_command(":s 2").unwrap(),
            Command::Send(vec![UiEvent::SelectSuggestion(1)])
        );
        assert_eq!(
            parse_command(":h 1").unwrap(),
            Command::Send(vec![UiEvent::SelectHistory(0)])
        );
        assert_eq!(
            parse_command(":play 3").unwrap(),
            Command::Send(vec![UiEvent::Play(Some(2))])
        );
        assert_eq!(
            parse_command(":play").unwrap(),
            Command::Send(vec![UiEvent::Play(None)])
        );
    }

    #[test]
    fn test_bad_indices_are_rejected() {
        assert!(parse_command(":s 0").is_err());
        assert!(parse_command(":h").is_err());
        assert!(parse_command(":play x").is_err());
    }

    #[test]
    fn test_local_and_unknown_commands() {
        assert_eq!(parse_command("   ").unwrap(), Command::Empty);
        assert_eq!(parse_command(":history").unwrap(), Command::History);
        assert_eq!(parse_command(":help").unwrap(), Command::Help);
        assert_eq!(
            parse_command(":q").unwrap(),
            Command::Send(vec![UiEvent::Close])
        );
        assert!(parse_command(":frobnicate").is_err());
    }
}
