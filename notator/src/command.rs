//! Shell command parsing.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Open(PathBuf),
    Save,
    SaveAs(Option<PathBuf>),
    Close,
    ToggleTabs,
    Prev,
    Next,
    Quote,
    Timer(u64),
    Reset,
    Hemingway,
    Delete,
    /// Append a line to the active tab.
    Write(String),
    /// Replace the active tab's content.
    Set(String),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  new                 open a blank tab
  open <path>         load a note into a new tab
  save                save the active tab (asks for a name if unsaved)
  save-as [path]      save under <path> or a timestamped name
  close               close the active tab
  tabs                show or hide the tab bar
  prev | next         switch tabs
  quote               show a random quote
  timer <seconds>     start the countdown
  reset               stop the countdown
  hemingway           toggle append-only editing for the active tab
  delete              delete the active file (asks for a haiku)
  write <text>        append a line to the active tab
  set <text>          replace the active tab's content
  show                print the active tab
  help                this text
  quit                leave";

impl Command {
    /// Parse a non-empty command line.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word {
            "new" => Self::New,
            "open" => Self::Open(required_path(rest, "open")?),
            "save" => Self::Save,
            "save-as" => Self::SaveAs((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "close" => Self::Close,
            "tabs" => Self::ToggleTabs,
            "prev" => Self::Prev,
            "next" => Self::Next,
            "quote" => Self::Quote,
            "timer" => Self::Timer(
                rest.parse()
                    .with_context(|| format!("timer expects whole seconds, got '{rest}'"))?,
            ),
            "reset" => Self::Reset,
            "hemingway" => Self::Hemingway,
            "delete" => Self::Delete,
            "write" => Self::Write(rest.to_string()),
            "set" => Self::Set(rest.to_string()),
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "" => bail!("empty command"),
            other => bail!("unknown command '{other}' (try 'help')"),
        };
        Ok(command)
    }
}

fn required_path(rest: &str, command: &str) -> Result<PathBuf> {
    if rest.is_empty() {
        bail!("{command} expects a path");
    }
    Ok(PathBuf::from(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_commands() {
        assert_eq!(Command::parse("new").expect("parse"), Command::New);
        assert_eq!(Command::parse("  next ").expect("parse"), Command::Next);
        assert_eq!(Command::parse("exit").expect("parse"), Command::Quit);
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(
            Command::parse("open notes/a b.md").expect("parse"),
            Command::Open(PathBuf::from("notes/a b.md"))
        );
        assert_eq!(Command::parse("timer 90").expect("parse"), Command::Timer(90));
        assert_eq!(
            Command::parse("write hello  world").expect("parse"),
            Command::Write("hello  world".to_string())
        );
    }

    #[test]
    fn save_as_path_is_optional() {
        assert_eq!(Command::parse("save-as").expect("parse"), Command::SaveAs(None));
        assert_eq!(
            Command::parse("save-as x.md").expect("parse"),
            Command::SaveAs(Some(PathBuf::from("x.md")))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("open").is_err());
        assert!(Command::parse("timer soon").is_err());
        assert!(Command::parse("timer -5").is_err());
        let err = Command::parse("frobnicate").expect_err("unknown");
        assert!(err.to_string().contains("unknown command 'frobnicate'"));
    }
}
