use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use tracing::info;

use super::app::App;
use super::forms::{InputError, MenuChoice};
use super::helpers::{menu_lines, MENU_PROMPT};

/// How a line of output should stand out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Warning,
    Error,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Plain => None,
            Tone::Info => Some(Color::Green),
            Tone::Warning => Some(Color::Yellow),
            Tone::Error => Some(Color::Red),
        }
    }
}

/// Line-oriented console the session talks through. Any reader/writer pair
/// works, which lets tests script a whole session in memory.
pub struct Console<R, W> {
    input: R,
    output: W,
    styled: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console over the process's stdin/stdout. Colors are only used when
    /// stdout is an actual terminal.
    pub fn stdio() -> Self {
        let output = io::stdout();
        let styled = output.is_terminal();
        Self {
            input: io::stdin().lock(),
            output,
            styled,
        }
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Console over arbitrary streams. Output is never colored.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            styled: false,
        }
    }

    /// Give back the writer, letting callers inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print one uncolored line.
    pub fn line(&mut self, text: impl Display) -> Result<()> {
        self.styled_line(text, Tone::Plain)
    }

    /// Print an empty line.
    pub fn blank(&mut self) -> Result<()> {
        self.line("")
    }

    /// Print one line in the color matching `tone`, or plain when the
    /// console is not styled.
    pub fn styled_line(&mut self, text: impl Display, tone: Tone) -> Result<()> {
        match tone.color().filter(|_| self.styled) {
            Some(color) => queue!(
                self.output,
                SetForegroundColor(color),
                Print(text),
                ResetColor,
                Print("\n")
            ),
            None => writeln!(self.output, "{text}"),
        }
        .context("failed to write to the console")
    }

    /// Show `question` and wait for one line of input. The line terminator is
    /// stripped, nothing else is. End of input is reported as
    /// [`InputError::Closed`].
    pub fn prompt(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush console")?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .context("failed to read from the console")?;
        if read == 0 {
            return Err(InputError::Closed.into());
        }

        let trimmed_len = answer.trim_end_matches(['\r', '\n']).len();
        answer.truncate(trimmed_len);
        Ok(answer)
    }

    /// Wait for ENTER. Running out of input counts as having pressed it.
    pub fn pause(&mut self, message: &str) -> Result<()> {
        match self.prompt(message) {
            Ok(_) => Ok(()),
            Err(err) if is_closed(&err) => self.blank(),
            Err(err) => Err(err),
        }
    }

    /// Keep asking until one of the menu codes is typed. `None` means input
    /// ran out.
    pub fn read_menu_choice(&mut self) -> Result<Option<MenuChoice>> {
        loop {
            let raw = match self.prompt(MENU_PROMPT) {
                Ok(raw) => raw,
                Err(err) if is_closed(&err) => return Ok(None),
                Err(err) => return Err(err),
            };
            if let Some(choice) = MenuChoice::parse(&raw) {
                self.blank()?;
                return Ok(Some(choice));
            }
        }
    }
}

fn is_closed(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<InputError>(), Some(InputError::Closed))
}

/// Drive the menu loop until the user exits or input runs out.
pub fn run_app<R: BufRead, W: Write>(app: &mut App, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.blank()?;
        for line in menu_lines() {
            console.line(line)?;
        }
        console.blank()?;

        let Some(choice) = console.read_menu_choice()? else {
            info!("input closed, ending session");
            break;
        };

        if app.handle_choice(choice, console)? {
            info!("session ended by user");
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn prompt_strips_only_the_line_terminator() {
        let mut console = console("  padded \r\nnext\n");
        assert_eq!(console.prompt("? ").unwrap(), "  padded ");
        assert_eq!(console.prompt("? ").unwrap(), "next");
        assert_eq!(output(console), "? ? ");
    }

    #[test]
    fn prompt_reports_closed_input() {
        let mut console = console("");
        let err = console.prompt("? ").unwrap_err();
        assert_eq!(err.downcast_ref::<InputError>(), Some(&InputError::Closed));
    }

    #[test]
    fn menu_choice_reprompts_until_valid() {
        let mut console = console("z\n\nsave\n S \n");
        assert_eq!(console.read_menu_choice().unwrap(), Some(MenuChoice::Save));
        assert_eq!(output(console).matches(MENU_PROMPT).count(), 4);
    }

    #[test]
    fn menu_choice_is_none_when_input_ends() {
        let mut console = console("q\n");
        assert_eq!(console.read_menu_choice().unwrap(), None);
    }

    #[test]
    fn pause_tolerates_closed_input() {
        let mut console = console("");
        console.pause("Press [ENTER]").unwrap();
    }

    #[test]
    fn unstyled_console_writes_plain_text() {
        let mut console = console("");
        console.styled_line("careful", Tone::Warning).unwrap();
        assert_eq!(output(console), "careful\n");
    }

    #[test]
    fn styled_console_wraps_text_in_color_codes() {
        let mut console = console("");
        console.styled = true;
        console.styled_line("careful", Tone::Warning).unwrap();
        let text = output(console);
        assert!(text.starts_with('\u{1b}'), "{text:?}");
        assert!(text.contains("careful"));
        assert!(text.ends_with('\n'));
    }
}
