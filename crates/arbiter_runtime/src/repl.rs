//! The main REPL implementation.

use std::io::{self, Write};
use std::path::Path;

use arbiter_engine::{RunReport, Status};
use arbiter_foundation::{Error, ErrorKind, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor, is_complete};
use crate::session::{Session, render_error, render_report};

const HELP: &str = "\
Enter statements ending with '.' or a closing '}'. Input continues on the
next line until it is complete.

Commands:
    :doc           Print the document as JSON
    :symbols       List symbol bindings
    :modules       List module names bound at the root
    :data <file>   Load a JSON document
    :help          Show this message
    Ctrl+D         Exit
    Ctrl+C         Cancel current input";

/// What one line of input produced.
#[derive(Debug)]
pub enum Outcome {
    /// A script ran to completion.
    Report(RunReport),
    /// A command printed text.
    Output(String),
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (document, registry, symbols).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL over `session` with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new(session.config().dialect)?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "arbiter> ".to_string(),
            continuation_prompt: "     ..> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            self.editor.set_keywords(self.completions());
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => eprintln!("\x1b[31m{}\x1b[0m", render_error(&e)),
            }
        }

        println!();
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        match self.eval(&input) {
            Ok(Outcome::Report(report)) => println!("{}", format_report(&report)),
            Ok(Outcome::Output(text)) => println!("{text}"),
            Err(e) => eprintln!("\x1b[31m{}\x1b[0m", render_error(&e)),
        }

        Ok(true)
    }

    /// Reads a potentially multi-line input.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let prompt = if first_line {
                &self.prompt
            } else {
                &self.continuation_prompt
            };

            match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => {
                    if !first_line {
                        input.push('\n');
                    }
                    input.push_str(&line);

                    if is_complete(&input) {
                        return Ok(Some(input));
                    }

                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(Error::new(ErrorKind::Io(
                        "unexpected EOF in multi-line input".to_string(),
                    )));
                }
            }
        }
    }

    /// Evaluates a command or script input.
    ///
    /// # Errors
    ///
    /// Returns an error if a command is unknown or fails, or if the script
    /// fails to parse or raises an engine error.
    pub fn eval(&mut self, input: &str) -> Result<Outcome> {
        let trimmed = input.trim();
        match trimmed.strip_prefix(':') {
            Some(command) => self.command(command).map(Outcome::Output),
            None => self.session.eval(input).map(Outcome::Report),
        }
    }

    fn command(&mut self, command: &str) -> Result<String> {
        let (name, argument) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(n, a)| (n, a.trim()));

        match name {
            "doc" => serde_json::to_string_pretty(self.session.document())
                .map_err(|e| Error::new(ErrorKind::Internal(e.to_string()))),
            "symbols" => Ok(self
                .session
                .symbols()
                .sorted()
                .into_iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect::<Vec<_>>()
                .join("\n")),
            "modules" => Ok(self
                .session
                .registry()
                .root_names()
                .collect::<Vec<_>>()
                .join("\n")),
            "data" if !argument.is_empty() => {
                self.session.load_document(Path::new(argument))?;
                Ok(format!("loaded {argument}"))
            }
            "data" => Err(Error::new(ErrorKind::InvalidConfig(
                ":data needs a file path".to_string(),
            ))),
            "help" => Ok(HELP.to_string()),
            other => Err(Error::new(ErrorKind::InvalidConfig(format!(
                "unknown command :{other} (try :help)"
            )))),
        }
    }

    /// Words offered for completion: reserved words, module names, symbols.
    fn completions(&self) -> Vec<String> {
        let mut words: Vec<String> = arbiter_language::dialect::KEYWORDS
            .iter()
            .map(ToString::to_string)
            .collect();
        words.extend(self.session.registry().root_names().map(String::from));
        words.extend(
            self.session
                .symbols()
                .sorted()
                .into_iter()
                .map(|(name, _)| name.to_string()),
        );
        words.sort_unstable();
        words.dedup();
        words
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mArbiter\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for commands. Use Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}

/// Colors the status line of a rendered report.
fn format_report(report: &RunReport) -> String {
    let color = match report.status {
        Status::Success => "\x1b[1;32m",
        Status::Failed => "\x1b[1;31m",
        Status::Active => "\x1b[1;33m",
    };
    let rendered = render_report(report);
    let (status, rest) = rendered.split_once('\n').unwrap_or((rendered.as_str(), ""));
    if rest.is_empty() {
        format!("{color}{status}\x1b[0m")
    } else {
        format!("{color}{status}\x1b[0m\n{rest}")
    }
}
