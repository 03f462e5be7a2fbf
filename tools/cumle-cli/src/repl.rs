//! Line-oriented stand-in for the drag-and-drop screen.

use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use cumle_protocol::{Role, RoleSelection, ROLE_OPTIONS};
use cumle_session::{Command, Direction, EditorDraft, Effect, Session, SentenceView};
use tracing::debug;

const HELP: &str = "\
commands:
  show                      redraw the sentence
  next | n, prev | p        move between sentences
  place <role> <word>       put a word into a role box
  remove <role> <word>      take a word out of a box
  check | c                 grade the boxes
  add <sentence>            start authoring a new sentence
  edit                      start editing the current sentence
  preview <role>...         preview one role per word (- leaves a word open)
  roles <role>...           save the sentence being authored
  delete                    delete the current sentence
  export [path]             write all sentences as JSON
  import <path>             replace all sentences from a JSON file
  options                   list role names
  quit | q";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Send(Command),
    Show,
    Help,
    Options,
    Add(String),
    Edit,
    Preview(Vec<RoleSelection>),
    Save(Vec<RoleSelection>),
    Delete,
    Export(Option<PathBuf>),
    Import(PathBuf),
    Quit,
    Nothing,
}

fn parse_selections<'a>(args: impl Iterator<Item = &'a str>) -> anyhow::Result<Vec<RoleSelection>> {
    args.map(|arg| arg.parse::<RoleSelection>().map_err(|e| anyhow!(e)))
        .collect()
}

fn role_and_word<'a>(mut args: impl Iterator<Item = &'a str>, usage: &str) -> anyhow::Result<(Role, String)> {
    let (Some(role), Some(word)) = (args.next(), args.next()) else {
        bail!("usage: {}", usage);
    };
    let role = role.parse::<Role>().map_err(|e| anyhow!(e))?;
    Ok((role, word.to_string()))
}

/// Parses one input line. Roles are given by slug (`ozne`, `dolayli-tumlec`,
/// ...) since labels contain spaces.
pub fn parse_line(line: &str) -> anyhow::Result<Action> {
    let line = line.trim();
    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    let mut args = rest.split_whitespace();

    let action = match head {
        "" => Action::Nothing,
        "show" => Action::Show,
        "help" | "?" => Action::Help,
        "options" => Action::Options,
        "next" | "n" => Action::Send(Command::Navigate { direction: Direction::Next }),
        "prev" | "p" => Action::Send(Command::Navigate { direction: Direction::Previous }),
        "check" | "c" => Action::Send(Command::Verify),
        "place" => {
            let (role, word) = role_and_word(args, "place <role> <word>")?;
            Action::Send(Command::PlaceWord { role, word })
        }
        "remove" => {
            let (role, word) = role_and_word(args, "remove <role> <word>")?;
            Action::Send(Command::RemoveWord { role, word })
        }
        "add" => {
            let text = rest.trim();
            if text.is_empty() {
                bail!("usage: add <sentence>");
            }
            Action::Add(text.to_string())
        }
        "edit" => Action::Edit,
        "preview" => Action::Preview(parse_selections(args)?),
        "roles" => Action::Save(parse_selections(args)?),
        "delete" => Action::Delete,
        "export" => Action::Export(args.next().map(PathBuf::from)),
        "import" => {
            let path = rest.trim();
            if path.is_empty() {
                bail!("usage: import <path>");
            }
            Action::Import(PathBuf::from(path))
        }
        "quit" | "q" | "exit" => Action::Quit,
        other => bail!("unknown command {:?} (try help)", other),
    };
    Ok(action)
}

pub struct Repl<R, W> {
    session: Session,
    input: R,
    output: W,
    draft: Option<EditorDraft>,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(session: Session, input: R, output: W) -> Self {
        Self { session, input, output, draft: None }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let view = self.session.view();
        self.print_view(&view)?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            match parse_line(&line) {
                Ok(Action::Quit) => break,
                Ok(action) => {
                    if let Err(e) = self.perform(action) {
                        writeln!(self.output, "! {:#}", e)?;
                    }
                }
                Err(e) => writeln!(self.output, "! {}", e)?,
            }
        }
        Ok(())
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    fn perform(&mut self, action: Action) -> anyhow::Result<()> {
        debug!(?action, "repl action");
        match action {
            Action::Send(command) => self.send(command),
            Action::Show => {
                let view = self.session.view();
                self.print_view(&view)
            }
            Action::Help => Ok(writeln!(self.output, "{}", HELP)?),
            Action::Options => {
                for role in Role::ALL {
                    writeln!(self.output, "  {:<18} {}", role.slug(), role.label())?;
                }
                writeln!(self.output, "  {:<18} {}", "-", ROLE_OPTIONS[0])?;
                Ok(())
            }
            Action::Add(text) => {
                self.send(Command::BeginAdd)?;
                if let Some(draft) = self.draft.as_mut() {
                    draft.text = text.clone();
                }
                self.send(Command::Preview { text, roles: Vec::new() })
            }
            Action::Edit => self.send(Command::BeginEdit),
            Action::Preview(roles) => {
                let text = self.open_draft()?.text.clone();
                self.send(Command::Preview { text, roles })
            }
            Action::Save(roles) => {
                let draft = self.open_draft()?;
                let (text, target) = (draft.text.clone(), draft.target);
                self.send(Command::Save { text, roles, target })
            }
            Action::Delete => {
                let prompt = self.session.config().messages.confirm_delete.clone();
                write!(self.output, "{} [e/h] ", prompt)?;
                self.output.flush()?;
                let mut answer = String::new();
                self.input.read_line(&mut answer)?;
                if matches!(answer.trim(), "e" | "evet" | "y" | "yes") {
                    self.send(Command::Delete)?;
                }
                Ok(())
            }
            Action::Export(path) => {
                for effect in self.session.dispatch(Command::Export) {
                    match effect {
                        Effect::Download { file_name, contents } => {
                            let path = path.clone().unwrap_or_else(|| PathBuf::from(file_name));
                            fs::write(&path, contents)
                                .with_context(|| format!("writing {}", path.display()))?;
                            writeln!(self.output, "saved {}", path.display())?;
                        }
                        other => self.apply(other)?,
                    }
                }
                Ok(())
            }
            Action::Import(path) => {
                let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
                self.send(Command::Import { bytes })
            }
            Action::Quit | Action::Nothing => Ok(()),
        }
    }

    fn open_draft(&self) -> anyhow::Result<&EditorDraft> {
        self.draft.as_ref().context("no sentence is being authored (use add or edit)")
    }

    fn send(&mut self, command: Command) -> anyhow::Result<()> {
        for effect in self.session.dispatch(command) {
            self.apply(effect)?;
        }
        Ok(())
    }

    fn apply(&mut self, effect: Effect) -> anyhow::Result<()> {
        match effect {
            Effect::Render { view } => self.print_view(&view)?,
            Effect::ShowResult { ok, message, .. } => {
                writeln!(self.output, "{} {}", if ok { "✔" } else { "✘" }, message)?
            }
            Effect::HideResult => {}
            Effect::OpenEditor { draft } => {
                for (i, (token, role)) in draft.tokens.iter().zip(&draft.roles).enumerate() {
                    writeln!(self.output, "  {:>2}. {:<16} {}", i + 1, token, role)?;
                }
                self.draft = Some(draft);
            }
            Effect::CloseEditor => self.draft = None,
            Effect::Preview { preview } => {
                writeln!(self.output, "  words: {}", preview.tokens.join(" | "))?;
                for line in &preview.lines {
                    writeln!(self.output, "  {}: {}", line.role, line.words)?;
                }
                if !preview.complete {
                    writeln!(self.output, "  (some words have no role yet)")?;
                }
            }
            Effect::Download { file_name, contents } => {
                fs::write(&file_name, contents).with_context(|| format!("writing {}", file_name))?;
                writeln!(self.output, "saved {}", file_name)?;
            }
            Effect::Alert { message } => writeln!(self.output, "! {}", message)?,
        }
        Ok(())
    }

    fn print_view(&mut self, view: &SentenceView) -> anyhow::Result<()> {
        writeln!(self.output, "[{}/{}] {}", view.index.get() + 1, view.total, view.text)?;
        let pending: Vec<&str> = view
            .tokens
            .iter()
            .filter(|t| t.placed_in.is_none())
            .map(|t| t.text.as_str())
            .collect();
        if !pending.is_empty() {
            writeln!(self.output, "  to place: {}", pending.join(" "))?;
        }
        for role_box in view.boxes.iter().filter(|b| !b.words.is_empty()) {
            writeln!(self.output, "  {}: {}", role_box.role, role_box.words.join(" "))?;
        }
        Ok(())
    }
}
