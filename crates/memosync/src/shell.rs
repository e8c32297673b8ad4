// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `memosync shell` command implementation.
//!
//! Interactive REPL with a colored prompt and readline history. Each line is
//! parsed into a [`ShellCommand`] and applied to one [`MemoWorkspace`] that
//! lives for the whole shell session.

use std::io::{self, Write};
use std::sync::Arc;

use colored::Colorize;
use memosync_app::{MemoWorkspace, SaveOutcome, SessionPhase};
use memosync_client::MemoClient;
use memosync_config::MemosyncConfig;
use memosync_core::{CategoryId, MemoApi, MemoError, MemoId};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

const VERBS: &[&str] = &[
    "help",
    "login",
    "logout",
    "categories",
    "open",
    "memos",
    "select",
    "new",
    "show",
    "title",
    "content",
    "save",
    "delete",
    "close",
];

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Login(Option<String>),
    Logout,
    Categories,
    Open(CategoryId),
    Memos,
    Select(MemoId),
    New,
    Show,
    Title(String),
    Content(String),
    Save,
    Delete,
    Close,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let (verb, rest) = match line.trim().split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line.trim(), ""),
        };
        let argument = (!rest.is_empty()).then(|| rest.to_string());

        match verb {
            "help" => Ok(Self::Help),
            "login" => Ok(Self::Login(argument)),
            "logout" => Ok(Self::Logout),
            "categories" => Ok(Self::Categories),
            "open" => parse_id(rest, "open <category>").map(|id| Self::Open(CategoryId(id))),
            "memos" => Ok(Self::Memos),
            "select" => parse_id(rest, "select <memo>").map(|id| Self::Select(MemoId(id))),
            "new" => Ok(Self::New),
            "show" => Ok(Self::Show),
            "title" => Ok(Self::Title(rest.to_string())),
            "content" => Ok(Self::Content(rest.to_string())),
            "save" => Ok(Self::Save),
            "delete" => Ok(Self::Delete),
            "close" => Ok(Self::Close),
            other => Err(match suggest_verb(other) {
                Some(verb) => format!("unknown command `{other}`, did you mean `{verb}`?"),
                None => format!("unknown command `{other}`, type `help` for commands"),
            }),
        }
    }
}

fn parse_id(raw: &str, usage: &str) -> Result<i64, String> {
    raw.parse::<i64>().map_err(|_| format!("usage: {usage}"))
}

fn suggest_verb(input: &str) -> Option<&'static str> {
    VERBS
        .iter()
        .map(|verb| (*verb, strsim::jaro_winkler(input, verb)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(verb, _)| verb)
}

/// Runs the `memosync shell` interactive REPL against the configured backend.
pub async fn run_shell(config: MemosyncConfig) -> Result<(), MemoError> {
    let api: Arc<dyn MemoApi> = Arc::new(MemoClient::new(&config.api)?);
    let mut workspace = MemoWorkspace::new(api, config);

    let mut rl = DefaultEditor::new()
        .map_err(|e| MemoError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "memosync shell".bold().green());
    println!(
        "Type {} for commands, {} to exit.\n",
        "help".yellow(),
        "/quit".yellow()
    );

    loop {
        match rl.readline(&prompt(&workspace)) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                let command = match ShellCommand::parse(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        eprintln!("{}: {message}", "error".red());
                        continue;
                    }
                };
                debug!(?command, "shell command");

                let mut output = Vec::new();
                let written = execute(&mut workspace, command, &mut output).await;
                let flushed = io::stdout().write_all(&output);
                if let Err(e) = written.and(flushed) {
                    eprintln!("{}: {e}", "error".red());
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

fn prompt(workspace: &MemoWorkspace) -> String {
    let mut prompt = "memosync".green().to_string();
    let phase = workspace.session().phase();
    if phase != SessionPhase::LoggedIn {
        prompt.push_str(&format!(" ({phase})").dimmed().to_string());
    }
    if let Some(category_id) = workspace.selection().expanded() {
        prompt.push_str(&format!("[{category_id}]"));
    }
    if let Some(editor) = workspace.editor() {
        let marker = if editor.is_dirty() { "*" } else { "" };
        prompt.push_str(&format!(" #{}{marker}", editor.memo_id()));
    }
    prompt.push_str("> ");
    prompt
}

fn report<W: Write>(out: &mut W, error: &MemoError) -> io::Result<()> {
    writeln!(out, "{}: {}", "error".red(), error.user_message())
}

/// Applies one command to the workspace and writes what the user sees.
pub async fn execute<W: Write>(
    workspace: &mut MemoWorkspace,
    command: ShellCommand,
    out: &mut W,
) -> io::Result<()> {
    match command {
        ShellCommand::Help => {
            for line in [
                "login [token]     log in (uses the prefilled token when omitted)",
                "logout            end the session",
                "categories        list categories",
                "open <category>   expand or collapse a category",
                "memos             list memos of the expanded category",
                "select <memo>     open a memo in the editor",
                "new               create a memo in the expanded category",
                "show              print the open memo",
                "title <text>      edit the title",
                "content <text>    edit the content",
                "save              save the open memo",
                "delete            delete the selected memo",
                "close             close the editor",
                "/quit             exit",
            ] {
                writeln!(out, "  {line}")?;
            }
        }
        ShellCommand::Login(token) => match workspace.submit_login(token.as_deref()).await {
            Ok(()) => {
                let fingerprint = workspace
                    .session()
                    .token()
                    .map(|t| t.fingerprint().to_string())
                    .unwrap_or_default();
                writeln!(out, "{} ({fingerprint})", "logged in".green())?;
            }
            Err(e) => report(out, &e)?,
        },
        ShellCommand::Logout => {
            workspace.logout().await;
            writeln!(out, "{}", "logged out".dimmed())?;
        }
        ShellCommand::Categories => write_categories(workspace, out).await?,
        ShellCommand::Open(category_id) => {
            if workspace.toggle_category(category_id) {
                writeln!(out, "expanded category {category_id}")?;
                write_memos(workspace, out).await?;
            } else {
                writeln!(out, "collapsed category {category_id}")?;
            }
        }
        ShellCommand::Memos => write_memos(workspace, out).await?,
        ShellCommand::Select(memo_id) => match workspace.select_memo(memo_id, None).await {
            Ok(()) => write_editor(workspace, out)?,
            Err(e) => report(out, &e)?,
        },
        ShellCommand::New => match workspace.create_memo().await {
            Ok(memo) => {
                writeln!(out, "created memo {} in category {}", memo.id, memo.category_id)?;
                write_editor(workspace, out)?;
            }
            Err(e) => report(out, &e)?,
        },
        ShellCommand::Show => write_editor(workspace, out)?,
        ShellCommand::Title(title) => match workspace.editor_mut() {
            Some(editor) => editor.set_title(title),
            None => writeln!(out, "no memo is open")?,
        },
        ShellCommand::Content(content) => match workspace.editor_mut() {
            Some(editor) => editor.set_content(content),
            None => writeln!(out, "no memo is open")?,
        },
        ShellCommand::Save => match workspace.save_editor().await {
            Ok(SaveOutcome::Saved(memo)) => writeln!(out, "{} memo {}", "saved".green(), memo.id)?,
            Ok(SaveOutcome::Unchanged) => writeln!(out, "nothing to save")?,
            Err(e) => report(out, &e)?,
        },
        ShellCommand::Delete => match workspace.delete_memo().await {
            Ok(memo_id) => writeln!(out, "deleted memo {memo_id}")?,
            Err(e) => report(out, &e)?,
        },
        ShellCommand::Close => {
            workspace.close_editor();
        }
    }
    Ok(())
}

async fn write_categories<W: Write>(workspace: &MemoWorkspace, out: &mut W) -> io::Result<()> {
    if !workspace.session().is_logged_in() {
        return writeln!(out, "not logged in");
    }
    let entry = workspace.categories().await;
    if let Some(error) = entry.error() {
        return report(out, error);
    }
    let expanded = workspace.selection().expanded();
    for category in entry.data().into_iter().flatten() {
        let marker = if Some(category.id) == expanded { "v" } else { ">" };
        writeln!(out, "{marker} {:>4}  {}", category.id.0, category.name)?;
    }
    Ok(())
}

async fn write_memos<W: Write>(workspace: &MemoWorkspace, out: &mut W) -> io::Result<()> {
    if workspace.selection().expanded().is_none() {
        return writeln!(out, "no category is expanded");
    }
    let entry = workspace.expanded_memos().await;
    if let Some(error) = entry.error() {
        return report(out, error);
    }
    let memos = entry.data().map(Vec::as_slice).unwrap_or_default();
    if memos.is_empty() {
        return writeln!(out, "{}", "(no memos)".dimmed());
    }
    let selected = workspace.selection().selected_memo();
    for memo in memos {
        let marker = if Some(memo.id) == selected { "*" } else { " " };
        writeln!(out, "{marker} {:>4}  {}", memo.id.0, memo.title)?;
    }
    Ok(())
}

fn write_editor<W: Write>(workspace: &MemoWorkspace, out: &mut W) -> io::Result<()> {
    let Some(editor) = workspace.editor() else {
        return writeln!(out, "no memo is open");
    };
    if let Some(error) = editor.server_error() {
        writeln!(out, "{}: {error}", "error".red())?;
    }
    if !editor.is_loaded() {
        return writeln!(out, "memo {} is {}", editor.memo_id(), editor.state());
    }
    let dirty = if editor.is_dirty() { " (modified)" } else { "" };
    writeln!(out, "memo {}{dirty}", editor.memo_id())?;
    writeln!(out, "title:   {}", editor.form().title)?;
    writeln!(out, "content: {}", editor.form().content)?;
    for error in editor.validate() {
        writeln!(out, "{}: {}", error.field.to_string().yellow(), error.message)?;
    }
    Ok(())
}
