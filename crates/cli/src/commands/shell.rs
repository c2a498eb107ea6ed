//! Interactive page session.
//!
//! Plain lines go into the question form and are submitted. Lines starting
//! with `:` drive the widgets. The page is re-rendered after every change,
//! including when a request starts and when it settles.

use super::{indexing_controller, stderr_toaster};
use clap::Args;
use ikms_api::create_client;
use ikms_core::{config::AppConfig, AppResult};
use ikms_api::{AnswerResult, UploadResult};
use ikms_ui::{HomePage, QaController, Toast};
use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

const PROMPT: &str = "ikms> ";

const HELP: &str = "\
Type a question and press enter to ask it.

  :file <path>   select a PDF
  :clear         clear the selected file
  :upload        index the selected file
  :critic        toggle the context critic
  :info          toggle the critic info panel
  :chunk <id>    expand or collapse a chunk's rationale
  :log           toggle the full analysis log
  :before        toggle the before-critic context
  :after         toggle the after-critic context
  :show          render the page again
  :help          show this help
  :quit          leave the session

Commands keep working while a question or upload is running.";

/// Open an interactive session on the single page
#[derive(Args, Debug)]
pub struct ShellCommand {}

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellInput {
    Empty,
    Question(String),
    File(String),
    Clear,
    Upload,
    Critic,
    Info,
    Chunk(u32),
    Log,
    Before,
    After,
    Show,
    Help,
    Quit,
    Invalid(String),
}

impl ShellInput {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ShellInput::Empty;
        }
        let Some(command) = line.strip_prefix(':') else {
            return ShellInput::Question(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match (name, arg) {
            ("file", "") => ShellInput::Invalid("Usage: :file <path>".to_string()),
            ("file", path) => ShellInput::File(path.to_string()),
            ("chunk", id) => match id.parse() {
                Ok(id) => ShellInput::Chunk(id),
                Err(_) => ShellInput::Invalid("Usage: :chunk <id>".to_string()),
            },
            ("clear", _) => ShellInput::Clear,
            ("upload", _) => ShellInput::Upload,
            ("critic", _) => ShellInput::Critic,
            ("info", _) => ShellInput::Info,
            ("log", _) => ShellInput::Log,
            ("before", _) => ShellInput::Before,
            ("after", _) => ShellInput::After,
            ("show", _) => ShellInput::Show,
            ("help", _) => ShellInput::Help,
            ("quit", _) | ("q", _) | ("exit", _) => ShellInput::Quit,
            (other, _) => ShellInput::Invalid(format!(
                "Unknown command :{} (type :help for a list)",
                other
            )),
        }
    }
}

/// A request running in the background of the session.
type InFlight<T> = Option<Pin<Box<dyn Future<Output = AppResult<T>>>>>;

fn in_flight<T, F>(request: F) -> InFlight<T>
where
    F: Future<Output = AppResult<T>> + 'static,
{
    Some(Box::pin(request))
}

/// Wait for the request in `slot` and empty it. Never resolves when idle.
///
/// Dropping this future leaves the request in `slot` untouched.
async fn settle<T>(slot: &mut InFlight<T>) -> AppResult<T> {
    let outcome = match slot.as_mut() {
        Some(request) => request.await,
        None => return std::future::pending().await,
    };
    *slot = None;
    outcome
}

/// What woke the session loop.
enum SessionEvent {
    Line(Option<String>),
    Answered(AppResult<AnswerResult>),
    Uploaded(AppResult<UploadResult>),
    Tick,
}

impl ShellCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing shell command");

        let client = create_client(config)?;
        let toaster = stderr_toaster();
        let indexing = indexing_controller(config, client.clone(), toaster.clone());
        let qa = QaController::new(client, toaster).with_critic(config.use_critic);
        let mut page = HomePage::new(indexing, qa);

        let stdin = BufReader::new(tokio::io::stdin());
        run_session(&mut page, stdin, &mut std::io::stdout()).await?;

        tracing::info!("Shell session ended");
        Ok(())
    }
}

fn prompt(out: &mut impl Write) -> AppResult<()> {
    write!(out, "{}", PROMPT)?;
    out.flush()?;
    Ok(())
}

/// Drive `page` from `input` lines, writing renders to `out`.
///
/// Questions and uploads run in the background: the page keeps rendering
/// their loading state and keeps accepting commands until they settle. The
/// session ends on `:quit` or end of input, once nothing is in flight.
async fn run_session<R, W>(page: &mut HomePage, input: R, out: &mut W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut question: InFlight<AnswerResult> = None;
    let mut upload: InFlight<UploadResult> = None;
    let mut input_open = true;

    let mut ticker = tokio::time::interval(page.indexing().tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    write!(out, "{}", page.render())?;
    writeln!(out, "Type :help for commands.")?;
    prompt(out)?;

    loop {
        let event = tokio::select! {
            line = lines.next_line(), if input_open => SessionEvent::Line(line?),
            outcome = settle(&mut question), if question.is_some() => SessionEvent::Answered(outcome),
            outcome = settle(&mut upload), if upload.is_some() => SessionEvent::Uploaded(outcome),
            _ = ticker.tick(), if upload.is_some() => SessionEvent::Tick,
            else => break,
        };

        let line = match event {
            SessionEvent::Tick => {
                page.tick_upload();
                continue;
            }
            SessionEvent::Answered(outcome) => {
                if let Err(e) = page.finish_question(outcome) {
                    tracing::debug!("Question flow failed: {}", e);
                }
                write!(out, "{}", page.render())?;
                if input_open {
                    prompt(out)?;
                }
                continue;
            }
            SessionEvent::Uploaded(outcome) => {
                if let Err(e) = page.finish_upload(outcome) {
                    tracing::debug!("Upload flow failed: {}", e);
                }
                write!(out, "{}", page.render())?;
                if input_open {
                    prompt(out)?;
                }
                continue;
            }
            SessionEvent::Line(None) => {
                writeln!(out)?;
                input_open = false;
                continue;
            }
            SessionEvent::Line(Some(line)) => line,
        };

        let rerender = match ShellInput::parse(&line) {
            ShellInput::Empty => false,
            ShellInput::Quit => {
                input_open = false;
                if question.is_some() || upload.is_some() {
                    writeln!(out, "Waiting for running requests to finish...")?;
                }
                continue;
            }
            ShellInput::Help => {
                writeln!(out, "{}", HELP)?;
                false
            }
            ShellInput::Invalid(message) => {
                eprintln!("{}", message);
                false
            }
            ShellInput::Show => true,
            ShellInput::Question(text) => {
                if page.qa().loading() {
                    eprintln!("A question is already being processed");
                    false
                } else {
                    page.form_mut().set_text(text);
                    if let Some(call) = page.begin_form_question() {
                        question = in_flight(call.send());
                    }
                    true
                }
            }
            ShellInput::File(path) => match page.upload_widget_mut().select(&path) {
                Ok(file) => {
                    tracing::debug!("Selected {}", file.name);
                    true
                }
                Err(e) => {
                    eprintln!("{}", Toast::error(e.to_string()));
                    false
                }
            },
            ShellInput::Clear => {
                let loading = page.indexing().loading();
                page.upload_widget_mut().clear(loading)
            }
            ShellInput::Upload => {
                if page.indexing().loading() {
                    eprintln!("An upload is already running");
                    false
                } else {
                    if let Some(call) = page.begin_upload() {
                        upload = in_flight(call.send());
                        ticker.reset();
                    }
                    true
                }
            }
            ShellInput::Critic => {
                page.toggle_critic();
                true
            }
            ShellInput::Info => {
                page.form_mut().toggle_info();
                true
            }
            ShellInput::Chunk(id) => {
                page.answer_view_mut().relevance.toggle_chunk(id);
                true
            }
            ShellInput::Log => {
                page.answer_view_mut().relevance.toggle_full_log();
                true
            }
            ShellInput::Before => {
                page.answer_view_mut().comparison.toggle_before();
                true
            }
            ShellInput::After => {
                page.answer_view_mut().comparison.toggle_after();
                true
            }
        };

        if rerender {
            write!(out, "{}", page.render())?;
        }
        prompt(out)?;
    }

    Ok(())
}
