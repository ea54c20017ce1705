//! Runs the ReportLens chat surfaces in the terminal.
//!
//! Without arguments it starts the front-page chat bot. With a file path it
//! uploads the file and opens the dashboard chat window about it.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use reportlens::core::intake::FileCandidate;
use reportlens::core::{ChangeKind, ChatChange, ChatSnapshot, ReplyDelay};
use reportlens::dashboard::{self, ChatWindow};
use reportlens::export_transcript;
use reportlens::front_page::{FrontPageChatBot, Visibility};
use reportlens::model::{Message, MimeCategory};
use reportlens::nav::Section;
use reportlens::upload_box::UploadBox;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

type Changes = mpsc::UnboundedReceiver<ChatChange>;

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let delay = match reply_delay() {
        Ok(delay) => delay,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let (change_tx, change_rx) = mpsc::unbounded_channel();
    let forward_change = move |change: &ChatChange| {
        change_tx.send(change.clone()).ok();
    };

    match env::args().nth(1) {
        Some(path) => {
            let window = ChatWindow::builder()
                .with_delay(delay)
                .on_send_message(|text| debug!(text, "question sent"))
                .on_change(forward_change)
                .build();
            run_dashboard(&path, window, change_rx).await;
        }
        None => {
            let bot = FrontPageChatBot::builder()
                .with_delay(delay)
                .on_change(forward_change)
                .build();
            run_front_page(bot, change_rx).await;
        }
    }
}

async fn run_front_page(mut bot: FrontPageChatBot, mut changes: Changes) {
    println!(
        "{}",
        "Stocks Labs AI. Type /open to chat with the assistant, /quit to leave."
            .dimmed()
    );

    loop {
        let Some(line) = prompt(front_page_prompt(bot.visibility())).await
        else {
            break;
        };
        let (command, arg) = split_command(&line);

        match command {
            "" => continue,
            "/quit" => break,
            "/open" => {
                let was_open = bot.visibility().is_open();
                bot.open();
                if !was_open {
                    let Ok(snapshot) = bot.snapshot().await else {
                        break;
                    };
                    snapshot.messages.iter().for_each(print_message);
                }
            }
            "/min" => bot.toggle_minimized(),
            "/close" => bot.close(),
            "/export" => {
                let Ok(snapshot) = bot.snapshot().await else {
                    break;
                };
                print_export(&snapshot);
            }
            "/goto" => match arg.parse::<Section>() {
                Ok(section) => println!("Scrolling to #{}", section.id()),
                Err(err) => eprintln!("{err}"),
            },
            _ if command.starts_with('/') => {
                eprintln!("unknown command {command}");
            }
            _ => match bot.visibility() {
                Visibility::Closed => {
                    println!("{}", "The chat is closed, type /open.".dimmed());
                }
                Visibility::Minimized => {
                    println!(
                        "{}",
                        "The chat is minimized, type /min.".dimmed()
                    );
                }
                Visibility::Expanded => {
                    bot.submit(line.trim());
                    if wait_for_reply(&mut changes).await.is_none() {
                        break;
                    }
                }
            },
        }
    }
}

async fn run_dashboard(
    path: &str,
    mut window: ChatWindow,
    mut changes: Changes,
) {
    let candidate = match file_candidate(path).await {
        Ok(candidate) => candidate,
        Err(err) => {
            eprintln!("cannot read {path}: {err}");
            return;
        }
    };

    let mut upload_box = UploadBox::builder()
        .on_file_upload(|descriptor| {
            info!(file_name = %descriptor.file_name, "file uploaded");
        })
        .build();
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(progress_style());
    progress_bar.set_message(format!("📄 Uploading {}...", candidate.name));
    progress_bar.enable_steady_tick(Duration::from_millis(100));
    let uploaded = upload_box.select(candidate).await;
    progress_bar.finish_and_clear();

    let descriptor = match uploaded {
        Ok(descriptor) => descriptor,
        Err(err) => {
            eprintln!("{}{err}", BAR_CHAR.bright_red());
            println!("{}", dashboard::EMPTY_TITLE.bold());
            println!("{}", dashboard::EMPTY_BODY.dimmed());
            return;
        }
    };

    window.attach(descriptor);
    if let Some((file_name, summary)) = window.header() {
        println!("{}", file_name.bright_white().bold());
        println!("{}", summary.dimmed());
    }
    let Some(snapshot) = window.snapshot().await else {
        return;
    };
    snapshot.messages.iter().for_each(print_message);

    loop {
        let Some(line) = prompt("> ").await else {
            break;
        };
        let (command, _) = split_command(&line);

        match command {
            "" => continue,
            "/quit" => break,
            "/help" => {
                window.toggle_help();
                for tip in window.help_tips().unwrap_or_default() {
                    println!("{}{}", BAR_CHAR.bright_yellow(), tip);
                }
            }
            "/export" => {
                let Some(snapshot) = window.snapshot().await else {
                    break;
                };
                print_export(&snapshot);
            }
            _ if command.starts_with('/') => {
                eprintln!("unknown command {command}");
            }
            _ => {
                window.submit(line.trim());
                match wait_for_reply(&mut changes).await {
                    Some(true) => {}
                    Some(false) => println!(
                        "{}",
                        "No answer yet. The analysis backend is not connected."
                            .dimmed()
                    ),
                    None => break,
                }
            }
        }
    }
}

/// Shows a spinner until the pending reply settles.
///
/// Returns whether the assistant answered, or `None` if the chat stopped.
async fn wait_for_reply(changes: &mut Changes) -> Option<bool> {
    let progress_style = progress_style();
    let mut progress_bar = None;
    let mut answered = false;

    loop {
        progress_bar
            .get_or_insert_with(|| {
                let progress_bar = ProgressBar::new_spinner();
                progress_bar.set_style(progress_style.clone());
                progress_bar.set_message("🤔 Thinking...");
                progress_bar
            })
            .inc(1);

        let sleep = sleep(Duration::from_millis(100));
        let change = select! {
            change = changes.recv() => change?,
            _ = sleep => {
                continue;
            }
        };

        match change.kind {
            ChangeKind::MessageAppended(msg) if msg.is_assistant() => {
                if let Some(progress_bar) = progress_bar.take() {
                    progress_bar.finish_and_clear();
                }
                print_message(&msg);
                answered = true;
            }
            ChangeKind::PendingChanged(false) => {
                if let Some(progress_bar) = progress_bar.take() {
                    progress_bar.finish_and_clear();
                }
                return Some(answered);
            }
            _ => {}
        }
    }
}

fn print_message(msg: &Message) {
    if msg.is_assistant() {
        println!(
            "{}🤖 {} {}",
            BAR_CHAR.bright_cyan(),
            msg.text.bright_white(),
            msg.sent_at.dimmed()
        );
        if let Some(pages) = &msg.page_references {
            println!(
                "{}{} {}",
                BAR_CHAR.bright_cyan(),
                "Referenced pages:".dimmed(),
                pages.join(", ")
            );
        }
    } else {
        println!(
            "{}{} {}",
            BAR_CHAR.bright_green(),
            msg.text,
            msg.sent_at.dimmed()
        );
    }
}

fn print_export(snapshot: &ChatSnapshot) {
    match export_transcript(snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => error!("cannot export transcript: {err}"),
    }
}

fn front_page_prompt(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Closed => "[💬] ",
        Visibility::Minimized => "[chat minimized] ",
        Visibility::Expanded => "> ",
    }
}

fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((command, arg)) if command.starts_with('/') => {
            (command, arg.trim())
        }
        _ => (line, ""),
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
}

async fn file_candidate(path: &str) -> io::Result<FileCandidate> {
    let metadata = tokio::fs::metadata(path).await?;
    let path = Path::new(path);
    let name = path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    // The picker's MIME type comes from the extension.
    let mime_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(MimeCategory::from_extension)
        .map_or("application/octet-stream", |category| {
            category.canonical_mime()
        });
    Ok(FileCandidate::new(name, mime_type, metadata.len()))
}

fn reply_delay() -> Result<ReplyDelay, String> {
    let default = ReplyDelay::default();
    let min = env_millis("REPORTLENS_MIN_DELAY_MS")?.unwrap_or(default.min());
    let max = env_millis("REPORTLENS_MAX_DELAY_MS")?.unwrap_or(default.max());
    Ok(ReplyDelay::between(min, max))
}

fn env_millis(name: &str) -> Result<Option<Duration>, String> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(|millis| Some(Duration::from_millis(millis)))
            .map_err(|err| {
                format!("{name} must be a number of milliseconds: {err}")
            }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(format!("{name}: {err}")),
    }
}

async fn prompt(prompt: &str) -> Option<String> {
    print!("{prompt}");
    std::io::stdout().flush().ok();
    read_line().await
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
