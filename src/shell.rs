//! Line-oriented interactive session.
//!
//! Translations and training runs are spawned and left in flight; the loop
//! keeps reading commands while they complete, and completion messages arrive
//! through the notifier.

use nmt_workbench::{CopySource, OperationState, SourceLanguage, Workbench};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Commands:
  :translate            translate the current input
  :train                start a training run
  :swap                 swap the source language
  :lang <language>      set the source language (english, spanish)
  :clear                clear the input
  :load <path> [enc]    load a file into the input
  :copy input|output    copy to the clipboard
  :download             save the latest translation
  :status               show buffers and operation states
  :help                 show this help
  :quit                 leave the session
Any other line replaces the input text.";

#[derive(Debug, PartialEq)]
enum Command {
    Translate,
    Train,
    Swap,
    Lang(SourceLanguage),
    Clear,
    Load {
        path: PathBuf,
        encoding: Option<String>,
    },
    Copy(CopySource),
    Download,
    Status,
    Help,
    Quit,
    Text(String),
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Text(line.to_string()));
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        match (name, args.as_slice()) {
            ("translate" | "t", []) => Ok(Command::Translate),
            ("train", []) => Ok(Command::Train),
            ("swap", []) => Ok(Command::Swap),
            ("lang", [lang]) => Ok(Command::Lang(lang.parse()?)),
            ("clear", []) => Ok(Command::Clear),
            ("load", [path]) => Ok(Command::Load {
                path: PathBuf::from(path),
                encoding: None,
            }),
            ("load", [path, encoding]) => Ok(Command::Load {
                path: PathBuf::from(path),
                encoding: Some(encoding.to_string()),
            }),
            ("copy", [source]) => Ok(Command::Copy(source.parse()?)),
            ("download", []) => Ok(Command::Download),
            ("status", []) => Ok(Command::Status),
            ("help" | "h", []) => Ok(Command::Help),
            ("quit" | "q" | "exit", []) => Ok(Command::Quit),
            _ => Err(format!("Unknown command ':{}'. Type :help.", rest.trim())),
        }
    }
}

fn prompt(workbench: &Workbench) {
    let language = workbench.language();
    print!("[{} -> {}] > ", language.code(), language.swap().code());
    let _ = std::io::stdout().flush();
}

fn print_status(workbench: &Workbench) {
    let status = workbench.status();
    println!(
        "language: {} -> {}",
        status.language,
        status.language.swap()
    );
    println!("input:    {} chars", status.input_chars);
    println!("output:   {} chars", status.output_chars);
    println!(
        "translate: {} ({})",
        status.translation,
        workbench.translator_name()
    );
    println!("train:     {} ({})", status.training, workbench.trainer_name());
}

/// Run the session until `:quit` or end of input.
pub async fn run(workbench: &Workbench) -> anyhow::Result<()> {
    println!("nmt-workbench {}. Type :help for commands.", env!("CARGO_PKG_VERSION"));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(workbench);
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        execute(workbench, command);
    }

    let status = workbench.status();
    if workbench.translation_state().is_running() || workbench.training_state().is_running() {
        eprintln!(
            "Leaving with work in flight (translate: {}, train: {})",
            status.translation, status.training
        );
    }
    Ok(())
}

/// Errors are already reported through the notifier, so failures are only
/// logged here.
fn execute(workbench: &Workbench, command: Command) {
    match command {
        Command::Translate => match workbench.translate() {
            Ok(pending) => {
                tokio::spawn(async move {
                    if let OperationState::Succeeded(result) = pending.wait().await {
                        println!("\n{}", result.output_text);
                    }
                });
            }
            Err(e) => debug!("translate rejected: {}", e),
        },
        Command::Train => {
            if let Err(e) = workbench.train() {
                debug!("train rejected: {}", e);
            }
        }
        Command::Swap => {
            let language = workbench.swap_languages();
            println!("Source language: {}", language.display_name());
        }
        Command::Lang(language) => workbench.set_language(language),
        Command::Clear => workbench.clear(),
        Command::Load { path, encoding } => {
            if let Err(e) = workbench.import_file(&path, encoding.as_deref()) {
                debug!("load failed: {}", e);
            }
        }
        Command::Copy(source) => {
            if let Err(e) = workbench.copy(source) {
                debug!("copy failed: {}", e);
            }
        }
        Command::Download => match workbench.download() {
            Ok(path) => println!("Saved {}", path.display()),
            Err(e) => debug!("download failed: {}", e),
        },
        Command::Status => print_status(workbench),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
        Command::Text(text) => workbench.set_text(text),
    }
}
