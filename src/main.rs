use anyhow::bail;
use clap::{Parser, Subcommand};
use nmt_workbench::config::{self, Config};
use nmt_workbench::export::DirectorySaver;
use nmt_workbench::notify::{ConsoleSink, DesktopSink, Fanout};
use nmt_workbench::{panic_handler, CopySource, OperationState, SourceLanguage, WorkbenchBuilder};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod shell;

#[derive(Parser)]
#[command(name = "nmt-workbench")]
#[command(author, version, about = "English/Spanish translation workbench", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate text once and print the result
    Translate {
        /// Text to translate
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Encoding label of --file (utf-8, windows-1252, utf-16le, ...)
        #[arg(long, requires = "file")]
        encoding: Option<String>,

        /// Source language (english, spanish)
        #[arg(long)]
        from: Option<String>,

        /// Swap the source language before translating
        #[arg(long)]
        swap: bool,

        /// Copy the translation to the clipboard
        #[arg(long)]
        copy: bool,

        /// Save the translation to a file
        #[arg(long)]
        download: bool,

        /// Directory for --download (overrides the configured one)
        #[arg(long, requires = "download")]
        output_dir: Option<PathBuf>,
    },

    /// Run one training job and wait for it
    Train,

    /// Interactive session
    Shell,

    /// Configure settings
    Config {
        /// Set the default source language (english, spanish)
        #[arg(long)]
        language: Option<String>,

        /// Set the translation engine (simulated, ollama)
        #[arg(long)]
        engine: Option<String>,

        /// Set the simulated translation delay in milliseconds
        #[arg(long)]
        delay: Option<u64>,

        /// Set the download directory
        #[arg(long)]
        export_dir: Option<String>,

        /// Enable/disable desktop notifications
        #[arg(long)]
        desktop: Option<bool>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("nmt_workbench=debug")
    } else {
        EnvFilter::try_new(format!("nmt_workbench={}", level))
            .unwrap_or_else(|_| EnvFilter::new("nmt_workbench=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_workbench(config: &Config, output_dir: Option<PathBuf>) -> nmt_workbench::Workbench {
    let mut notifier = Fanout::new().with(Arc::new(ConsoleSink));
    if config.notifications.desktop {
        notifier = notifier.with(Arc::new(DesktopSink::default()));
    }

    let mut builder = WorkbenchBuilder::from_config(config).notifier(Arc::new(notifier));
    if let Some(dir) = output_dir {
        builder = builder.saver(Arc::new(DirectorySaver::new(dir)));
    }
    builder.build()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    panic_handler::install();

    let cli = Cli::parse();
    let config = config::load_at(cli.config.as_deref())?;
    init_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Commands::Translate {
            text,
            file,
            encoding,
            from,
            swap,
            copy,
            download,
            output_dir,
        } => {
            let workbench = build_workbench(&config, output_dir);

            if let Some(lang) = from {
                let lang = lang.parse::<SourceLanguage>().map_err(|e| anyhow::anyhow!(e))?;
                workbench.set_language(lang);
            }
            if swap {
                workbench.swap_languages();
            }

            if let Some(path) = file {
                workbench.import_file(&path, encoding.as_deref())?;
            } else if let Some(text) = text {
                workbench.set_text(text);
            }

            info!(
                "Translating from {} with {}",
                workbench.language(),
                workbench.translator_name()
            );
            match workbench.translate()?.wait().await {
                OperationState::Succeeded(result) => println!("{}", result.output_text),
                OperationState::Failed(e) => bail!(e),
                other => bail!("translation ended in unexpected state: {}", other.label()),
            }

            if copy {
                workbench.copy(CopySource::Output)?;
            }
            if download {
                let path = workbench.download()?;
                debug!("Saved to {}", path.display());
            }
        }

        Commands::Train => {
            let workbench = build_workbench(&config, None);
            match workbench.train()?.wait().await {
                OperationState::Succeeded(()) => {}
                OperationState::Failed(e) => bail!(e),
                other => bail!("training ended in unexpected state: {}", other.label()),
            }
        }

        Commands::Shell => {
            let workbench = build_workbench(&config, None);
            shell::run(&workbench).await?;
        }

        Commands::Config {
            language,
            engine,
            delay,
            export_dir,
            desktop,
            show,
        } => {
            if show {
                config::show(cli.config.as_deref())?;
            } else {
                config::update(
                    cli.config.as_deref(),
                    language,
                    engine,
                    delay,
                    export_dir,
                    desktop,
                )?;
            }
        }
    }

    Ok(())
}
