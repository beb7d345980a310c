//! Session orchestrator.
//!
//! [`Workbench`] owns the input and output buffers, the language selector and
//! the two operation state machines. Presentation layers talk only to it:
//! synchronous edits and exports go through `&self` methods, long-running
//! work comes back as a [`Pending`] handle plus state transitions on the
//! operation's watch channel.

use crate::buffer::{InputBuffer, OutputBuffer, TranslationResult};
use crate::config::Config;
use crate::error::WorkbenchError;
use crate::export::{
    ClipboardExporter, ClipboardWriter, CopySource, DirectorySaver, ExportError, FileExporter,
    FileSaver, SystemClipboard, DEFAULT_EXPORT_FILENAME,
};
use crate::import::FileImporter;
use crate::language::{LanguagePairSelector, SourceLanguage};
use crate::notify::{NotificationEvent, NotificationSink, TracingSink};
use crate::operation::{
    lock, OperationState, Pending, TrainingOperation, TranslationOperation,
};
use crate::training::{self, SimulatedTrainer, TrainingEngine};
use crate::translation::{self, SimulatedTranslator, TranslationEngine};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Input side of the session. The selector is the source of truth for the
/// language; the buffer's tag is kept in step with it.
#[derive(Debug, Default)]
struct Session {
    input: InputBuffer,
    selector: LanguagePairSelector,
}

impl Session {
    fn new(language: SourceLanguage) -> Self {
        Self {
            input: InputBuffer::new(language),
            selector: LanguagePairSelector::new(language),
        }
    }

    fn set_language(&mut self, language: SourceLanguage) {
        self.selector.set(language);
        self.input.set_language(language);
    }
}

/// Point-in-time summary for status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbenchStatus {
    pub language: SourceLanguage,
    pub input_chars: usize,
    pub output_chars: usize,
    pub translation: &'static str,
    pub training: &'static str,
}

/// Builder for [`Workbench`]; every capability has a default.
pub struct WorkbenchBuilder {
    language: SourceLanguage,
    translator: Option<Arc<dyn TranslationEngine>>,
    trainer: Option<Arc<dyn TrainingEngine>>,
    clipboard: Option<Arc<dyn ClipboardWriter>>,
    saver: Option<Arc<dyn FileSaver>>,
    notifier: Option<Arc<dyn NotificationSink>>,
    export_filename: String,
}

impl Default for WorkbenchBuilder {
    fn default() -> Self {
        Self {
            language: SourceLanguage::default(),
            translator: None,
            trainer: None,
            clipboard: None,
            saver: None,
            notifier: None,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

impl WorkbenchBuilder {
    /// Start from the engines and export settings in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            language: config.session.language,
            translator: Some(translation::from_config(&config.translation)),
            trainer: Some(training::from_config(&config.training)),
            saver: Some(Arc::new(DirectorySaver::new(config.export.directory_path()))),
            export_filename: config.export.filename.clone(),
            ..Self::default()
        }
    }

    pub fn language(mut self, language: SourceLanguage) -> Self {
        self.language = language;
        self
    }

    pub fn translator(mut self, engine: Arc<dyn TranslationEngine>) -> Self {
        self.translator = Some(engine);
        self
    }

    pub fn trainer(mut self, engine: Arc<dyn TrainingEngine>) -> Self {
        self.trainer = Some(engine);
        self
    }

    pub fn clipboard(mut self, clipboard: Arc<dyn ClipboardWriter>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn saver(mut self, saver: Arc<dyn FileSaver>) -> Self {
        self.saver = Some(saver);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn export_filename(mut self, filename: impl Into<String>) -> Self {
        self.export_filename = filename.into();
        self
    }

    pub fn build(self) -> Workbench {
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(TracingSink));
        let translator = self
            .translator
            .unwrap_or_else(|| Arc::new(SimulatedTranslator::default()));
        let trainer = self
            .trainer
            .unwrap_or_else(|| Arc::new(SimulatedTrainer::default()));
        let clipboard = self
            .clipboard
            .unwrap_or_else(|| Arc::new(SystemClipboard::new()));
        let saver = self
            .saver
            .unwrap_or_else(|| Arc::new(DirectorySaver::new(".")));

        let output = Arc::new(Mutex::new(OutputBuffer::default()));

        debug!(
            "Workbench ready (translator: {}, trainer: {}, language: {})",
            translator.name(),
            trainer.name(),
            self.language
        );

        Workbench {
            session: Mutex::new(Session::new(self.language)),
            translation: TranslationOperation::new(
                translator,
                Arc::clone(&output),
                Arc::clone(&notifier),
            ),
            training: TrainingOperation::new(trainer, Arc::clone(&notifier)),
            output,
            importer: FileImporter,
            clipboard: ClipboardExporter::new(clipboard, Arc::clone(&notifier)),
            files: FileExporter::new(saver, Arc::clone(&notifier)),
            notifier,
            export_filename: self.export_filename,
        }
    }
}

/// One translation session.
pub struct Workbench {
    session: Mutex<Session>,
    output: Arc<Mutex<OutputBuffer>>,
    translation: TranslationOperation,
    training: TrainingOperation,
    importer: FileImporter,
    clipboard: ClipboardExporter,
    files: FileExporter,
    notifier: Arc<dyn NotificationSink>,
    export_filename: String,
}

impl Workbench {
    pub fn builder() -> WorkbenchBuilder {
        WorkbenchBuilder::default()
    }

    // ---------------------------------------------------------------
    // Input buffer and language
    // ---------------------------------------------------------------

    /// Snapshot of the input buffer.
    pub fn input(&self) -> InputBuffer {
        lock(&self.session).input.clone()
    }

    pub fn text(&self) -> String {
        lock(&self.session).input.text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        lock(&self.session).input.set_text(text);
    }

    /// Empty the input. Output and language are left alone.
    pub fn clear(&self) {
        lock(&self.session).input.clear();
        self.notifier.notify(&NotificationEvent::info("Input cleared!"));
    }

    pub fn language(&self) -> SourceLanguage {
        lock(&self.session).selector.current()
    }

    pub fn set_language(&self, language: SourceLanguage) {
        lock(&self.session).set_language(language);
    }

    /// Toggle the source language. Only the label changes; the input text is
    /// not moved or re-translated.
    pub fn swap_languages(&self) -> SourceLanguage {
        let mut session = lock(&self.session);
        let language = session.selector.swap();
        session.input.set_language(language);
        debug!("Source language swapped to {}", language);
        language
    }

    /// Replace the input with decoded file contents.
    ///
    /// On failure the input is left unchanged.
    pub fn import_bytes(
        &self,
        contents: &[u8],
        declared_encoding: Option<&str>,
    ) -> Result<String, WorkbenchError> {
        let decoded = self.importer.decode(contents, declared_encoding);
        self.apply_import(decoded)
    }

    /// Read a file and replace the input with its contents.
    pub fn import_file(
        &self,
        path: &Path,
        declared_encoding: Option<&str>,
    ) -> Result<String, WorkbenchError> {
        info!("Importing {}", path.display());
        let decoded = self.importer.read_file(path, declared_encoding);
        self.apply_import(decoded)
    }

    fn apply_import(
        &self,
        decoded: Result<String, crate::import::ImportError>,
    ) -> Result<String, WorkbenchError> {
        match decoded {
            Ok(text) => {
                lock(&self.session).input.set_text(text.clone());
                self.notifier
                    .notify(&NotificationEvent::info("File uploaded successfully!"));
                Ok(text)
            }
            Err(e) => {
                warn!("Import failed: {}", e);
                self.notifier
                    .notify(&NotificationEvent::error(format!("Could not load file: {}", e)));
                Err(e.into())
            }
        }
    }

    // ---------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------

    /// Translate the current input. See [`TranslationOperation::trigger`].
    pub fn translate(&self) -> Result<Pending<TranslationResult>, WorkbenchError> {
        let snapshot = self.input();
        self.translation.trigger(&snapshot)
    }

    /// Start a training run. See [`TrainingOperation::trigger`].
    pub fn train(&self) -> Result<Pending<()>, WorkbenchError> {
        self.training.trigger()
    }

    pub fn translation_state(&self) -> OperationState<TranslationResult> {
        self.translation.state()
    }

    pub fn training_state(&self) -> OperationState<()> {
        self.training.state()
    }

    pub fn subscribe_translation(&self) -> watch::Receiver<OperationState<TranslationResult>> {
        self.translation.operation().subscribe()
    }

    pub fn subscribe_training(&self) -> watch::Receiver<OperationState<()>> {
        self.training.operation().subscribe()
    }

    /// Return a finished translation to Idle.
    pub fn reset_translation(&self) -> bool {
        self.translation.operation().reset()
    }

    /// Return a finished training run to Idle.
    pub fn reset_training(&self) -> bool {
        self.training.operation().reset()
    }

    // ---------------------------------------------------------------
    // Output and exports
    // ---------------------------------------------------------------

    /// Latest successful translation, if any.
    pub fn output(&self) -> Option<TranslationResult> {
        lock(&self.output).latest().cloned()
    }

    pub fn output_text(&self) -> String {
        lock(&self.output).output_text().to_string()
    }

    /// Copy the input or the latest translation to the clipboard.
    pub fn copy(&self, source: CopySource) -> Result<(), WorkbenchError> {
        let text = match source {
            CopySource::Input => self.text(),
            CopySource::Output => {
                let text = self.output_text();
                if text.is_empty() {
                    self.notifier
                        .notify(&NotificationEvent::error("No translation to copy"));
                    return Err(ExportError::EmptyPayload.into());
                }
                text
            }
        };
        self.clipboard.copy(source, &text)?;
        Ok(())
    }

    /// Save the latest translation under the configured filename.
    pub fn download(&self) -> Result<PathBuf, WorkbenchError> {
        let filename = self.export_filename.clone();
        self.download_as(&filename)
    }

    pub fn download_as(&self, filename: &str) -> Result<PathBuf, WorkbenchError> {
        let text = self.output_text();
        Ok(self.files.download(&text, filename)?)
    }

    pub fn status(&self) -> WorkbenchStatus {
        let (language, input_chars) = {
            let session = lock(&self.session);
            (session.selector.current(), session.input.text.chars().count())
        };
        WorkbenchStatus {
            language,
            input_chars,
            output_chars: lock(&self.output).output_text().chars().count(),
            translation: self.translation.state().label(),
            training: self.training.state().label(),
        }
    }

    pub fn translator_name(&self) -> &str {
        self.translation.engine_name()
    }

    pub fn trainer_name(&self) -> &str {
        self.training.engine_name()
    }
}
