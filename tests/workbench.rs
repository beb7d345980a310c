//! Session scenarios against the public API.
//!
//! Engines are scripted: each call blocks on a semaphore so tests decide
//! exactly when an in-flight operation completes.

use async_trait::async_trait;
use nmt_workbench::export::{ClipboardWriter, DirectorySaver};
use nmt_workbench::notify::ChannelSink;
use nmt_workbench::training::{TrainingEngine, TrainingError};
use nmt_workbench::translation::{TranslationEngine, TranslationError};
use nmt_workbench::{
    CopySource, ExportError, ImportError, NotificationEvent, OperationState, Severity,
    SourceLanguage, ValidationError, Workbench, WorkbenchError,
};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;
use tokio::sync::{mpsc::UnboundedReceiver, Semaphore};

struct ScriptedTranslator {
    gate: Arc<Semaphore>,
    reply: Option<String>,
    seen: Mutex<Vec<(String, SourceLanguage)>>,
}

impl ScriptedTranslator {
    /// Replies with `reply`, or with the upper-cased input when `None`.
    fn new(gate: Arc<Semaphore>, reply: Option<&str>) -> Self {
        Self {
            gate,
            reply: reply.map(str::to_string),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen(&self) -> Vec<(String, SourceLanguage)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationEngine for ScriptedTranslator {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
    ) -> Result<String, TranslationError> {
        self.seen.lock().unwrap().push((text.to_string(), source));
        self.gate
            .acquire()
            .await
            .map_err(|e| TranslationError::Backend(e.to_string()))?
            .forget();
        Ok(self.reply.clone().unwrap_or_else(|| text.to_uppercase()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

struct ScriptedTrainer {
    gate: Arc<Semaphore>,
}

#[async_trait]
impl TrainingEngine for ScriptedTrainer {
    async fn train(&self) -> Result<(), TrainingError> {
        self.gate
            .acquire()
            .await
            .map_err(|e| TrainingError::Backend(e.to_string()))?
            .forget();
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[derive(Default)]
struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ExportError> {
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

struct Harness {
    workbench: Workbench,
    translator: Arc<ScriptedTranslator>,
    translate_gate: Arc<Semaphore>,
    train_gate: Arc<Semaphore>,
    clipboard: Arc<MemoryClipboard>,
    events: UnboundedReceiver<NotificationEvent>,
    _dir: tempfile::TempDir,
    dir: std::path::PathBuf,
}

impl Harness {
    fn new(reply: Option<&str>) -> Self {
        let dir = tempdir().unwrap();
        let path = dir.path().to_path_buf();
        let translate_gate = Arc::new(Semaphore::new(0));
        let train_gate = Arc::new(Semaphore::new(0));
        let translator = Arc::new(ScriptedTranslator::new(translate_gate.clone(), reply));
        let clipboard = Arc::new(MemoryClipboard::default());
        let (sink, events) = ChannelSink::new();

        let workbench = Workbench::builder()
            .translator(translator.clone())
            .trainer(Arc::new(ScriptedTrainer {
                gate: train_gate.clone(),
            }))
            .clipboard(clipboard.clone())
            .saver(Arc::new(DirectorySaver::new(&path)))
            .notifier(Arc::new(sink))
            .build();

        Self {
            workbench,
            translator,
            translate_gate,
            train_gate,
            clipboard,
            events,
            _dir: dir,
            dir: path,
        }
    }

    fn drain(&mut self) -> Vec<NotificationEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

#[tokio::test]
async fn test_spanish_input_translates_to_english() {
    let mut h = Harness::new(Some("Hello"));
    h.workbench.set_language(SourceLanguage::Spanish);
    h.workbench.set_text("Hola");

    let pending = h.workbench.translate().unwrap();
    assert!(h.workbench.translation_state().is_running());
    h.translate_gate.add_permits(1);

    let state = pending.wait().await;
    let OperationState::Succeeded(result) = state else {
        panic!("translation did not succeed");
    };
    assert_eq!(result.source_text, "Hola");
    assert_eq!(result.source, SourceLanguage::Spanish);
    assert_eq!(result.target, SourceLanguage::English);
    assert_eq!(h.workbench.output_text(), "Hello");
    assert!(matches!(
        h.workbench.translation_state(),
        OperationState::Succeeded(_)
    ));
    assert_eq!(
        h.translator.seen(),
        vec![("Hola".to_string(), SourceLanguage::Spanish)]
    );

    let events = h.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].severity, Severity::Info);
    assert_eq!(events[0].message, "Translation completed successfully!");
}

#[tokio::test]
async fn test_blank_input_never_enters_running() {
    let mut h = Harness::new(None);
    let mut states = h.workbench.subscribe_translation();

    for text in ["", "   ", "\n\t "] {
        h.workbench.set_text(text);
        let err = h.workbench.translate().unwrap_err();
        assert!(matches!(
            err,
            WorkbenchError::Validation(ValidationError::EmptyInput)
        ));
        assert_eq!(h.workbench.translation_state(), OperationState::Idle);
    }

    assert!(!states.has_changed().unwrap());
    assert!(h.workbench.output().is_none());
    assert!(h.translator.seen().is_empty());

    let events = h.drain();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.is_error()));
    assert!(states.borrow_and_update().label() == "idle");
}

#[tokio::test]
async fn test_blank_input_after_success_keeps_terminal_state() {
    let h = Harness::new(None);
    h.workbench.set_text("hola");
    h.translate_gate.add_permits(1);
    h.workbench.translate().unwrap().wait().await;

    h.workbench.clear();
    assert!(h.workbench.translate().is_err());
    assert!(matches!(
        h.workbench.translation_state(),
        OperationState::Succeeded(_)
    ));
    assert_eq!(h.workbench.output_text(), "HOLA");
}

#[tokio::test]
async fn test_second_trigger_rejected_while_running() {
    let mut h = Harness::new(None);
    h.workbench.set_text("primero");
    let pending = h.workbench.translate().unwrap();

    h.workbench.set_text("segundo");
    let err = h.workbench.translate().unwrap_err();
    assert!(err.is_already_running());
    assert!(h.workbench.translation_state().is_running());

    h.translate_gate.add_permits(1);
    let OperationState::Succeeded(result) = pending.wait().await else {
        panic!("first translation did not succeed");
    };
    assert_eq!(result.output_text, "PRIMERO");
    assert_eq!(h.workbench.output_text(), "PRIMERO");
    assert_eq!(h.translator.seen().len(), 1);

    let events = h.drain();
    assert_eq!(events.len(), 2);
    assert!(events[0].is_error());
    assert_eq!(events[1].severity, Severity::Info);
}

#[tokio::test]
async fn test_edits_during_flight_do_not_leak_into_result() {
    let h = Harness::new(None);
    h.workbench.set_text("antes");
    let pending = h.workbench.translate().unwrap();

    h.workbench.set_text("después");
    h.workbench.swap_languages();
    h.translate_gate.add_permits(1);

    let OperationState::Succeeded(result) = pending.wait().await else {
        panic!("translation did not succeed");
    };
    assert_eq!(result.source_text, "antes");
    assert_eq!(result.source, SourceLanguage::English);
    assert_eq!(h.workbench.text(), "después");
    assert_eq!(h.workbench.language(), SourceLanguage::Spanish);
}

#[tokio::test]
async fn test_translation_and_training_run_independently() {
    let mut h = Harness::new(None);
    h.workbench.set_text("hello");

    let translation = h.workbench.translate().unwrap();
    let training = h.workbench.train().unwrap();
    assert!(h.workbench.translation_state().is_running());
    assert!(h.workbench.training_state().is_running());
    assert!(h.workbench.train().unwrap_err().is_already_running());

    h.train_gate.add_permits(1);
    assert_eq!(training.wait().await, OperationState::Succeeded(()));
    assert!(h.workbench.translation_state().is_running());

    h.translate_gate.add_permits(1);
    assert!(matches!(
        translation.wait().await,
        OperationState::Succeeded(_)
    ));

    let messages: Vec<String> = h.drain().into_iter().map(|e| e.message).collect();
    assert!(messages.contains(&"Training process started. This may take a while...".to_string()));
    assert!(messages.contains(&"Training is already in progress.".to_string()));
    assert!(messages.contains(&"Model training completed successfully!".to_string()));
    assert!(messages.contains(&"Translation completed successfully!".to_string()));
}

#[tokio::test]
async fn test_subscribers_see_running_then_terminal() {
    let h = Harness::new(None);
    let mut states = h.workbench.subscribe_translation();
    h.workbench.set_text("hola");

    let pending = h.workbench.translate().unwrap();
    assert!(states.borrow_and_update().is_running());

    h.translate_gate.add_permits(1);
    states.changed().await.unwrap();
    assert!(matches!(
        *states.borrow_and_update(),
        OperationState::Succeeded(_)
    ));
    pending.wait().await;

    assert!(h.workbench.reset_translation());
    states.changed().await.unwrap();
    assert_eq!(*states.borrow(), OperationState::Idle);
}

#[tokio::test]
async fn test_download_with_empty_output() {
    let mut h = Harness::new(None);
    let err = h.workbench.download().unwrap_err();
    assert!(matches!(
        err,
        WorkbenchError::Export(ExportError::EmptyPayload)
    ));
    assert!(!h.dir.join("translation.txt").exists());

    let events = h.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "No translation to download");
    assert!(events[0].is_error());
}

#[tokio::test]
async fn test_download_and_copy_after_translation() {
    let mut h = Harness::new(Some("Good morning"));
    h.workbench.set_text("Buenos días");
    h.translate_gate.add_permits(1);
    h.workbench.translate().unwrap().wait().await;
    h.drain();

    let path = h.workbench.download().unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Good morning");

    h.workbench.copy(CopySource::Output).unwrap();
    assert_eq!(
        h.clipboard.contents.lock().unwrap().as_deref(),
        Some("Good morning")
    );
    h.workbench.copy(CopySource::Input).unwrap();
    assert_eq!(
        h.clipboard.contents.lock().unwrap().as_deref(),
        Some("Buenos días")
    );

    let messages: Vec<String> = h.drain().into_iter().map(|e| e.message).collect();
    assert_eq!(
        messages,
        vec![
            "Translation downloaded!",
            "Output copied to clipboard!",
            "Input copied to clipboard!",
        ]
    );
}

#[tokio::test]
async fn test_import_undecodable_file_keeps_input() {
    let mut h = Harness::new(None);
    h.workbench.set_text("texto original");

    let file = h.dir.join("broken.txt");
    std::fs::write(&file, [0x48, 0x6f, 0xff, 0xfe, 0xfd]).unwrap();

    let err = h.workbench.import_file(&file, Some("utf-8")).unwrap_err();
    assert!(matches!(
        err,
        WorkbenchError::Import(ImportError::DecodeFailure { .. })
    ));
    assert_eq!(h.workbench.text(), "texto original");

    let events = h.drain();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_error());
}

#[tokio::test]
async fn test_import_legacy_encoding() {
    let mut h = Harness::new(None);
    let file = h.dir.join("latin1.txt");
    // "año" in windows-1252
    std::fs::write(&file, [0x61, 0xf1, 0x6f]).unwrap();

    let text = h
        .workbench
        .import_file(&file, Some("windows-1252"))
        .unwrap();
    assert_eq!(text, "año");
    assert_eq!(h.workbench.text(), "año");
    assert_eq!(h.drain()[0].message, "File uploaded successfully!");
}
