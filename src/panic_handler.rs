//! Panic hook that leaves a crash report behind.
//!
//! Reports are appended to `crash.log` in the data directory so failures in
//! long interactive sessions can be diagnosed after the terminal is gone.

use crate::config::Config;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::panic::{self, PanicHookInfo};
use std::path::PathBuf;

/// Install the crash-report hook. Call once, early in `main`.
///
/// Panics inside engine tasks are caught by the operation runner and turned
/// into Failed states; this hook still records them.
pub fn install() {
    panic::set_hook(Box::new(|info| {
        handle_panic(info);
    }));
}

fn crash_report_path() -> Option<PathBuf> {
    Config::data_dir().ok().map(|dir| dir.join("crash.log"))
}

fn handle_panic(info: &PanicHookInfo) {
    let report = format_crash_report(info);
    eprintln!("{}", report);

    let Some(path) = crash_report_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
        let _ = file.write_all(b"\n----------------------------------------\n");
        let _ = file.write_all(report.as_bytes());
        let _ = file.flush();
        eprintln!("Crash report appended to: {}", path.display());
    }
}

fn panic_message(info: &PanicHookInfo) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

fn format_crash_report(info: &PanicHookInfo) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

    let thread = std::thread::current();
    let thread_name = thread.name().unwrap_or("<unnamed>").to_string();

    let location = info
        .location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
        .unwrap_or_else(|| "unknown".to_string());

    let backtrace = std::backtrace::Backtrace::capture();

    format!(
        "nmt-workbench {} panicked\nTime:     {}\nThread:   {} ({:?})\nLocation: {}\nMessage:  {}\n\nBacktrace:\n{}\n",
        env!("CARGO_PKG_VERSION"),
        timestamp,
        thread_name,
        thread.id(),
        location,
        panic_message(info),
        backtrace,
    )
}
