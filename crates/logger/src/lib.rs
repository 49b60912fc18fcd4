use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

static LOG_LEVEL: AtomicUsize = AtomicUsize::new(0);
static SPINNER: Lazy<Mutex<Option<ProgressBar>>> = Lazy::new(|| Mutex::new(None));

/// Logger is a static class that provides logging functionality for rch.
///
/// Messages printed while a spinner is active suspend the spinner, so the
/// spinner line never gets mixed into the output.
///
/// # Examples
///
/// ```
/// use rch_logger::Logger;
/// Logger::info("Building component tree");
/// Logger::warn("Alias configuration could not be read");
/// Logger::error("Failed to parse file");
/// Logger::set_level(2);
/// Logger::debug("Resolved ./Button to src/Button.js", 1);
/// Logger::loading("Resolving components...");
/// Logger::done_loading();
/// ```
pub struct Logger;

enum Stream {
    Stdout,
    Stderr,
}

impl Logger {
    pub fn set_level(level: u8) {
        LOG_LEVEL.store(level as usize, Ordering::Relaxed);
    }

    /// Returns true if debug messages of the given level would be printed.
    pub fn enabled(level: usize) -> bool {
        LOG_LEVEL.load(Ordering::Relaxed) >= level
    }

    pub fn info(msg: &str) {
        Self::emit(Stream::Stdout, msg.blue());
    }

    /// Warnings go to stderr so they never end up in redirected tree output.
    pub fn warn(msg: &str) {
        Self::emit(Stream::Stderr, msg.yellow());
    }

    pub fn error(msg: &str) {
        Self::emit(Stream::Stderr, msg.red());
    }

    pub fn debug(msg: &str, level: usize) {
        if Self::enabled(level) {
            Self::emit(Stream::Stderr, msg.magenta());
        }
    }

    /// Shows a spinner with the given message until `done_loading` is called.
    pub fn loading(msg: &str) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈")
            .template("{spinner:.blue} {msg}")
        {
            pb.set_style(style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut slot) = SPINNER.lock() {
            *slot = Some(pb);
        }
    }

    pub fn done_loading() {
        if let Some(pb) = SPINNER.lock().ok().and_then(|mut slot| slot.take()) {
            pb.finish_and_clear();
        }
    }

    fn emit(stream: Stream, line: ColoredString) {
        let print = || match stream {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        };

        match SPINNER.lock() {
            Ok(slot) => match slot.as_ref() {
                Some(pb) => pb.suspend(print),
                None => print(),
            },
            Err(_) => print(),
        }
    }
}
