//! Step log output
//!
//! `Logger` is the console sink the step and the restorer write to.
//! Debug lines are suppressed until `enable_debug_log(true)` is called.

use console::style;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Handle for swapping the process-wide tracing filter
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Console output sink with a debug-verbosity toggle
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn done(&self, message: &str);

    /// Printed only while debug logging is enabled
    fn debug(&self, message: &str);

    /// Print an empty line
    fn println(&self);

    fn enable_debug_log(&self, enable: bool);
    fn is_debug_enabled(&self) -> bool;
}

/// Logger writing styled lines to stdout
pub struct ConsoleLogger {
    debug: AtomicBool,
    filter: Option<(FilterHandle, String)>,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            debug: AtomicBool::new(false),
            filter: None,
        }
    }

    /// Also raise the tracing filter to debug when debug logging is enabled.
    ///
    /// `base_filter` is restored when debug logging is switched off again.
    pub fn with_filter_handle(
        mut self,
        handle: FilterHandle,
        base_filter: impl Into<String>,
    ) -> Self {
        self.filter = Some((handle, base_filter.into()));
        self
    }

    fn apply_filter(&self, enable: bool) {
        let Some((handle, base)) = &self.filter else {
            return;
        };
        let directive = if enable {
            "restore_gradle_cache=debug".to_string()
        } else {
            base.clone()
        };
        if let Err(e) = handle.modify(|filter| *filter = EnvFilter::new(&directive)) {
            tracing::warn!("Failed to update log filter: {}", e);
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn warn(&self, message: &str) {
        println!("{}", style(message).yellow());
    }

    fn error(&self, message: &str) {
        println!("{}", style(message).red());
    }

    fn done(&self, message: &str) {
        println!("{}", style(message).green());
    }

    fn debug(&self, message: &str) {
        if self.is_debug_enabled() {
            println!("{}", style(message).dim());
        }
    }

    fn println(&self) {
        println!();
    }

    fn enable_debug_log(&self, enable: bool) {
        self.debug.store(enable, Ordering::SeqCst);
        self.apply_filter(enable);
    }

    fn is_debug_enabled(&self) -> bool {
        self.debug.load(Ordering::SeqCst)
    }
}

/// Severity of a recorded line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Done,
    Debug,
}

/// Logger that keeps every line in memory
#[derive(Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(Level, String)>>,
    debug: AtomicBool,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded lines
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Just the message text, blank lines included
    pub fn lines(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, line)| line).collect()
    }

    fn push(&self, level: Level, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((level, message.to_string()));
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }

    fn done(&self, message: &str) {
        self.push(Level::Done, message);
    }

    fn debug(&self, message: &str) {
        if self.is_debug_enabled() {
            self.push(Level::Debug, message);
        }
    }

    fn println(&self) {
        self.push(Level::Info, "");
    }

    fn enable_debug_log(&self, enable: bool) {
        self.debug.store(enable, Ordering::SeqCst);
    }

    fn is_debug_enabled(&self) -> bool {
        self.debug.load(Ordering::SeqCst)
    }
}
