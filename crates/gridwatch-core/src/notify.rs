//! Notifier backends and recipient resolution.

use crate::settings::{NotifierKind, Settings};
use crate::traits::Notifier;
use std::io::Write;
use std::path::PathBuf;

const SENDER: &str = "gridwatch";

/// Logs each message as a warning.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, recipient: &str, subject: &str, body: &str) {
        tracing::warn!(recipient, subject, "{}", body);
    }
}

/// Appends each message to a mailbox-style text file.
pub struct OutboxNotifier {
    path: PathBuf,
}

impl OutboxNotifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        OutboxNotifier { path: path.into() }
    }

    fn append(&self, recipient: &str, subject: &str, body: &str) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "From: {}", SENDER)?;
        writeln!(file, "To: {}", recipient)?;
        writeln!(file, "Subject: {}", subject)?;
        writeln!(file, "Date: {}", chrono::Local::now().to_rfc2822())?;
        writeln!(file)?;
        writeln!(file, "{}", body)?;
        writeln!(file)?;
        Ok(())
    }
}

impl Notifier for OutboxNotifier {
    fn notify(&self, recipient: &str, subject: &str, body: &str) {
        match self.append(recipient, subject, body) {
            Ok(()) => tracing::info!(recipient, path = %self.path.display(), "queued alert"),
            Err(err) => tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "failed to queue alert"
            ),
        }
    }
}

/// Discards every message.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _recipient: &str, subject: &str, _body: &str) {
        tracing::debug!(subject, "notifier disabled; alert dropped");
    }
}

/// Build the notifier selected in settings. `outbox` is the outbox file path.
pub fn notifier_for(settings: &Settings, outbox: PathBuf) -> Box<dyn Notifier> {
    match settings.notifier {
        NotifierKind::Log => Box::new(LogNotifier),
        NotifierKind::Outbox => Box::new(OutboxNotifier::new(outbox)),
        NotifierKind::None => Box::new(NullNotifier),
    }
}

/// Alert recipient: the configured override, else the acting user as `user@host`.
pub fn resolve_recipient(configured: &str) -> String {
    let configured = configured.trim();
    if !configured.is_empty() {
        return configured.to_string();
    }
    let host = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());
    format!("{}@{}", whoami::username(), host)
}
