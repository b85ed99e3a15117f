//! Desktop notifications for rejected commands and failures.
//!
//! The console logs every rejected command with `command` and `reason`
//! fields. This layer turns those events, and any warning or error, into a
//! desktop notification so the operator notices a mistake even when the
//! console window is behind something else.

use notify_rust::Notification;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use crate::{APP_NAME, APP_NAME_PRETTY};

/// What a single notification says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub summary: String,
    pub body: String,
}

impl Notice {
    /// Shows the notice on the desktop. Failures are written to stderr
    /// rather than logged, so they cannot feed back into this layer.
    pub fn show(&self) {
        if let Err(e) = Notification::new()
            .appname(APP_NAME)
            .summary(&format!("{} - {}", APP_NAME_PRETTY, self.summary))
            .body(&self.body)
            .show()
        {
            eprintln!("Failed to send notification: {}", e);
        }
    }
}

/// Fields of interest pulled out of an event.
#[derive(Default)]
struct NoticeFields {
    message: Option<String>,
    command: Option<String>,
    reason: Option<String>,
}

impl NoticeFields {
    fn set(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            "command" => self.command = Some(value),
            "reason" => self.reason = Some(value),
            _ => {}
        }
    }

    /// Rejections become a notice whatever their level; other events only
    /// at warning or error.
    fn into_notice(self, level: Level) -> Option<Notice> {
        if let Some(reason) = self.reason {
            let body = match self.command {
                Some(command) => format!("{}: {}", command, reason),
                None => reason,
            };
            return Some(Notice {
                summary: "command rejected".to_string(),
                body,
            });
        }

        let summary = match level {
            Level::ERROR => "error",
            Level::WARN => "warning",
            _ => return None,
        };
        self.message.map(|body| Notice {
            summary: summary.to_string(),
            body,
        })
    }
}

impl Visit for NoticeFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.set(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.set(field, format!("{:?}", value));
    }
}

type Sink = Box<dyn Fn(Notice) + Send + Sync>;

/// Tracing layer that raises desktop notifications.
pub struct NotificationLayer {
    sink: Sink,
}

impl NotificationLayer {
    /// A layer that shows notices on the desktop.
    pub fn new() -> Self {
        Self::with_sink(|notice| notice.show())
    }

    /// A layer that hands notices to `sink` instead of the desktop.
    pub fn with_sink<F>(sink: F) -> Self
    where
        F: Fn(Notice) + Send + Sync + 'static,
    {
        Self {
            sink: Box::new(sink),
        }
    }
}

impl Default for NotificationLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Subscriber> Layer<S> for NotificationLayer {
    fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
        let mut fields = NoticeFields::default();
        event.record(&mut fields);

        if let Some(notice) = fields.into_notice(*event.metadata().level()) {
            (self.sink)(notice);
        }
    }
}
