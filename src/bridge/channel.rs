//! Ordered log channel from any thread to the control thread
//!
//! Every producer shares one unbounded mpsc queue, so the consumer sees
//! lines in the order they were admitted, whichever thread wrote them.

use tokio::sync::mpsc;

/// Which output stream a line was written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginTag {
    /// Normal diagnostic output
    Out,
    /// Error output
    Err,
}

impl OriginTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            OriginTag::Out => "OUT",
            OriginTag::Err => "ERR",
        }
    }
}

impl std::fmt::Display for OriginTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One non-empty line of agent or console output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    text: String,
    origin: OriginTag,
}

impl LogEvent {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> OriginTag {
        self.origin
    }

    pub fn is_error(&self) -> bool {
        self.origin == OriginTag::Err
    }
}

/// Create a connected bridge/stream pair
pub fn log_bridge() -> (LogBridge, LogStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (LogBridge { tx }, LogStream { rx })
}

/// Producer side; cheap to clone and safe to use from any thread
#[derive(Debug, Clone)]
pub struct LogBridge {
    tx: mpsc::UnboundedSender<LogEvent>,
}

impl LogBridge {
    /// Enqueue one line.
    ///
    /// Trailing whitespace is stripped; a line that is empty afterwards is
    /// dropped without taking a place in the stream. Returns whether an
    /// event was enqueued. Never blocks and never fails: once the consumer
    /// is gone, lines are discarded.
    pub fn write(&self, text: impl AsRef<str>, origin: OriginTag) -> bool {
        let text = text.as_ref().trim_end();
        if text.is_empty() {
            return false;
        }
        self.tx
            .send(LogEvent {
                text: text.to_string(),
                origin,
            })
            .is_ok()
    }

    /// Nothing is buffered on the producer side
    pub fn flush(&self) {}

    /// Whether the consumer side has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side, owned by the control thread
#[derive(Debug)]
pub struct LogStream {
    rx: mpsc::UnboundedReceiver<LogEvent>,
}

impl LogStream {
    /// Wait for the next line; `None` once every bridge is dropped
    pub async fn recv(&mut self) -> Option<LogEvent> {
        self.rx.recv().await
    }

    /// Take up to `max` lines that are already queued, without waiting
    pub fn drain(&mut self, max: usize) -> Vec<LogEvent> {
        let mut batch = Vec::new();
        while batch.len() < max {
            match self.rx.try_recv() {
                Ok(event) => batch.push(event),
                Err(_) => break,
            }
        }
        batch
    }
}
