//! Process-wide output redirection as scoped state
//!
//! The global subscriber writes through a [`LogRouter`]. While an
//! [`OutputRedirect`] is held, every line goes into a [`LogBridge`];
//! once it is released (or dropped) lines go back to stdout/stderr.

use std::io::{self, Write};
use std::sync::{Arc, RwLock};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

use crate::bridge::{LogBridge, OriginTag};

/// Writer factory that follows the current redirect target
#[derive(Debug, Clone, Default)]
pub struct LogRouter {
    target: Arc<RwLock<Option<LogBridge>>>,
}

impl LogRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route all output into `bridge` until the returned guard is released
    pub fn redirect(&self, bridge: LogBridge) -> OutputRedirect {
        let previous = self.replace(Some(bridge));
        OutputRedirect {
            router: self.clone(),
            previous,
            active: true,
        }
    }

    /// Whether output currently goes into a bridge
    pub fn is_redirected(&self) -> bool {
        self.target.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Writer for one line of the given origin
    pub fn writer_for(&self, origin: OriginTag) -> RoutedWriter {
        let target = self.target.read().unwrap_or_else(|e| e.into_inner());
        match (target.as_ref(), origin) {
            (Some(bridge), _) => RoutedWriter::Bridge {
                bridge: bridge.clone(),
                origin,
            },
            (None, OriginTag::Out) => RoutedWriter::Stdout(io::stdout()),
            (None, OriginTag::Err) => RoutedWriter::Stderr(io::stderr()),
        }
    }

    fn replace(&self, next: Option<LogBridge>) -> Option<LogBridge> {
        let mut target = self.target.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *target, next)
    }
}

impl<'a> MakeWriter<'a> for LogRouter {
    type Writer = RoutedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer_for(OriginTag::Out)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        // WARN and ERROR are the error stream
        let origin = if *meta.level() <= Level::WARN {
            OriginTag::Err
        } else {
            OriginTag::Out
        };
        self.writer_for(origin)
    }
}

/// Destination picked for one write
pub enum RoutedWriter {
    Bridge { bridge: LogBridge, origin: OriginTag },
    Stdout(io::Stdout),
    Stderr(io::Stderr),
}

impl Write for RoutedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            RoutedWriter::Bridge { bridge, origin } => {
                bridge.write(String::from_utf8_lossy(buf), *origin);
                Ok(buf.len())
            }
            RoutedWriter::Stdout(out) => out.write(buf),
            RoutedWriter::Stderr(err) => err.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            RoutedWriter::Bridge { bridge, .. } => {
                bridge.flush();
                Ok(())
            }
            RoutedWriter::Stdout(out) => out.flush(),
            RoutedWriter::Stderr(err) => err.flush(),
        }
    }
}

/// Held redirect; restores the previous target exactly once
#[must_use = "dropping the redirect restores output immediately"]
pub struct OutputRedirect {
    router: LogRouter,
    previous: Option<LogBridge>,
    active: bool,
}

impl OutputRedirect {
    /// Restore the previous target. Returns `true` only on the call that
    /// actually released it.
    pub fn release(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.router.replace(self.previous.take());
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for OutputRedirect {
    fn drop(&mut self) {
        self.release();
    }
}
