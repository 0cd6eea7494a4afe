//! Explicit logger handle.
//!
//! Nothing in the library installs a global subscriber. Components that log
//! hold a [`Logger`] and emit their events inside its dispatcher scope, so
//! tests and embedders decide where the events go.

use crate::core::config::LogLevel;
use std::io::IsTerminal;
use tracing::dispatcher::{self, Dispatch};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Cloneable handle to a tracing dispatcher
#[derive(Clone, Debug)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    /// Wrap an existing dispatcher
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Logger that drops every event
    pub fn disabled() -> Self {
        Self::new(Dispatch::none())
    }

    /// Compact human-readable logger writing to stderr
    pub fn stderr(level: LogLevel) -> Self {
        let filter = EnvFilter::new(level.as_str());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .compact();

        let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
        Self::new(Dispatch::new(subscriber))
    }

    /// Run `f` with this logger as the current dispatcher
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }
}
