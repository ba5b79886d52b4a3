//! Completion notification sinks.

use std::io::Write;

use crate::config::NotificationsConfig;

/// Invoked exactly once per Running -> Completed transition.
///
/// Infallible by contract: implementations swallow their own failures and
/// must not block. A sink that cannot ring its bell stays silent; the
/// Completed transition has already happened either way.
pub trait NotificationSink: Send {
    fn notify_complete(&self);
}

/// Rings the terminal bell and prints a completion message to stderr.
#[derive(Debug, Clone)]
pub struct TerminalSink {
    bell: bool,
    message: String,
}

impl TerminalSink {
    pub fn new(bell: bool, message: impl Into<String>) -> Self {
        Self {
            bell,
            message: message.into(),
        }
    }
}

impl NotificationSink for TerminalSink {
    fn notify_complete(&self) {
        let mut err = std::io::stderr().lock();
        if self.bell {
            let _ = err.write_all(b"\x07");
        }
        let _ = writeln!(err, "{}", self.message);
        let _ = err.flush();
    }
}

/// Silent sink for disabled notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify_complete(&self) {}
}

/// Build the sink described by the notifications config.
pub fn for_config(config: &NotificationsConfig) -> Box<dyn NotificationSink> {
    if config.enabled {
        Box::new(TerminalSink::new(config.bell, config.message.clone()))
    } else {
        Box::new(NullSink)
    }
}
