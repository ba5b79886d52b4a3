//! # Hourglass Core Library
//!
//! Core logic for the Hourglass countdown timer. All behavior lives here;
//! the CLI binary is a thin presentation layer over this library.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: a caller-driven state machine
//!   (Idle/Running/Paused/Completed) that decrements an
//!   hours:minutes:seconds duration one tick at a time
//! - **Ticker**: a tokio-based one-second heartbeat, started and stopped
//!   to mirror the engine's run state
//! - **Timer Session**: wires engine, ticker, and notification sink
//!   together and keeps event handling serialized
//! - **Config**: TOML-based user preferences (notifications, theme,
//!   custom presets)
//!
//! Timer state is never persisted; a session lives and dies with its
//! process.
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: core timer state machine
//! - [`TimerSession`]: engine + ticker + sink wiring
//! - [`NotificationSink`]: completion notification contract
//! - [`Config`]: application configuration management

pub mod config;
pub mod duration;
pub mod error;
pub mod events;
pub mod notify;
pub mod preset;
pub mod session;
pub mod timer;

pub use config::{Config, NotificationsConfig, UiConfig};
pub use duration::Hms;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use notify::{NotificationSink, NullSink, TerminalSink};
pub use preset::Preset;
pub use session::TimerSession;
pub use timer::{CountdownEngine, RunState, Tick, Ticker, TICK_PERIOD};
