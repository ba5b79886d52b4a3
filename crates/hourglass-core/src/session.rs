//! Wiring between the engine, the tick source, and the notification sink.
//!
//! The session owns all three and maps accepted transitions onto ticker
//! side effects: start/resume begin the tick stream, pause/reset/completion
//! end it. The owner drives every intent and every received tick from one
//! task, so event handling stays serialized.

use tokio::sync::mpsc;

use crate::duration::Hms;
use crate::events::Event;
use crate::notify::NotificationSink;
use crate::timer::{CountdownEngine, RunState, Tick, Ticker, TICK_PERIOD};

pub struct TimerSession {
    engine: CountdownEngine,
    ticker: Ticker,
    sink: Box<dyn NotificationSink>,
}

impl TimerSession {
    /// Create an idle session and the tick stream the owner must drain
    /// into [`TimerSession::handle_tick`].
    pub fn new(sink: Box<dyn NotificationSink>) -> (Self, mpsc::Receiver<Tick>) {
        let (ticker, ticks) = Ticker::new(TICK_PERIOD);
        (
            Self {
                engine: CountdownEngine::new(),
                ticker,
                sink,
            },
            ticks,
        )
    }

    pub fn state(&self) -> RunState {
        self.engine.state()
    }

    pub fn remaining(&self) -> Hms {
        self.engine.remaining()
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    pub fn set_duration(&mut self, duration: Hms) -> Option<Event> {
        self.engine.set_duration(duration)
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start()?;
        self.ticker.start();
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.engine.pause()?;
        self.ticker.stop();
        Some(event)
    }

    pub fn resume(&mut self) -> Option<Event> {
        let event = self.engine.resume()?;
        self.ticker.start();
        Some(event)
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.ticker.stop();
        self.engine.reset()
    }

    /// Apply a received heartbeat. Ticks from a stopped stream are dropped;
    /// on completion the ticker stops and the sink fires, exactly once.
    pub fn handle_tick(&mut self, tick: Tick) -> Option<Event> {
        if !self.ticker.is_current(tick) {
            return None;
        }
        let event = self.engine.tick();
        if matches!(event, Some(Event::TimerCompleted { .. })) {
            self.ticker.stop();
            self.sink.notify_complete();
        }
        event
    }
}
