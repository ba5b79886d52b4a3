mod engine;
mod ticker;

pub use engine::{CountdownEngine, RunState};
pub use ticker::{Tick, Ticker, TICK_PERIOD};
