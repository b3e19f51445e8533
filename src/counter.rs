mod crossing_counter;
mod direction;

pub use crossing_counter::{CounterConfig, CrossingCounter};
pub use direction::{CrossingDirection, CrossingEvent};
