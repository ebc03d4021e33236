//! Domain types for bus arrival analysis.
//!
//! These types represent validated observation data. All of them enforce
//! their invariants at construction time, so code that receives them can
//! trust their validity: a `Line` is a plausible route identifier, a
//! `StopTime` is always truncated to whole minutes, and an `Arrival` is
//! either a real instant or explicitly unknown, never a fake one.

mod arrival;
mod line;
mod observation;
mod stop;
mod time;

pub use arrival::{Arrival, ArrivalEvent, UnknownArrival};
pub use line::{InvalidLine, Line};
pub use observation::{Observation, SENTINEL_DELAY};
pub use stop::{InvalidStopId, StopId};
pub use time::{StopTime, TimeError};
