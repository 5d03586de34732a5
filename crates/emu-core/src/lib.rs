//! Core traits and types for instruction-stepped emulation.
//!
//! A CPU executes one instruction per `step()` against a bus it does not
//! own. The machine owning the bus decides what memory and ports mean.

mod bus;
mod clock;
mod cpu;
mod io_bus;
mod observable;
mod ticks;

pub use bus::{Bus, SimpleBus};
pub use clock::MasterClock;
pub use cpu::{Cpu, Step};
pub use io_bus::IoBus;
pub use observable::{Observable, Value, parse_address};
pub use ticks::Ticks;
