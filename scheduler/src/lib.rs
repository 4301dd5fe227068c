//! Drive Scheduler and Timer Processor.

mod drive;
mod timers;

pub use drive::run_plan;
pub use timers::process_timers;
