use clap::Parser;

#[derive(Debug, Parser)]
#[clap(name = "instinct", version)]
pub struct Cli {
    /// How often the tick loop calls `process_timers`/`run_plan`, in
    /// milliseconds.
    #[clap(long, default_value = "100")]
    pub tick_interval_ms: u64,

    /// Initial Drive table capacity (capacity order: ActionPattern,
    /// ActionPatternElement, Competence, CompetenceElement, Drive,
    /// Action — overrides only the Drive slot; use `R I` over stdin for
    /// full control).
    #[clap(long, default_value = "16")]
    pub drive_capacity: usize,

    /// Initial Action table capacity.
    #[clap(long, default_value = "64")]
    pub action_capacity: usize,
}
