/// Host-level knobs that sit outside the plan data model itself — the
/// capacities handed to a fresh `initialise`, the cadence the host
/// intends to drive `process_timers` at, and the return-buffer size for
/// command execution.
///
/// Defaults baked in, overridable from the environment, no config file
/// parsing.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Per-kind capacities in capacity order (ActionPattern,
    /// ActionPatternElement, Competence, CompetenceElement, Drive, Action)
    /// used for the engine's initial `initialise` call.
    pub initial_sizes: [usize; 6],

    /// Documentation only: the `process_timers` cadence the host intends
    /// to drive at. The engine never self-ticks — the host decides when
    /// to call `process_timers`/`run_plan`.
    pub tick_interval_ms: u64,

    /// Upper bound on a single command's rendered return line, mirroring
    /// the source's `nRtnBuffLen` guard (a too-small buffer fails the
    /// command rather than truncating silently).
    pub command_buffer_size: usize,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let initial_sizes = [
            env_usize("INSTINCT_CAP_ACTIONPATTERN", 16),
            env_usize("INSTINCT_CAP_ACTIONPATTERNELEMENT", 64),
            env_usize("INSTINCT_CAP_COMPETENCE", 16),
            env_usize("INSTINCT_CAP_COMPETENCEELEMENT", 64),
            env_usize("INSTINCT_CAP_DRIVE", 16),
            env_usize("INSTINCT_CAP_ACTION", 64),
        ];

        Self {
            initial_sizes,
            tick_interval_ms: env_u64("INSTINCT_TICK_INTERVAL_MS", 100),
            command_buffer_size: env_usize("INSTINCT_CMD_BUFFER_SIZE", 256),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_sizes: [16, 64, 16, 64, 16, 64],
            tick_interval_ms: 100,
            command_buffer_size: 256,
        }
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
