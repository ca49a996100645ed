use std::time::Duration;

/// Connect/read deadline for a single query
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default per-axis tolerance for goto completion
pub const DEFAULT_GOTO_TOLERANCE: f64 = 2.0;

/// Interval between position polls while walking toward a goto target
pub const GOTO_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default overall deadline for a polled goto before giving up
pub const GOTO_MAX_WAIT: Duration = Duration::from_secs(300);

/// Default port the GameQuery mod listens on
pub const DEFAULT_PORT: u16 = 25566;
