//! Single-flight runner state.

/// Whether the runner has work in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    /// Nothing running.
    Idle,
    /// The flight with this id is running.
    Running { id: u64 },
}

impl FlightState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

impl std::fmt::Display for FlightState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running { id } => write!(f, "Running({id})"),
        }
    }
}

/// How a flight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    /// The work produced a value.
    Completed,
    /// A newer flight (or an explicit cancel) stopped the work.
    Cancelled,
    /// The work panicked.
    Failed,
}

impl std::fmt::Display for FlightOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}
