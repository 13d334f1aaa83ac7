//! Broker connection state.

/// Outcome of the cache/broker connect attempt.
///
/// The queue/worker activation branch and the cache warm-up step run if
/// and only if the state is [`Connected`](ConnectionState::Connected).
/// [`Unavailable`](ConnectionState::Unavailable) is not an error: the
/// service degrades gracefully and the remaining steps still run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState<H> {
    /// No connect attempt has been made yet.
    NotAttempted,
    /// The broker is reachable; the handle establishes sub-connections.
    Connected(H),
    /// The broker could not be reached.
    Unavailable,
}

impl<H> ConnectionState<H> {
    /// Whether the broker connection was established.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// The connection handle, if connected.
    #[must_use]
    pub const fn handle(&self) -> Option<&H> {
        match self {
            Self::Connected(handle) => Some(handle),
            Self::NotAttempted | Self::Unavailable => None,
        }
    }
}
