/// Network reachability as reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityState {
    /// No route to the network.
    None,

    /// The network is reachable.
    Reachable,

    /// Reachability has not been determined.
    #[default]
    Unknown,
}

impl ConnectivityState {
    /// Whether the signal positively reports an absent network.
    ///
    /// `Unknown` is not treated as offline; only an explicit `None` report
    /// triggers the offline-buffering error heuristic.
    pub fn is_offline(self) -> bool {
        self == Self::None
    }
}
