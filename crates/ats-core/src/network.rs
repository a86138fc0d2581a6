//! Social-network kind enum shared across planning and execution crates.

/// A social grouping through which agents coordinate joint activities.
///
/// Negotiation runs over the kinds in the fixed order of [`NetworkKind::ALL`]:
/// household first, then work colleagues, then friends.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NetworkKind {
    /// Members of the same household.
    Household,
    /// Work colleagues.
    Work,
    /// Friend group.
    Friends,
}

impl NetworkKind {
    /// Number of network kinds.
    pub const COUNT: usize = 3;

    /// All kinds in negotiation order.
    pub const ALL: [NetworkKind; NetworkKind::COUNT] =
        [NetworkKind::Household, NetworkKind::Work, NetworkKind::Friends];

    /// Position in [`NetworkKind::ALL`]; used to index per-network tables.
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    /// Lower-case label, useful for logs and CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkKind::Household => "household",
            NetworkKind::Work      => "work",
            NetworkKind::Friends   => "friends",
        }
    }
}

impl std::fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
