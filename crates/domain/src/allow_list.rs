//! Parent-ticket allow-list consulted before a work item is created.
//!
//! The allow-list file is read once at startup. Its raw outcome is an
//! [`AllowListSource`]; the validator only ever sees the collapsed
//! [`AllowList`] value.

/// Raw outcome of reading the allow-list artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowListSource {
    /// No allow-list file exists.
    Missing,
    /// The file parsed. Tickets are kept verbatim, duplicates included.
    Tickets(Vec<String>),
    /// The file exists but could not be read or parsed.
    Unreadable(String),
}

/// How an unreadable allow-list file is turned into an [`AllowList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedAllowListPolicy {
    /// Treat the file as an empty list, which collapses to unrestricted.
    #[default]
    AllowAll,
    /// Refuse every ticket until the file is fixed.
    DenyAll,
}

/// Effective parent-ticket restriction for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowList {
    /// Every ticket may receive work items.
    #[default]
    Unrestricted,
    /// Only the listed tickets may receive work items. Never empty.
    Restricted(Vec<String>),
    /// No ticket may receive work items.
    DenyAll {
        /// Why the allow-list could not be honoured.
        reason: String,
    },
}

impl AllowList {
    /// Builds an allow-list from loaded tickets. An empty list is unrestricted.
    #[must_use]
    pub fn from_tickets(tickets: Vec<String>) -> Self {
        if tickets.is_empty() {
            Self::Unrestricted
        } else {
            Self::Restricted(tickets)
        }
    }

    /// Collapses a loader outcome using the malformed-file policy.
    #[must_use]
    pub fn from_source(source: AllowListSource, policy: MalformedAllowListPolicy) -> Self {
        match source {
            AllowListSource::Missing => Self::Unrestricted,
            AllowListSource::Tickets(tickets) => Self::from_tickets(tickets),
            AllowListSource::Unreadable(reason) => match policy {
                MalformedAllowListPolicy::AllowAll => Self::from_tickets(Vec::new()),
                MalformedAllowListPolicy::DenyAll => Self::DenyAll { reason },
            },
        }
    }

    /// Returns whether work items may be created against `ticket`.
    #[must_use]
    pub fn is_allowed(&self, ticket: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Restricted(tickets) => tickets.iter().any(|allowed| allowed == ticket),
            Self::DenyAll { .. } => false,
        }
    }

    /// Returns the configured tickets, empty unless restricted.
    #[must_use]
    pub fn tickets(&self) -> &[String] {
        match self {
            Self::Restricted(tickets) => tickets.as_slice(),
            Self::Unrestricted | Self::DenyAll { .. } => &[],
        }
    }

    /// Returns whether every ticket is allowed.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }
}
