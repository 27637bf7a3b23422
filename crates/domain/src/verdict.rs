//! Outcome of a live lookup against the tracker.

use serde::Serialize;

/// Tri-state answer of a probe such as "is this issue resolved?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ProbeVerdict {
    /// The tracker definitively answered yes.
    Affirmed {
        /// Human-readable explanation.
        reason: String,
    },
    /// The tracker definitively answered no.
    Negated {
        /// Human-readable explanation.
        reason: String,
    },
    /// The lookup failed, so no answer is known.
    Indeterminate {
        /// Human-readable explanation including the failure.
        reason: String,
    },
}

/// How an indeterminate verdict is read as a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndeterminatePolicy {
    /// Unknown reads as "no".
    #[default]
    TreatAsNegated,
    /// Unknown reads as "yes".
    TreatAsAffirmed,
}

impl IndeterminatePolicy {
    /// Returns the policy for a "treat unknown as yes" flag.
    #[must_use]
    pub fn from_affirm_flag(affirm_unknown: bool) -> Self {
        if affirm_unknown {
            Self::TreatAsAffirmed
        } else {
            Self::TreatAsNegated
        }
    }
}

impl ProbeVerdict {
    /// Creates an affirmed verdict.
    #[must_use]
    pub fn affirmed(reason: impl Into<String>) -> Self {
        Self::Affirmed {
            reason: reason.into(),
        }
    }

    /// Creates a negated verdict.
    #[must_use]
    pub fn negated(reason: impl Into<String>) -> Self {
        Self::Negated {
            reason: reason.into(),
        }
    }

    /// Creates an indeterminate verdict.
    #[must_use]
    pub fn indeterminate(reason: impl Into<String>) -> Self {
        Self::Indeterminate {
            reason: reason.into(),
        }
    }

    /// Returns the explanation carried by the verdict.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Affirmed { reason } | Self::Negated { reason } | Self::Indeterminate { reason } => {
                reason.as_str()
            }
        }
    }

    /// Collapses the verdict into a boolean under `policy`.
    #[must_use]
    pub fn holds(&self, policy: IndeterminatePolicy) -> bool {
        match self {
            Self::Affirmed { .. } => true,
            Self::Negated { .. } => false,
            Self::Indeterminate { .. } => policy == IndeterminatePolicy::TreatAsAffirmed,
        }
    }

    /// Returns whether the lookup failed.
    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate { .. })
    }
}
