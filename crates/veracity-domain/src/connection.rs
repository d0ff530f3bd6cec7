//! Connection module - keyword-overlap links between claims

use crate::Claim;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Minimum number of shared keywords for two claims to be connected
pub const MIN_SHARED_KEYWORDS: usize = 2;

/// Kind of link between two claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionKind {
    /// An assumption that may support a conclusion
    AssumptionSupport,
    /// A causal claim feeding into a conclusion
    CausalChain,
}

impl ConnectionKind {
    /// Strength label carried over into rendered reports
    pub fn strength(&self) -> &'static str {
        match self {
            ConnectionKind::AssumptionSupport => "potential",
            ConnectionKind::CausalChain => "causal",
        }
    }

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::AssumptionSupport => "assumption-conclusion",
            ConnectionKind::CausalChain => "causal-conclusion",
        }
    }
}

/// A link from a supporting claim to a concluding claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    kind: ConnectionKind,
    from: Claim,
    to: Claim,
    shared_keywords: BTreeSet<String>,
}

impl Connection {
    /// Create a connection, or `None` if fewer than [`MIN_SHARED_KEYWORDS`] are shared
    pub fn new(
        kind: ConnectionKind,
        from: Claim,
        to: Claim,
        shared_keywords: BTreeSet<String>,
    ) -> Option<Self> {
        if shared_keywords.len() < MIN_SHARED_KEYWORDS {
            return None;
        }
        Some(Self {
            kind,
            from,
            to,
            shared_keywords,
        })
    }

    /// Kind of link
    pub fn kind(&self) -> ConnectionKind {
        self.kind
    }

    /// Supporting claim (assumption or causal)
    pub fn from(&self) -> &Claim {
        &self.from
    }

    /// Concluding claim
    pub fn to(&self) -> &Claim {
        &self.to
    }

    /// Keywords both claims share, sorted
    pub fn shared_keywords(&self) -> &BTreeSet<String> {
        &self.shared_keywords
    }
}
