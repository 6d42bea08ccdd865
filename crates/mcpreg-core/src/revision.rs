//! Per-revision behavior configuration
//!
//! The registry serves three near-duplicate API revisions. They share one
//! core; the differences that matter below the wire format are captured
//! here. Do not unify the default version policies: the divergence between
//! v0 and v0.1 is intentional and external clients depend on it.

use serde::{Deserialize, Serialize};

/// What a list request returns when no `version` filter is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionPolicy {
    /// Every published version of every matching name (v0.1 default)
    AllVersions,
    /// Only the version flagged latest per matching name (legacy and v0)
    LatestOnly,
}

/// API revision identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiRevision {
    /// Original `/api` surface
    Legacy,
    /// `/v0` surface
    V0,
    /// `/v0.1` surface (the canonical one)
    V01,
}

impl ApiRevision {
    pub fn default_version_policy(self) -> VersionPolicy {
        match self {
            ApiRevision::Legacy | ApiRevision::V0 => VersionPolicy::LatestOnly,
            ApiRevision::V01 => VersionPolicy::AllVersions,
        }
    }
}
