#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed identifiers and response shapes for the Webling bookkeeping API.
//!
//! Only the handful of fields the debtor deletion tool reads are modelled
//! here. Everything else in the remote payloads is ignored during
//! deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

/// Identifier of a debtor record at the remote API.
///
/// Opaque beyond being a unique reference; the tool never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtorId(pub u64);

impl fmt::Display for DebtorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an accounting period, supplied by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodId(pub u64);

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PeriodId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Settlement state of a debtor as stored in its `state` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum DebtorState {
    /// Not yet settled.
    Open,
    /// Settled or otherwise closed.
    Closed,
}

/// A single entry in the `objects` list of a debtor query.
///
/// The list endpoint returns bare ids, but full records carrying an `id`
/// field are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DebtorRef {
    /// A bare id (`[1, 2, 3]`).
    Id(DebtorId),
    /// A record exposing its id (`[{"id": 1}]`).
    Record {
        /// The record id.
        id: DebtorId,
    },
}

impl DebtorRef {
    /// Returns the referenced debtor id.
    #[must_use]
    pub const fn id(&self) -> DebtorId {
        match self {
            Self::Id(id) | Self::Record { id } => *id,
        }
    }
}

/// Response body of `GET /debitor?filter=...`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DebtorList {
    /// Matching debtors. `null` or absent when nothing matched.
    #[serde(default)]
    pub objects: Option<Vec<DebtorRef>>,
}

impl DebtorList {
    /// Returns the matching ids in the order the service returned them.
    #[must_use]
    pub fn ids(&self) -> Vec<DebtorId> {
        self.objects
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(DebtorRef::id)
            .collect()
    }
}

/// The `properties` block shared by periods and period groups.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TitleProperties {
    /// Human-readable display title.
    pub title: String,
}

/// Response body of `GET /period/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Period {
    /// Period properties.
    pub properties: TitleProperties,
}

impl Period {
    /// Display title of the period.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.properties.title
    }
}

/// One element of the `GET /periodgroup?format=full&filter=...` response.
///
/// A period group is the accounting that contains one or more periods.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PeriodGroup {
    /// Period group properties.
    pub properties: TitleProperties,
}

impl PeriodGroup {
    /// Display title of the period group.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.properties.title
    }
}
