use serde::{Deserialize, Serialize};

use crate::resolver::EndpointCandidates;

/// Page sizes used when reading the whole volunteer collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub struct PagingPolicy {
    /// Limit of the first, speculative request.
    #[serde(default = "PagingPolicy::default_bulk_limit")]
    pub bulk_limit: u64,
    /// Limit of each follow-up page once the first request came back full.
    #[serde(default = "PagingPolicy::default_page_size")]
    pub page_size: u64,
}

impl PagingPolicy {
    /// Default limit of the speculative request.
    pub const DEFAULT_BULK_LIMIT: u64 = 10_000;
    /// Default size of follow-up pages.
    pub const DEFAULT_PAGE_SIZE: u64 = 500;

    fn default_bulk_limit() -> u64 {
        Self::DEFAULT_BULK_LIMIT
    }

    fn default_page_size() -> u64 {
        Self::DEFAULT_PAGE_SIZE
    }
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            bulk_limit: Self::DEFAULT_BULK_LIMIT,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// When a memoized single-record lookup counts as a hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Default)]
pub enum RecordHitPolicy {
    /// A stored vacant record (`None`) is a miss and is fetched again.
    #[default]
    SkipVacant,
    /// Any stored entry is a hit, vacant or not.
    EntryExists,
}

impl RecordHitPolicy {
    /// Returns the hit predicate for a table of optional records.
    pub fn predicate<T>(self) -> fn(&Option<T>) -> bool {
        match self {
            Self::SkipVacant => Option::is_some,
            Self::EntryExists => |_| true,
        }
    }
}

/// Slot read settings.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SlotPolicy {
    /// When `false`, slot reads return an empty list without a request.
    #[serde(default = "SlotPolicy::enabled_by_default")]
    pub enabled: bool,
    /// Routes tried in order when looking up the slots of one volunteer.
    #[serde(default)]
    pub endpoints: EndpointCandidates,
}

impl SlotPolicy {
    fn enabled_by_default() -> bool {
        true
    }
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoints: EndpointCandidates::default(),
        }
    }
}

/// Behaviour of a [`RosterClient`](crate::RosterClient).
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct ClientPolicy {
    #[serde(default)]
    pub paging: PagingPolicy,
    #[serde(default)]
    pub slots: SlotPolicy,
    #[serde(default)]
    pub records: RecordHitPolicy,
}
