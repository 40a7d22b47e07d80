//! MAC Scheduling Engine Library
//!
//! This crate implements the per-slot resource allocation engine of a gNB
//! MAC layer: RBG assignment, HARQ process bookkeeping and CQI-to-MCS
//! selection for uplink and downlink.

pub mod config;
pub mod grant;
pub mod harq;
pub mod mcs;
pub mod rbg;
pub mod scheduler;
pub mod ue;

use thiserror::Error;

pub use config::{BwpConfig, SchedulerConfig};
pub use grant::{Grant, GrantType, MappingType, SpatialParams};
pub use scheduler::{RoundRobinScheduler, SlotAllocation};
pub use ue::UeContext;

/// Errors raised by the scheduling engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown RNTI {0}")]
    UnknownRnti(u16),

    #[error("Logical channel {0} out of range")]
    InvalidLogicalChannel(usize),

    #[error("CQI lookup index {0} outside the valid table range")]
    InvalidCqiIndex(i64),

    #[error("CQI report covers {report_len} RBs but the allocation includes RB {rb}")]
    CqiReportTooShort { report_len: usize, rb: usize },

    #[error("Allocation bitmap has no RBGs set")]
    EmptyAllocation,
}

/// Capability interface of a per-slot scheduling strategy
///
/// The MAC driver invokes each method exactly once per slot per direction.
/// Alternative strategies are further implementations of this trait.
pub trait SlotScheduler {
    /// Produce uplink grants for the given slot
    fn schedule_uplink(&mut self, slot: u16) -> SlotAllocation;

    /// Produce downlink grants for the given slot
    fn schedule_downlink(&mut self, slot: u16) -> SlotAllocation;
}
