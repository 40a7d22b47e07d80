//! Scheduler Configuration
//!
//! Cell and bandwidth-part parameters validated once at engine construction

use crate::rbg::nominal_rbg_size;
use crate::SchedulerError;
use common::types::{Bandwidth, CellId, SubcarrierSpacing};
use common::utils::calculate_nrb;
use serde::{Deserialize, Serialize};

/// Maximum number of HARQ processes per UE and direction
pub const MAX_HARQ_PROCESSES: u8 = 16;

/// Frequency-domain geometry of one bandwidth part
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BwpConfig {
    /// Number of physical resource blocks
    pub num_rbs: u16,
    /// Resource block group size in RBs
    pub rbg_size: u16,
}

impl BwpConfig {
    /// Derive the geometry from carrier bandwidth and numerology
    pub fn from_bandwidth(bandwidth: Bandwidth, scs: SubcarrierSpacing) -> Self {
        let num_rbs = calculate_nrb(bandwidth.as_hz(), scs.khz());
        Self {
            num_rbs,
            rbg_size: nominal_rbg_size(num_rbs),
        }
    }

    /// Number of RBGs covering the bandwidth part
    pub fn num_rbgs(&self) -> u16 {
        (self.num_rbs + self.rbg_size - 1) / self.rbg_size
    }
}

/// Construction-time parameters of the scheduling engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Cell identity, used for log correlation
    pub cell_id: CellId,
    /// Number of registered UEs; RNTIs are 1..=num_ues
    pub num_ues: u16,
    /// HARQ processes per UE and direction
    #[serde(default = "default_num_harq_processes")]
    pub num_harq_processes: u8,
    /// Subcarrier spacing, fixes the slots-per-frame count
    pub scs: SubcarrierSpacing,
    /// Downlink bandwidth part
    pub dl_bwp: BwpConfig,
    /// Uplink bandwidth part
    pub ul_bwp: BwpConfig,
    /// Per-UE uplink allocation divisors, indexed by RNTI - 1.
    /// Empty means every UE uses the cell's UE count as divisor.
    #[serde(default)]
    pub ul_stride_divisors: Vec<u32>,
}

fn default_num_harq_processes() -> u8 {
    MAX_HARQ_PROCESSES
}

impl SchedulerConfig {
    /// Validate the configuration, rejecting anything the engine cannot run with
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.num_ues == 0 {
            return Err(SchedulerError::InvalidConfiguration(
                "cell has no registered UEs".into(),
            ));
        }
        if self.num_harq_processes == 0 || self.num_harq_processes > MAX_HARQ_PROCESSES {
            return Err(SchedulerError::InvalidConfiguration(format!(
                "HARQ process count {} outside 1..={}",
                self.num_harq_processes, MAX_HARQ_PROCESSES
            )));
        }
        for (bwp, label) in [(&self.dl_bwp, "downlink"), (&self.ul_bwp, "uplink")] {
            if bwp.num_rbs == 0 {
                return Err(SchedulerError::InvalidConfiguration(format!(
                    "{} bandwidth part has no RBs",
                    label
                )));
            }
            if bwp.rbg_size == 0 {
                return Err(SchedulerError::InvalidConfiguration(format!(
                    "{} RBG size must be positive",
                    label
                )));
            }
        }
        if !self.ul_stride_divisors.is_empty()
            && self.ul_stride_divisors.len() != self.num_ues as usize
        {
            return Err(SchedulerError::InvalidConfiguration(format!(
                "{} uplink stride divisors configured for {} UEs",
                self.ul_stride_divisors.len(),
                self.num_ues
            )));
        }
        if self.ul_stride_divisors.contains(&0) {
            return Err(SchedulerError::InvalidConfiguration(
                "uplink stride divisor must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Uplink allocation divisor for a UE, identified by its 1-based index
    pub fn ul_divisor(&self, ue_index: u16) -> u32 {
        self.ul_stride_divisors
            .get(ue_index as usize - 1)
            .copied()
            .unwrap_or(self.num_ues as u32)
    }
}
