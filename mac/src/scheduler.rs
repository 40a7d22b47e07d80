//! Round-Robin MAC Scheduler
//!
//! Per-slot uplink and downlink resource allocation across the cell's UEs.
//! UEs are visited in RNTI order; each UE with pending data receives one
//! grant per direction per slot.

use crate::config::{BwpConfig, SchedulerConfig};
use crate::grant::{Grant, GrantType, MappingType, SpatialParams};
use crate::ue::UeContext;
use crate::{mcs, rbg, SchedulerError, SlotScheduler};
use common::types::{Direction, Rnti};
use tracing::{debug, trace, warn};

/// First OFDM symbol of every allocation
const START_SYMBOL: u8 = 0;
/// Full-slot allocations
const SYMBOLS_PER_SLOT: u8 = 14;
/// Single-symbol DM-RS
const DMRS_LENGTH: u8 = 1;
/// CDM groups without data
const CDM_GROUPS_WITHOUT_DATA: u8 = 2;
/// Single-layer transmissions
const NUM_LAYERS: u8 = 1;
/// New transmissions always start at redundancy version 0
const REDUNDANCY_VERSION: u8 = 0;
/// Slots between a downlink grant and its ACK/NACK report.
/// Feedback offsets below 2 are not supported.
const PDSCH_FEEDBACK_SLOT_OFFSET: u8 = 2;

/// Outcome of one scheduling pass for one direction
#[derive(Debug, Clone)]
pub struct SlotAllocation {
    /// Slot the pass was invoked for
    pub slot: u16,
    /// Scheduled direction
    pub direction: Direction,
    /// Grants in UE iteration order
    pub grants: Vec<Grant>,
    /// UEs with pending data that could not be served this slot
    pub skipped: Vec<(Rnti, SchedulerError)>,
}

/// Round-robin scheduling engine
///
/// Owns the UE contexts; all state changes happen through the per-slot
/// entry points and the buffer/CQI update methods.
pub struct RoundRobinScheduler {
    config: SchedulerConfig,
    ues: Vec<UeContext>,
    current_slot: u16,
    slots_per_frame: u16,
}

impl RoundRobinScheduler {
    /// Create the engine, failing fast on invalid configuration
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate()?;

        let ues = (1..=config.num_ues)
            .map(|index| UeContext::new(Rnti(index), config.num_harq_processes))
            .collect();
        let slots_per_frame = config.scs.slots_per_frame();

        debug!("Scheduler created: cell_id={}, ues={}, dl_rbgs={}, ul_rbgs={}",
               config.cell_id.0,
               config.num_ues,
               config.dl_bwp.num_rbgs(),
               config.ul_bwp.num_rbgs());

        Ok(Self {
            config,
            ues,
            current_slot: 0,
            slots_per_frame,
        })
    }

    /// Record the slot the cell currently transmits in
    pub fn set_current_slot(&mut self, slot: u16) {
        self.current_slot = slot % self.slots_per_frame;
    }

    /// Slot the cell currently transmits in
    pub fn current_slot(&self) -> u16 {
        self.current_slot
    }

    /// Slots per 10 ms frame for the configured numerology
    pub fn slots_per_frame(&self) -> u16 {
        self.slots_per_frame
    }

    /// Record the pending byte count of one logical channel of a UE
    pub fn update_buffer_status(
        &mut self,
        rnti: Rnti,
        direction: Direction,
        channel: usize,
        bytes: u32,
    ) -> Result<(), SchedulerError> {
        self.ue_mut(rnti)?.set_buffer_bytes(direction, channel, bytes)
    }

    /// Replace a UE's per-RB CQI report for a direction
    pub fn update_cqi_report(
        &mut self,
        rnti: Rnti,
        direction: Direction,
        report: Vec<u8>,
    ) -> Result<(), SchedulerError> {
        self.ue_mut(rnti)?.set_cqi_report(direction, report);
        Ok(())
    }

    fn ue_mut(&mut self, rnti: Rnti) -> Result<&mut UeContext, SchedulerError> {
        if rnti.0 == 0 || rnti.0 > self.config.num_ues {
            return Err(SchedulerError::UnknownRnti(rnti.0));
        }
        Ok(&mut self.ues[rnti.0 as usize - 1])
    }

    fn bwp(&self, direction: Direction) -> &BwpConfig {
        match direction {
            Direction::Downlink => &self.config.dl_bwp,
            Direction::Uplink => &self.config.ul_bwp,
        }
    }

    /// Slots between the current slot and `slot`, wrapping at the frame boundary
    fn slot_offset(&self, slot: u16) -> u16 {
        if slot >= self.current_slot {
            slot - self.current_slot
        } else {
            self.slots_per_frame - self.current_slot + slot
        }
    }

    /// RBG bitmap for one UE: bits at start, start + stride, ... within bounds.
    /// The 1-based UE index gives the 0-based starting RBG.
    fn allocation_bitmap(&self, ue_index: u16, direction: Direction) -> Vec<bool> {
        let num_rbgs = self.bwp(direction).num_rbgs() as usize;
        let mut bitmap = vec![false; num_rbgs];

        let stride = match direction {
            Direction::Downlink => self.config.num_ues as usize,
            Direction::Uplink => {
                let divisor = self.config.ul_divisor(ue_index);
                let stride = num_rbgs / divisor as usize;
                if stride == 0 {
                    warn!("Degenerate uplink stride for rnti={}: divisor {} exceeds {} RBGs, clamping to 1",
                          ue_index, divisor, num_rbgs);
                    1
                } else {
                    stride
                }
            }
        };

        let mut group = ue_index as usize - 1;
        while group < num_rbgs {
            bitmap[group] = true;
            group += stride;
        }

        bitmap
    }

    /// Build the grant for one eligible UE, advancing its HARQ state.
    /// HARQ state moves only when the grant succeeds.
    fn build_grant(
        &mut self,
        ue_index: u16,
        direction: Direction,
        bitmap: Vec<bool>,
        slot_offset: u16,
    ) -> Result<Grant, SchedulerError> {
        let bwp = self.bwp(direction);
        let (rbg_size, num_rbs) = (bwp.rbg_size, bwp.num_rbs);

        let rb_indices = rbg::bitmap_to_rb_indices(&bitmap, rbg_size, num_rbs);
        if rb_indices.is_empty() {
            return Err(SchedulerError::EmptyAllocation);
        }

        let ue = &mut self.ues[ue_index as usize - 1];
        let report = ue.cqi_report(direction);
        let mut cqi_sum: u64 = 0;
        for &rb in &rb_indices {
            match report.get(rb) {
                Some(&cqi) => cqi_sum += cqi as u64,
                None => {
                    return Err(SchedulerError::CqiReportTooShort {
                        report_len: report.len(),
                        rb,
                    })
                }
            }
        }

        // 1-based CQI storage against the 0-based table rows
        let mean_cqi = cqi_sum as f64 / rb_indices.len() as f64;
        let lookup_index = mean_cqi.floor() as i64 - 1;
        let mcs_index = mcs::select_mcs(lookup_index)?;

        let (harq_process, ndi) = ue.harq_mut(direction).assign_new_process();

        let (spatial, feedback_slot_offset) = match direction {
            Direction::Downlink => (
                SpatialParams::default_downlink(),
                Some(PDSCH_FEEDBACK_SLOT_OFFSET),
            ),
            Direction::Uplink => (SpatialParams::default_uplink(), None),
        };

        trace!("Grant for rnti={} {:?}: harq={}, ndi={}, mcs={}, rbgs={}",
               ue_index, direction, harq_process, ndi, mcs_index,
               bitmap.iter().filter(|&&set| set).count());

        Ok(Grant {
            rnti: Rnti(ue_index),
            grant_type: GrantType::NewTransmission,
            harq_process,
            ndi,
            redundancy_version: REDUNDANCY_VERSION,
            mcs_index,
            rbg_bitmap: bitmap,
            start_symbol: START_SYMBOL,
            num_symbols: SYMBOLS_PER_SLOT,
            mapping_type: MappingType::TypeA,
            dmrs_length: DMRS_LENGTH,
            cdm_groups_without_data: CDM_GROUPS_WITHOUT_DATA,
            num_layers: NUM_LAYERS,
            slot_offset,
            spatial,
            feedback_slot_offset,
        })
    }

    /// One scheduling pass over all UEs for one direction
    fn schedule(&mut self, slot: u16, direction: Direction) -> SlotAllocation {
        let slot_offset = self.slot_offset(slot);
        let mut grants = Vec::new();
        let mut skipped = Vec::new();

        for ue_index in 1..=self.config.num_ues {
            if !self.ues[ue_index as usize - 1].has_pending_data(direction) {
                trace!("rnti={} has no pending {:?} data", ue_index, direction);
                continue;
            }

            let bitmap = self.allocation_bitmap(ue_index, direction);
            match self.build_grant(ue_index, direction, bitmap, slot_offset) {
                Ok(grant) => grants.push(grant),
                Err(err) => {
                    warn!("Skipping rnti={} for {:?} slot {}: {}",
                          ue_index, direction, slot, err);
                    skipped.push((Rnti(ue_index), err));
                }
            }
        }

        debug!("Scheduled {:?} slot {}: {} grants, {} skipped",
               direction, slot, grants.len(), skipped.len());

        SlotAllocation {
            slot,
            direction,
            grants,
            skipped,
        }
    }
}

impl SlotScheduler for RoundRobinScheduler {
    fn schedule_uplink(&mut self, slot: u16) -> SlotAllocation {
        self.schedule(slot, Direction::Uplink)
    }

    fn schedule_downlink(&mut self, slot: u16) -> SlotAllocation {
        self.schedule(slot, Direction::Downlink)
    }
}
