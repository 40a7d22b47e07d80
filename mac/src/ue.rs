//! UE Context Bookkeeping
//!
//! Per-UE state owned by the scheduling engine: buffer occupancy, CQI
//! reports and HARQ state, each kept per direction.

use crate::harq::HarqEntity;
use crate::SchedulerError;
use common::types::{Direction, Rnti};

/// Number of logical channels tracked per UE and direction
pub const NUM_LOGICAL_CHANNELS: usize = 32;

/// Scheduler-side state for one registered UE
#[derive(Debug, Clone)]
pub struct UeContext {
    /// UE identity
    rnti: Rnti,
    /// Pending bytes per logical channel, per direction
    buffer_bytes: [Vec<u32>; 2],
    /// Per-RB CQI report, per direction, refreshed externally between slots
    cqi_report: [Vec<u8>; 2],
    /// HARQ state per direction
    harq: [HarqEntity; 2],
}

impl UeContext {
    /// Create a context with empty buffers and no CQI report
    pub fn new(rnti: Rnti, num_harq_processes: u8) -> Self {
        Self {
            rnti,
            buffer_bytes: [
                vec![0; NUM_LOGICAL_CHANNELS],
                vec![0; NUM_LOGICAL_CHANNELS],
            ],
            cqi_report: [Vec::new(), Vec::new()],
            harq: [
                HarqEntity::new(num_harq_processes),
                HarqEntity::new(num_harq_processes),
            ],
        }
    }

    /// UE identity
    pub fn rnti(&self) -> Rnti {
        self.rnti
    }

    /// Record the pending byte count of one logical channel
    pub fn set_buffer_bytes(
        &mut self,
        direction: Direction,
        channel: usize,
        bytes: u32,
    ) -> Result<(), SchedulerError> {
        if channel >= NUM_LOGICAL_CHANNELS {
            return Err(SchedulerError::InvalidLogicalChannel(channel));
        }
        self.buffer_bytes[direction.index()][channel] = bytes;
        Ok(())
    }

    /// Total pending bytes across logical channels for a direction
    pub fn buffer_sum(&self, direction: Direction) -> u64 {
        self.buffer_bytes[direction.index()]
            .iter()
            .map(|&bytes| bytes as u64)
            .sum()
    }

    /// A UE is eligible for scheduling in a direction iff it has pending data
    pub fn has_pending_data(&self, direction: Direction) -> bool {
        self.buffer_sum(direction) > 0
    }

    /// Replace the per-RB CQI report for a direction
    pub fn set_cqi_report(&mut self, direction: Direction, report: Vec<u8>) {
        self.cqi_report[direction.index()] = report;
    }

    /// Per-RB CQI report for a direction
    pub fn cqi_report(&self, direction: Direction) -> &[u8] {
        &self.cqi_report[direction.index()]
    }

    /// HARQ state for a direction
    pub fn harq_mut(&mut self, direction: Direction) -> &mut HarqEntity {
        &mut self.harq[direction.index()]
    }

    /// HARQ state for a direction, read-only
    pub fn harq(&self, direction: Direction) -> &HarqEntity {
        &self.harq[direction.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sum_per_direction() {
        let mut ue = UeContext::new(Rnti(1), 8);
        ue.set_buffer_bytes(Direction::Downlink, 0, 100).unwrap();
        ue.set_buffer_bytes(Direction::Downlink, 3, 50).unwrap();

        assert_eq!(ue.buffer_sum(Direction::Downlink), 150);
        assert_eq!(ue.buffer_sum(Direction::Uplink), 0);
        assert!(ue.has_pending_data(Direction::Downlink));
        assert!(!ue.has_pending_data(Direction::Uplink));
    }

    #[test]
    fn test_logical_channel_bounds() {
        let mut ue = UeContext::new(Rnti(1), 8);
        assert_eq!(
            ue.set_buffer_bytes(Direction::Uplink, NUM_LOGICAL_CHANNELS, 1),
            Err(SchedulerError::InvalidLogicalChannel(NUM_LOGICAL_CHANNELS))
        );
    }

    #[test]
    fn test_harq_state_is_per_direction() {
        let mut ue = UeContext::new(Rnti(1), 4);
        ue.harq_mut(Direction::Downlink).assign_new_process();
        ue.harq_mut(Direction::Downlink).assign_new_process();

        assert_eq!(ue.harq(Direction::Downlink).last_process(), Some(1));
        assert_eq!(ue.harq(Direction::Uplink).last_process(), None);
    }
}
