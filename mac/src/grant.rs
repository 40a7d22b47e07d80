//! Scheduling Grant Records
//!
//! A grant describes one transmission opportunity for one UE in one slot.
//! Grants are produced fresh each slot and handed to the layer that maps
//! them onto physical channels; the engine does not retain them.

use common::types::Rnti;

/// Transmission type carried by a grant
///
/// The engine has no retransmission path, so every grant is a new
/// transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    /// Fresh data on the assigned HARQ process
    NewTransmission,
}

/// PDSCH/PUSCH time-domain mapping type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingType {
    /// DM-RS anchored to the slot start
    TypeA,
    /// DM-RS anchored to the allocation start
    TypeB,
}

/// Fixed spatial parameters per direction
#[derive(Debug, Clone, PartialEq)]
pub enum SpatialParams {
    /// Uplink codebook parameters
    Uplink {
        /// Number of antenna ports
        antenna_ports: u8,
        /// Transmitted precoding matrix indicator
        tpmi: u8,
    },
    /// Downlink precoding weights, single wideband entry
    Downlink {
        /// Precoding matrix, one weight per layer
        precoding_matrix: Vec<f64>,
    },
}

impl SpatialParams {
    /// Default single-port uplink configuration
    pub fn default_uplink() -> Self {
        SpatialParams::Uplink {
            antenna_ports: 1,
            tpmi: 0,
        }
    }

    /// Default single-entry downlink precoder
    pub fn default_downlink() -> Self {
        SpatialParams::Downlink {
            precoding_matrix: vec![1.0],
        }
    }
}

/// One scheduling decision for one UE in one direction
#[derive(Debug, Clone, PartialEq)]
pub struct Grant {
    /// Scheduled UE
    pub rnti: Rnti,
    /// Transmission type
    pub grant_type: GrantType,
    /// Assigned HARQ process ID
    pub harq_process: u8,
    /// New-data indicator for the assigned process
    pub ndi: bool,
    /// Redundancy version
    pub redundancy_version: u8,
    /// Selected MCS index
    pub mcs_index: u8,
    /// RBG allocation bitmap, one entry per RBG of the bandwidth part
    pub rbg_bitmap: Vec<bool>,
    /// First OFDM symbol of the allocation
    pub start_symbol: u8,
    /// Number of allocated OFDM symbols
    pub num_symbols: u8,
    /// Time-domain mapping type
    pub mapping_type: MappingType,
    /// DM-RS length in symbols
    pub dmrs_length: u8,
    /// CDM groups without data
    pub cdm_groups_without_data: u8,
    /// Number of transmission layers
    pub num_layers: u8,
    /// Slots between the scheduling decision and the granted slot
    pub slot_offset: u16,
    /// Antenna and precoding parameters
    pub spatial: SpatialParams,
    /// Slots until the UE reports HARQ feedback, downlink only
    pub feedback_slot_offset: Option<u8>,
}

impl Grant {
    /// Number of RBGs allocated by this grant
    pub fn num_allocated_rbgs(&self) -> usize {
        self.rbg_bitmap.iter().filter(|&&set| set).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spatial_params() {
        assert_eq!(
            SpatialParams::default_uplink(),
            SpatialParams::Uplink {
                antenna_ports: 1,
                tpmi: 0
            }
        );
        assert_eq!(
            SpatialParams::default_downlink(),
            SpatialParams::Downlink {
                precoding_matrix: vec![1.0]
            }
        );
    }
}
