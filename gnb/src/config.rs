//! YAML Configuration Structures for the scheduler driver
//!
//! Maps a cell description in YAML onto the engine's construction parameters

use common::types::{Bandwidth, CellId, SubcarrierSpacing};
use mac::{BwpConfig, SchedulerConfig};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the driver
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GnbConfig {
    /// Cell configuration
    pub cell: CellSection,
    /// Logging configuration
    #[serde(default)]
    pub log: LogSection,
    /// Simulation run configuration
    #[serde(default)]
    pub sim: SimSection,
}

/// Cell configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CellSection {
    /// Cell ID
    pub cell_id: u16,
    /// Number of registered UEs
    pub num_ues: u16,
    /// Channel bandwidth in MHz
    pub channel_bandwidth_mhz: u32,
    /// Common subcarrier spacing in kHz
    pub common_scs: u32,
    /// HARQ processes per UE and direction
    #[serde(default = "default_num_harq_processes")]
    pub num_harq_processes: u8,
    /// Per-UE uplink allocation divisors
    #[serde(default)]
    pub ul_stride_divisors: Vec<u32>,
}

fn default_num_harq_processes() -> u8 {
    16
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogSection {
    /// Log level for all components
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Simulation run configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimSection {
    /// Number of slots to simulate
    #[serde(default = "default_slots")]
    pub slots: u16,
    /// Pending bytes reported on each UE's first logical channel per slot
    #[serde(default = "default_buffer_bytes")]
    pub buffer_bytes: u32,
}

impl Default for SimSection {
    fn default() -> Self {
        Self {
            slots: default_slots(),
            buffer_bytes: default_buffer_bytes(),
        }
    }
}

fn default_slots() -> u16 {
    20
}

fn default_buffer_bytes() -> u32 {
    1500
}

impl GnbConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: GnbConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Translate the cell section into the engine's configuration
    pub fn to_scheduler_config(&self) -> anyhow::Result<SchedulerConfig> {
        let bandwidth = Bandwidth::from_mhz(self.cell.channel_bandwidth_mhz)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unsupported channel bandwidth: {} MHz",
                    self.cell.channel_bandwidth_mhz
                )
            })?;
        let scs = SubcarrierSpacing::from_u32(self.cell.common_scs)
            .ok_or_else(|| anyhow::anyhow!("Unsupported SCS: {} kHz", self.cell.common_scs))?;

        Ok(SchedulerConfig {
            cell_id: CellId(self.cell.cell_id),
            num_ues: self.cell.num_ues,
            num_harq_processes: self.cell.num_harq_processes,
            scs,
            dl_bwp: BwpConfig::from_bandwidth(bandwidth, scs),
            ul_bwp: BwpConfig::from_bandwidth(bandwidth, scs),
            ul_stride_divisors: self.cell.ul_stride_divisors.clone(),
        })
    }
}
