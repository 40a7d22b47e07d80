//! Kestrel MAC Scheduler Driver
//!
//! Thin MAC-driver harness around the scheduling engine: builds the cell
//! configuration, feeds synthetic buffer and CQI snapshots once per slot
//! and logs the grants the engine produces. All scheduling decisions live
//! in the `mac` crate.

mod config;

use anyhow::Result;
use clap::Parser;
use common::types::{Bandwidth, CellId, Direction, Rnti, SubcarrierSpacing};
use mac::{BwpConfig, RoundRobinScheduler, SchedulerConfig, SlotAllocation, SlotScheduler};
use num_traits::FromPrimitive;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use config::{GnbConfig, SimSection};

/// Kestrel MAC scheduler simulation driver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to YAML configuration file; command-line cell options are ignored when set
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Cell ID
    #[arg(long, default_value = "1")]
    cell_id: u16,

    /// Number of registered UEs
    #[arg(long, default_value = "4")]
    ues: u16,

    /// Channel bandwidth in MHz (5, 10, 15, 20, 25, 30, 40, 50, 60, 80, 100)
    #[arg(long, default_value = "10")]
    bandwidth_mhz: u32,

    /// Subcarrier spacing in kHz (15, 30, 60, 120, 240)
    #[arg(long, default_value = "15")]
    scs_khz: u32,

    /// Number of slots to simulate
    #[arg(long, default_value = "20")]
    slots: u16,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt().with_env_filter(filter).init();

    let (scheduler_config, sim) = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path);
            let config = GnbConfig::from_yaml_file(path)?;
            (config.to_scheduler_config()?, config.sim)
        }
        None => (cell_config_from_args(&args)?, SimSection {
            slots: args.slots,
            buffer_bytes: 1500,
        }),
    };

    let num_ues = scheduler_config.num_ues;
    let dl_rbs = scheduler_config.dl_bwp.num_rbs;
    let ul_rbs = scheduler_config.ul_bwp.num_rbs;
    info!("Starting MAC scheduler simulation: cell_id={}, ues={}, dl_rbs={}, ul_rbs={}, slots={}",
          scheduler_config.cell_id.0, num_ues, dl_rbs, ul_rbs, sim.slots);

    let mut scheduler = RoundRobinScheduler::new(scheduler_config)?;
    let slots_per_frame = scheduler.slots_per_frame();

    for slot in 0..sim.slots {
        let slot_in_frame = slot % slots_per_frame;
        scheduler.set_current_slot(slot_in_frame);

        // Refresh the snapshots the engine reads, as the RLC/PHY layers would
        for index in 1..=num_ues {
            let rnti = Rnti(index);
            scheduler.update_buffer_status(rnti, Direction::Downlink, 0, sim.buffer_bytes)?;
            scheduler.update_buffer_status(rnti, Direction::Uplink, 0, sim.buffer_bytes)?;

            let cqi = synthetic_cqi(index);
            scheduler.update_cqi_report(rnti, Direction::Downlink, vec![cqi; dl_rbs as usize])?;
            scheduler.update_cqi_report(rnti, Direction::Uplink, vec![cqi; ul_rbs as usize])?;
        }

        let downlink = scheduler.schedule_downlink(slot_in_frame);
        log_allocation(&downlink);

        let uplink = scheduler.schedule_uplink(slot_in_frame);
        log_allocation(&uplink);
    }

    info!("Simulation complete after {} slots", sim.slots);
    Ok(())
}

/// Build the engine configuration from command-line options
fn cell_config_from_args(args: &Args) -> Result<SchedulerConfig> {
    let bandwidth = Bandwidth::from_mhz(args.bandwidth_mhz)
        .ok_or_else(|| anyhow::anyhow!("Unsupported bandwidth: {} MHz", args.bandwidth_mhz))?;
    let scs = SubcarrierSpacing::from_u32(args.scs_khz)
        .ok_or_else(|| anyhow::anyhow!("Unsupported SCS: {} kHz", args.scs_khz))?;

    Ok(SchedulerConfig {
        cell_id: CellId(args.cell_id),
        num_ues: args.ues,
        num_harq_processes: 16,
        scs,
        dl_bwp: BwpConfig::from_bandwidth(bandwidth, scs),
        ul_bwp: BwpConfig::from_bandwidth(bandwidth, scs),
        ul_stride_divisors: Vec::new(),
    })
}

/// Flat per-RB CQI for a UE, varied across UEs to exercise different MCS rows
fn synthetic_cqi(ue_index: u16) -> u8 {
    (4 + (ue_index % 12)) as u8
}

fn log_allocation(allocation: &SlotAllocation) {
    info!("{:?} slot {}: {} grants, {} skipped",
          allocation.direction,
          allocation.slot,
          allocation.grants.len(),
          allocation.skipped.len());

    for grant in &allocation.grants {
        debug!("  rnti={} harq={} ndi={} mcs={} rbgs={} offset={}",
               grant.rnti.0,
               grant.harq_process,
               grant.ndi,
               grant.mcs_index,
               grant.num_allocated_rbgs(),
               grant.slot_offset);
    }

    for (rnti, error) in &allocation.skipped {
        warn!("  rnti={} not served: {}", rnti.0, error);
    }
}
