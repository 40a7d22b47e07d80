//! Common Types for the MAC Scheduler
//!
//! Defines fundamental types used throughout the scheduling engine

use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

/// Radio Network Temporary Identifier (RNTI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rnti(pub u16);

impl Rnti {
    /// Create a new RNTI
    pub fn new(value: u16) -> Self {
        Self(value)
    }

    /// Get the RNTI value
    pub fn value(&self) -> u16 {
        self.0
    }
}

/// Cell Identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(pub u16);

/// Link direction for a transmission or a per-direction state table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// gNB to UE
    Downlink,
    /// UE to gNB
    Uplink,
}

impl Direction {
    /// Index into per-direction state tables
    pub fn index(self) -> usize {
        match self {
            Direction::Downlink => 0,
            Direction::Uplink => 1,
        }
    }
}

/// Subcarrier spacing values in kHz
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive, Serialize, Deserialize)]
pub enum SubcarrierSpacing {
    /// 15 kHz
    Scs15 = 15,
    /// 30 kHz
    Scs30 = 30,
    /// 60 kHz
    Scs60 = 60,
    /// 120 kHz
    Scs120 = 120,
    /// 240 kHz
    Scs240 = 240,
}

impl SubcarrierSpacing {
    /// Subcarrier spacing in kHz
    pub fn khz(&self) -> u16 {
        match self {
            SubcarrierSpacing::Scs15 => 15,
            SubcarrierSpacing::Scs30 => 30,
            SubcarrierSpacing::Scs60 => 60,
            SubcarrierSpacing::Scs120 => 120,
            SubcarrierSpacing::Scs240 => 240,
        }
    }

    /// Number of slots per 10 ms frame for this numerology
    pub fn slots_per_frame(&self) -> u16 {
        match self {
            SubcarrierSpacing::Scs15 => 10,
            SubcarrierSpacing::Scs30 => 20,
            SubcarrierSpacing::Scs60 => 40,
            SubcarrierSpacing::Scs120 => 80,
            SubcarrierSpacing::Scs240 => 160,
        }
    }
}

/// Bandwidth values in MHz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bandwidth {
    /// 5 MHz
    Bw5,
    /// 10 MHz
    Bw10,
    /// 15 MHz
    Bw15,
    /// 20 MHz
    Bw20,
    /// 25 MHz
    Bw25,
    /// 30 MHz
    Bw30,
    /// 40 MHz
    Bw40,
    /// 50 MHz
    Bw50,
    /// 60 MHz
    Bw60,
    /// 80 MHz
    Bw80,
    /// 100 MHz
    Bw100,
}

impl Bandwidth {
    /// Get bandwidth in Hz
    pub fn as_hz(&self) -> u32 {
        match self {
            Bandwidth::Bw5 => 5_000_000,
            Bandwidth::Bw10 => 10_000_000,
            Bandwidth::Bw15 => 15_000_000,
            Bandwidth::Bw20 => 20_000_000,
            Bandwidth::Bw25 => 25_000_000,
            Bandwidth::Bw30 => 30_000_000,
            Bandwidth::Bw40 => 40_000_000,
            Bandwidth::Bw50 => 50_000_000,
            Bandwidth::Bw60 => 60_000_000,
            Bandwidth::Bw80 => 80_000_000,
            Bandwidth::Bw100 => 100_000_000,
        }
    }

    /// Map a bandwidth given in MHz to the matching variant
    pub fn from_mhz(mhz: u32) -> Option<Self> {
        match mhz {
            5 => Some(Bandwidth::Bw5),
            10 => Some(Bandwidth::Bw10),
            15 => Some(Bandwidth::Bw15),
            20 => Some(Bandwidth::Bw20),
            25 => Some(Bandwidth::Bw25),
            30 => Some(Bandwidth::Bw30),
            40 => Some(Bandwidth::Bw40),
            50 => Some(Bandwidth::Bw50),
            60 => Some(Bandwidth::Bw60),
            80 => Some(Bandwidth::Bw80),
            100 => Some(Bandwidth::Bw100),
            _ => None,
        }
    }
}
