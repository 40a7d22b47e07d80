//! CQI to MCS Mapping
//!
//! Selects the modulation and coding scheme supported by a reported channel
//! quality. Table values follow 3GPP TS 38.214 (64QAM MCS table).

use crate::SchedulerError;

/// Valid rows in the CQI lookup table; the remaining rows are reserved
const CQI_VALID_ROWS: usize = 28;

/// CQI lookup table: (modulation order, target code rate x 1024)
/// 32 rows, the last 4 reserved
static CQI_TABLE: [(u8, u16); 32] = [
    (2, 120),
    (2, 157),
    (2, 193),
    (2, 251),
    (2, 308),
    (2, 379),
    (2, 449),
    (2, 526),
    (2, 602),
    (2, 679),
    (4, 340),
    (4, 378),
    (4, 434),
    (4, 490),
    (4, 553),
    (4, 616),
    (4, 658),
    (6, 438),
    (6, 466),
    (6, 517),
    (6, 567),
    (6, 616),
    (6, 666),
    (6, 719),
    (6, 772),
    (6, 822),
    (6, 873),
    (6, 910),
    (0, 0),
    (0, 0),
    (0, 0),
    (0, 0),
];

/// MCS index table: (modulation order, code rate x 1024)
static MCS_TABLE: [(u8, u16); 29] = [
    (2, 120),
    (2, 157),
    (2, 193),
    (2, 251),
    (2, 308),
    (2, 379),
    (2, 449),
    (2, 526),
    (2, 602),
    (2, 679),
    (4, 340),
    (4, 378),
    (4, 434),
    (4, 490),
    (4, 553),
    (4, 616),
    (4, 658),
    (6, 438),
    (6, 466),
    (6, 517),
    (6, 567),
    (6, 616),
    (6, 666),
    (6, 719),
    (6, 772),
    (6, 822),
    (6, 873),
    (6, 910),
    (6, 948),
];

/// Select the MCS index for a CQI lookup index
///
/// Picks the most spectrally efficient MCS row whose modulation order matches
/// the CQI row and whose code rate does not exceed the CQI target rate. When
/// even the lowest-rate row of that modulation exceeds the target, the first
/// row of the modulation family is used.
pub fn select_mcs(cqi_index: i64) -> Result<u8, SchedulerError> {
    if cqi_index < 0 || cqi_index >= CQI_VALID_ROWS as i64 {
        return Err(SchedulerError::InvalidCqiIndex(cqi_index));
    }

    let (modulation, target_rate) = CQI_TABLE[cqi_index as usize];
    mcs_for_modulation(modulation, target_rate).ok_or_else(|| {
        SchedulerError::InvalidConfiguration(format!(
            "no MCS table rows for modulation order {}",
            modulation
        ))
    })
}

/// Highest-rate MCS row of the given modulation family not exceeding
/// `target_rate`, falling back to the family's first row
fn mcs_for_modulation(modulation: u8, target_rate: u16) -> Option<u8> {
    let mut first_of_family = None;
    let mut best: Option<(usize, u16)> = None;

    for (index, &(order, rate)) in MCS_TABLE.iter().enumerate() {
        if order != modulation {
            continue;
        }
        if first_of_family.is_none() {
            first_of_family = Some(index);
        }
        if rate <= target_rate && best.map_or(true, |(_, b)| rate > b) {
            best = Some((index, rate));
        }
    }

    best.map(|(index, _)| index as u8)
        .or(first_of_family.map(|index| index as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_cqi_row_selects_mcs_zero() {
        assert_eq!(select_mcs(0).unwrap(), 0);
    }

    #[test]
    fn test_highest_valid_cqi_row() {
        // CQI row 27 targets rate 910; MCS 28 (rate 948) must not be picked
        assert_eq!(select_mcs(27).unwrap(), 27);
    }

    #[test]
    fn test_out_of_range_indices_rejected() {
        assert_eq!(select_mcs(-1), Err(SchedulerError::InvalidCqiIndex(-1)));
        assert_eq!(select_mcs(28), Err(SchedulerError::InvalidCqiIndex(28)));
        assert_eq!(select_mcs(31), Err(SchedulerError::InvalidCqiIndex(31)));
    }

    #[test]
    fn test_selected_rate_never_exceeds_target() {
        for cqi in 0..28 {
            let mcs = select_mcs(cqi).unwrap() as usize;
            let (modulation, target_rate) = CQI_TABLE[cqi as usize];
            let (order, rate) = MCS_TABLE[mcs];
            assert_eq!(order, modulation);
            assert!(rate <= target_rate, "cqi row {} selected rate {}", cqi, rate);
        }
    }

    #[test]
    fn test_code_rate_monotonic_within_modulation() {
        let mut last_rate = [0u16; 3];
        for cqi in 0..28 {
            let mcs = select_mcs(cqi).unwrap() as usize;
            let (order, rate) = MCS_TABLE[mcs];
            let family = (order / 2 - 1) as usize;
            assert!(rate >= last_rate[family]);
            last_rate[family] = rate;
        }
    }

    #[test]
    fn test_fallback_to_first_row_of_family() {
        // No QPSK row has rate <= 100, so the family's first row is used
        assert_eq!(mcs_for_modulation(2, 100), Some(0));
        // And for 16QAM the family starts at index 10
        assert_eq!(mcs_for_modulation(4, 100), Some(10));
    }
}
