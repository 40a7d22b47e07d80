//! Resource Block Group Translation
//!
//! Converts between RBG-granularity allocation bitmaps and physical RB indices

/// Nominal RBG size for a bandwidth part
/// Based on 3GPP TS 38.214 Table 5.1.2.2.1-1, configuration 1
pub fn nominal_rbg_size(num_rbs: u16) -> u16 {
    match num_rbs {
        0..=36 => 2,
        37..=72 => 4,
        73..=144 => 8,
        _ => 16,
    }
}

/// Expand an RBG allocation bitmap into the physical RB indices it covers
///
/// Each set bit spans `rbg_size` consecutive RBs; the last group is clipped
/// at `num_rbs` when the bandwidth part does not divide evenly.
pub fn bitmap_to_rb_indices(bitmap: &[bool], rbg_size: u16, num_rbs: u16) -> Vec<usize> {
    let mut indices = Vec::new();

    for (group, &allocated) in bitmap.iter().enumerate() {
        if !allocated {
            continue;
        }
        let first = group * rbg_size as usize;
        let last = ((group + 1) * rbg_size as usize).min(num_rbs as usize);
        indices.extend(first..last);
    }

    indices
}

/// Reconstruct the RBG bitmap covering a set of physical RB indices
pub fn rb_indices_to_bitmap(indices: &[usize], rbg_size: u16, num_rbgs: u16) -> Vec<bool> {
    let mut bitmap = vec![false; num_rbgs as usize];

    for &rb in indices {
        let group = rb / rbg_size as usize;
        if group < bitmap.len() {
            bitmap[group] = true;
        }
    }

    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_rbg_size() {
        assert_eq!(nominal_rbg_size(24), 2);
        assert_eq!(nominal_rbg_size(52), 4);
        assert_eq!(nominal_rbg_size(106), 8);
        assert_eq!(nominal_rbg_size(273), 16);
    }

    #[test]
    fn test_bitmap_expansion() {
        // Groups 0 and 2 of size 4 over 16 RBs
        let bitmap = vec![true, false, true, false];
        let indices = bitmap_to_rb_indices(&bitmap, 4, 16);
        assert_eq!(indices, vec![0, 1, 2, 3, 8, 9, 10, 11]);
    }

    #[test]
    fn test_last_group_clipped() {
        // 10 RBs in groups of 4: the last group holds only RBs 8..9
        let bitmap = vec![false, false, true];
        let indices = bitmap_to_rb_indices(&bitmap, 4, 10);
        assert_eq!(indices, vec![8, 9]);
    }

    #[test]
    fn test_empty_bitmap() {
        let bitmap = vec![false; 8];
        assert!(bitmap_to_rb_indices(&bitmap, 2, 16).is_empty());
    }

    #[test]
    fn test_bitmap_round_trip() {
        let bitmap = vec![true, false, true, true, false, false, true, false];
        let indices = bitmap_to_rb_indices(&bitmap, 2, 16);
        let rebuilt = rb_indices_to_bitmap(&indices, 2, 8);
        assert_eq!(rebuilt, bitmap);
    }

    #[test]
    fn test_round_trip_with_partial_last_group() {
        // 9 RBs in groups of 2: group 4 covers a single RB
        let bitmap = vec![true, false, false, false, true];
        let indices = bitmap_to_rb_indices(&bitmap, 2, 9);
        assert_eq!(indices, vec![0, 1, 8]);
        let rebuilt = rb_indices_to_bitmap(&indices, 2, 5);
        assert_eq!(rebuilt, bitmap);
    }
}
