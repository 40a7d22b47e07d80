//! HARQ Process Bookkeeping
//!
//! Tracks process-ID cycling and new-data-indicator toggling per UE and
//! direction. Only new transmissions exist in this engine, so the NDI toggle
//! marks every reuse of a process ID as fresh data.

/// HARQ state for one UE in one direction
#[derive(Debug, Clone)]
pub struct HarqEntity {
    /// Number of configured HARQ processes
    num_processes: u8,
    /// Last process ID handed out, None until the first assignment
    last_process: Option<u8>,
    /// NDI bit per process ID
    ndi: Vec<bool>,
}

impl HarqEntity {
    /// Create an entity with all NDI bits cleared
    pub fn new(num_processes: u8) -> Self {
        Self {
            num_processes,
            last_process: None,
            ndi: vec![false; num_processes as usize],
        }
    }

    /// Advance to the next HARQ process and toggle its NDI bit
    ///
    /// The first call yields process 0. Process IDs cycle modulo the
    /// configured process count on every subsequent assignment.
    pub fn assign_new_process(&mut self) -> (u8, bool) {
        let process = match self.last_process {
            Some(last) => (last + 1) % self.num_processes,
            None => 0,
        };

        let ndi = !self.ndi[process as usize];
        self.ndi[process as usize] = ndi;
        self.last_process = Some(process);

        (process, ndi)
    }

    /// Last process ID assigned, if any
    pub fn last_process(&self) -> Option<u8> {
        self.last_process
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_assignment_is_process_zero() {
        let mut entity = HarqEntity::new(8);
        assert_eq!(entity.last_process(), None);
        assert_eq!(entity.assign_new_process(), (0, true));
        assert_eq!(entity.last_process(), Some(0));
    }

    #[test]
    fn test_process_ids_cycle() {
        let mut entity = HarqEntity::new(4);
        let ids: Vec<u8> = (0..10).map(|_| entity.assign_new_process().0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_ndi_toggles_on_process_reuse() {
        let mut entity = HarqEntity::new(2);
        assert_eq!(entity.assign_new_process(), (0, true));
        assert_eq!(entity.assign_new_process(), (1, true));
        // Both processes are now reused: their NDI bits must flip
        assert_eq!(entity.assign_new_process(), (0, false));
        assert_eq!(entity.assign_new_process(), (1, false));
        assert_eq!(entity.assign_new_process(), (0, true));
    }

    #[test]
    fn test_single_process_cycles_in_place() {
        let mut entity = HarqEntity::new(1);
        assert_eq!(entity.assign_new_process(), (0, true));
        assert_eq!(entity.assign_new_process(), (0, false));
        assert_eq!(entity.assign_new_process(), (0, true));
    }
}
