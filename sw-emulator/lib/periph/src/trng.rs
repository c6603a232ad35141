/*++

Licensed under the Apache-2.0 license.

File Name:

    trng.rs

Abstract:

    File contains the entropy source and health test model of the emulated
    HCA TRNG.

--*/

use std::collections::VecDeque;

/// Behaviour knobs and run-time state of the TRNG model
pub(crate) struct TrngModel {
    /// Status reads that report the health test as running
    pub(crate) ht_duration: u32,

    /// Value of the data register while the health test runs
    pub(crate) ht_sample: u32,

    /// Report a failed health test on completion
    pub(crate) ht_fail: bool,

    /// Status reads that report "not ready" before each sample
    pub(crate) ready_delay: u32,

    ht_running: bool,

    ht_remaining: u32,

    ht_failed: bool,

    ready_remaining: u32,

    samples: VecDeque<u32>,

    /// xorshift32 state used once `samples` runs dry
    seed: u32,
}

impl TrngModel {
    pub(crate) fn new() -> Self {
        Self {
            ht_duration: 3,
            ht_sample: 0,
            ht_fail: false,
            ready_delay: 1,
            ht_running: false,
            ht_remaining: 0,
            ht_failed: false,
            ready_remaining: 1,
            samples: VecDeque::new(),
            seed: 0x2545_f491,
        }
    }

    pub(crate) fn start_health_test(&mut self) {
        self.ht_running = true;
        self.ht_remaining = self.ht_duration;
        self.ht_failed = false;
    }

    pub(crate) fn push_samples(&mut self, samples: &[u32]) {
        self.samples.extend(samples.iter().copied());
    }

    /// Advance the model by one status read.
    ///
    /// # Returns
    ///
    /// `(ready, ht_running, ht_failed)`
    pub(crate) fn poll_status(&mut self) -> (bool, bool, bool) {
        if self.ht_running {
            if self.ht_remaining == 0 {
                self.ht_running = false;
                self.ht_failed = self.ht_fail;
            } else {
                self.ht_remaining -= 1;
            }
        }

        let ready = if self.ht_running {
            false
        } else if self.ready_remaining > 0 {
            self.ready_remaining -= 1;
            false
        } else {
            true
        };
        (ready, self.ht_running, self.ht_failed)
    }

    /// Read the data register, consuming one sample outside a health test
    pub(crate) fn read_data(&mut self) -> u32 {
        if self.ht_running {
            return self.ht_sample;
        }
        self.ready_remaining = self.ready_delay;
        match self.samples.pop_front() {
            Some(sample) => sample,
            None => self.next_generated(),
        }
    }

    fn next_generated(&mut self) -> u32 {
        let mut x = self.seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.seed = x;
        x
    }
}
