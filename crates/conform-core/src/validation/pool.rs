//! Recycled scratch buffers for the optimized validator
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};

/// Default number of idle buffers kept for reuse
pub const DEFAULT_MAX_RETAINED: usize = 32;

/// Working storage for one validation call
#[derive(Debug, Default)]
pub struct Scratch {
    /// Violations collected so far
    pub errors: Vec<String>,
    /// Path of the node being visited, extended and truncated in place
    pub path: String,
}

impl Scratch {
    fn reset(&mut self) {
        self.errors.clear();
        self.path.clear();
    }

    /// Move the collected errors out, keeping this buffer's capacity
    pub fn take_errors(&mut self) -> Vec<String> {
        let capacity = self.errors.capacity();
        std::mem::replace(&mut self.errors, Vec::with_capacity(capacity))
    }
}

/// Free list of scratch buffers
#[derive(Debug)]
pub struct ScratchPool {
    free: Mutex<Vec<Scratch>>,
    max_retained: usize,
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETAINED)
    }
}

impl ScratchPool {
    /// Create a pool keeping at most `max_retained` idle buffers
    pub fn new(max_retained: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_retained,
        }
    }

    /// Borrow a buffer for the duration of one call
    ///
    /// The buffer returns to the pool, cleared, when the guard drops.
    pub fn acquire(&self) -> ScratchGuard<'_> {
        let scratch = self.free.lock().pop().unwrap_or_default();
        ScratchGuard {
            pool: self,
            scratch: Some(scratch),
        }
    }

    /// Number of idle buffers waiting for reuse
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    fn release(&self, mut scratch: Scratch) {
        scratch.reset();
        let mut free = self.free.lock();
        if free.len() < self.max_retained {
            free.push(scratch);
        }
    }
}

/// Exclusive handle on a pooled [`Scratch`]
pub struct ScratchGuard<'a> {
    pool: &'a ScratchPool,
    scratch: Option<Scratch>,
}

impl Deref for ScratchGuard<'_> {
    type Target = Scratch;

    fn deref(&self) -> &Scratch {
        self.scratch.as_ref().expect("scratch is present until drop")
    }
}

impl DerefMut for ScratchGuard<'_> {
    fn deref_mut(&mut self) -> &mut Scratch {
        self.scratch.as_mut().expect("scratch is present until drop")
    }
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        if let Some(scratch) = self.scratch.take() {
            self.pool.release(scratch);
        }
    }
}
