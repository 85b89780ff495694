// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! Global frame-production progress tracking.
//!
//! Uses atomics so a UI thread can poll while an encode loop runs. The
//! encoder advances the counter once per completed frame; callers that know
//! the frame count up front seed it with [`init`].

use core::sync::atomic::{AtomicU32, Ordering};

static STEP: AtomicU32 = AtomicU32::new(0);
static TOTAL: AtomicU32 = AtomicU32::new(0);

/// Reset progress to 0 and set the total frame count (0 = indeterminate).
pub fn init(total: u32) {
    STEP.store(0, Ordering::Relaxed);
    TOTAL.store(total, Ordering::Relaxed);
}

/// Advance by one frame. Capped at the total when a total is set.
pub fn advance() {
    let total = TOTAL.load(Ordering::Relaxed);
    let step = STEP.fetch_add(1, Ordering::Relaxed) + 1;
    if total != 0 && step > total {
        STEP.store(total, Ordering::Relaxed);
    }
}

/// Frames produced so far.
pub fn step() -> u32 {
    STEP.load(Ordering::Relaxed)
}

/// Total frame count, 0 if indeterminate.
pub fn total() -> u32 {
    TOTAL.load(Ordering::Relaxed)
}

/// Snap the step counter to the total (encode finished early).
pub fn finish() {
    let total = TOTAL.load(Ordering::Relaxed);
    if total != 0 {
        STEP.store(total, Ordering::Relaxed);
    }
}
