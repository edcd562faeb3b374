//! Process-wide registry of live guarded regions
//!
//! Every [`GuardedBuffer`](super::guarded::GuardedBuffer) registers its
//! backing region here on construction and deregisters on release. The
//! interrupt hook walks the registry and wipes whatever is still alive
//! before the process exits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::error::{SecretboxError, SecretboxResult};

/// Exit status used after an interrupt-triggered purge (128 + SIGINT)
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// Raw view of a registered region
struct Region {
    ptr: *mut u8,
    len: usize,
}

// SAFETY: the pointer is only dereferenced while the registry lock is held,
// and owners deregister (taking the same lock) before freeing the region.
unsafe impl Send for Region {}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static REGIONS: OnceLock<Mutex<HashMap<u64, Region>>> = OnceLock::new();
static HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

fn regions() -> MutexGuard<'static, HashMap<u64, Region>> {
    REGIONS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register a region and return its tracking id
pub(crate) fn register(ptr: *mut u8, len: usize) -> u64 {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    regions().insert(id, Region { ptr, len });
    id
}

/// Forget a region. Unknown ids (already purged) are ignored.
pub(crate) fn deregister(id: u64) {
    regions().remove(&id);
}

/// Number of guarded regions currently alive in this process
pub fn live_regions() -> usize {
    regions().len()
}

/// Whether `id` is still registered
#[cfg(test)]
pub(crate) fn is_registered(id: u64) -> bool {
    regions().contains_key(&id)
}

/// Whether `ptr` falls inside any registered region
#[cfg(test)]
pub(crate) fn covers(ptr: *const u8) -> bool {
    let addr = ptr as usize;
    regions().values().any(|region| {
        let start = region.ptr as usize;
        addr >= start && addr < start + region.len
    })
}

/// Zero every live guarded region and clear the registry
///
/// Meant to run on the way out of the process. Buffers that are purged stay
/// allocated (their owners still free them) but hold only zeros afterwards.
///
/// Returns the number of regions wiped.
pub fn purge() -> usize {
    let mut map = regions();
    let count = map.len();

    for (_, region) in map.drain() {
        if region.len == 0 {
            continue;
        }
        // SAFETY: registered regions are live heap allocations; owners cannot
        // free them without first taking the registry lock we hold.
        let bytes = unsafe { std::slice::from_raw_parts_mut(region.ptr, region.len) };
        bytes.zeroize();
    }

    count
}

/// Install the interrupt hook that purges guarded memory and exits
///
/// Only the first call does anything; later calls are no-ops.
pub fn install_interrupt_hook() -> SecretboxResult<()> {
    if HOOK_INSTALLED.get().is_some() {
        return Ok(());
    }

    ctrlc::set_handler(|| {
        let wiped = purge();
        warn!("Interrupted, wiped {} guarded region(s)", wiped);
        std::process::exit(INTERRUPT_EXIT_CODE);
    })
    .map_err(|e| SecretboxError::Config(format!("Failed to install interrupt hook: {}", e)))?;

    let _ = HOOK_INSTALLED.set(());
    debug!("Interrupt hook installed");

    Ok(())
}
