//! Guarded memory for sensitive data
//!
//! [`GuardedBuffer`] owns one heap region holding plaintext, key material or
//! passwords. The region is locked into RAM where the platform allows it,
//! tracked process-wide so an interrupt can wipe it, and zero-filled the
//! moment it is released. Release happens on drop as well, so every exit
//! path (including `?` early returns) wipes.

use std::fmt;
use std::io::{ErrorKind, Read};

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use tracing::debug;
use zeroize::Zeroize;

use crate::error::{SecretboxError, SecretboxResult};

use super::tracker;

/// Initial staging size used when reading a stream of unknown length
const READ_CHUNK: usize = 8 * 1024;

/// An owned, wipe-on-release byte region
pub struct GuardedBuffer {
    region: Box<[u8]>,
    id: u64,
    locked: bool,
    released: bool,
}

impl GuardedBuffer {
    fn from_region(mut region: Box<[u8]>) -> Self {
        let locked = lock_region(&mut region);
        let id = tracker::register(region.as_mut_ptr(), region.len());
        Self {
            region,
            id,
            locked,
            released: false,
        }
    }

    fn copy_of(data: &[u8]) -> Self {
        let mut region = vec![0u8; data.len()].into_boxed_slice();
        region.copy_from_slice(data);
        Self::from_region(region)
    }

    /// Copy `data` into a guarded region, then wipe the caller's copy
    pub fn from_bytes(data: &mut [u8]) -> Self {
        let buf = Self::copy_of(data);
        data.zeroize();
        buf
    }

    /// Take ownership of `data`, copy it into a guarded region and wipe it
    pub fn from_vec(mut data: Vec<u8>) -> Self {
        let buf = Self::copy_of(&data);
        data.zeroize();
        buf
    }

    /// Read `reader` to completion into a guarded region
    ///
    /// With `limit = None` the stream is read without bound, which can
    /// exhaust memory on an endless source. Staging happens in guarded
    /// regions too, so partial reads are wiped on release or purge.
    pub fn from_reader<R: Read>(mut reader: R, limit: Option<usize>) -> SecretboxResult<Self> {
        let mut staging = Self::zeroed(READ_CHUNK);
        let mut filled = 0usize;

        loop {
            if filled == staging.len() {
                let mut grown = Self::zeroed(staging.len() * 2);
                grown.region[..filled].copy_from_slice(&staging.region[..filled]);
                staging = grown;
            }

            // Read at most one byte past the limit so overflow is detectable
            let end = match limit {
                Some(max) => staging.len().min(max.saturating_add(1)),
                None => staging.len(),
            };

            match reader.read(&mut staging.region[filled..end]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(SecretboxError::Io(format!("Failed to read input: {}", e)));
                }
            }

            if let Some(max) = limit {
                if filled > max {
                    return Err(SecretboxError::Resource(format!(
                        "input exceeds the {} byte limit",
                        max
                    )));
                }
            }
        }

        Ok(Self::copy_of(&staging.region[..filled]))
    }

    /// A zero-filled region of `len` bytes
    pub fn zeroed(len: usize) -> Self {
        Self::from_region(vec![0u8; len].into_boxed_slice())
    }

    /// A region of `len` bytes filled from the OS random source
    pub fn random(len: usize) -> Self {
        let mut buf = Self::zeroed(len);
        OsRng.fill_bytes(&mut buf.region[..]);
        buf
    }

    /// Read-only view of the contents
    pub fn bytes(&self) -> SecretboxResult<&[u8]> {
        if self.released {
            return Err(SecretboxError::BufferLifecycle);
        }
        Ok(&self.region[..])
    }

    /// Mutable view of the contents
    pub fn bytes_mut(&mut self) -> SecretboxResult<&mut [u8]> {
        if self.released {
            return Err(SecretboxError::BufferLifecycle);
        }
        Ok(&mut self.region[..])
    }

    /// Length of the region in bytes
    pub fn len(&self) -> usize {
        self.region.len()
    }

    /// Check if the region is empty
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// Whether the region is locked into physical memory
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether [`release`](Self::release) has already run
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Zero the region and make it unusable
    ///
    /// Idempotent. The storage stays allocated (and zeroed) until drop.
    pub fn release(&mut self) {
        if self.released {
            return;
        }

        self.region.zeroize();
        if self.locked {
            unlock_region(&mut self.region);
            self.locked = false;
        }
        tracker::deregister(self.id);
        self.released = true;
    }

    /// Release and drop in one step
    pub fn destroy(mut self) {
        self.release();
    }

    /// Registry id of the region
    #[cfg(test)]
    pub(crate) fn tracking_id(&self) -> u64 {
        self.id
    }

    /// Raw backing storage regardless of lifecycle state
    #[cfg(test)]
    pub(crate) fn backing_storage(&self) -> &[u8] {
        &self.region
    }
}

impl Drop for GuardedBuffer {
    fn drop(&mut self) {
        self.release();
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for GuardedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedBuffer")
            .field("len", &self.region.len())
            .field("released", &self.released)
            .finish()
    }
}

#[cfg(unix)]
fn lock_region(region: &mut [u8]) -> bool {
    if region.is_empty() {
        return false;
    }

    // SAFETY: pointer and length describe a live allocation we own
    let rc = unsafe { libc::mlock(region.as_ptr() as *const libc::c_void, region.len()) };
    if rc != 0 {
        debug!(
            "mlock of {} bytes failed: {}",
            region.len(),
            std::io::Error::last_os_error()
        );
        return false;
    }
    true
}

#[cfg(unix)]
fn unlock_region(region: &mut [u8]) {
    // SAFETY: same region that was passed to mlock
    unsafe {
        libc::munlock(region.as_ptr() as *const libc::c_void, region.len());
    }
}

#[cfg(not(unix))]
fn lock_region(_region: &mut [u8]) -> bool {
    false
}

#[cfg(not(unix))]
fn unlock_region(_region: &mut [u8]) {}
