//! Purging wipes every live guarded region in the process.
//!
//! Kept in its own test binary: a purge would clobber buffers belonging to
//! unrelated tests running in parallel.

use secretbox::crypto::tracker;
use secretbox::GuardedBuffer;

#[test]
fn test_purge_wipes_live_buffers() {
    let a = GuardedBuffer::from_vec(b"first secret".to_vec());
    let b = GuardedBuffer::from_vec(b"second secret".to_vec());
    assert!(tracker::live_regions() >= 2);

    let wiped = tracker::purge();

    assert!(wiped >= 2);
    assert_eq!(tracker::live_regions(), 0);
    assert!(a.bytes().unwrap().iter().all(|&byte| byte == 0));
    assert!(b.bytes().unwrap().iter().all(|&byte| byte == 0));

    // Owners can still release and drop purged buffers
    a.destroy();
    drop(b);
    assert_eq!(tracker::live_regions(), 0);
}
