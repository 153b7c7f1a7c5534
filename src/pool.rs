use std::ptr::NonNull;

use parking_lot::Mutex;

use crate::error::AllocError;
use crate::grow::Sbrk;
use crate::next_fit::NextFitAllocator;

/// The process-wide pool. One lock serializes every operation, pool growth
/// included: a slow `sbrk` for a large request stalls all other callers for
/// its duration.
static POOL: Mutex<Option<NextFitAllocator<Sbrk>>> = Mutex::new(None);

/// Initializes the process-wide pool with one free chunk of `initial_size`
/// bytes.
///
/// Meant to be called once, before the pool sees concurrent use. Calling it
/// again replaces the pool; chunks from the old pool are abandoned in
/// place, consistent with the pool never shrinking back to the OS.
pub fn init_pool(initial_size: usize) -> Result<(), AllocError> {
  let mut pool = POOL.lock();

  let mut allocator = NextFitAllocator::new();
  allocator.init_pool(initial_size)?;
  *pool = Some(allocator);

  Ok(())
}

/// Allocates `size` bytes from the process-wide pool.
///
/// Zero is a legal size. On a pool that was never initialized the free
/// list starts empty and the first request grows it on demand.
pub fn allocate(size: usize) -> Result<NonNull<u8>, AllocError> {
  let mut pool = POOL.lock();

  pool
    .get_or_insert_with(NextFitAllocator::new)
    .allocate(size)
}

/// Returns a payload pointer to the process-wide pool. Null is a no-op,
/// settled before the lock is even taken.
///
/// # Safety
///
/// `payload` must be null or a pointer previously returned by [`allocate`]
/// and not released since.
pub unsafe fn release(payload: *mut u8) {
  if payload.is_null() {
    return;
  }

  if let Some(allocator) = POOL.lock().as_mut() {
    unsafe { allocator.release(payload) };
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::ptr;

  // The only test in the crate touching the process-wide pool, so the
  // address assertion cannot race with other unit tests.
  #[test]
  fn global_surface_reuses_released_chunks() {
    init_pool(256).unwrap();

    let first = allocate(16).unwrap();
    unsafe {
      ptr::write_bytes(first.as_ptr(), 0x7E, 16);
      release(first.as_ptr());
    }

    let second = allocate(16).unwrap();
    assert_eq!(second, first);

    unsafe {
      release(second.as_ptr());
      release(ptr::null_mut());
    }

    assert!(allocate(0).is_ok());
  }
}
