use std::ptr::NonNull;

use libc::{c_void, intptr_t, sbrk};

/// Source of fresh pool memory.
///
/// The allocator asks its source for more bytes whenever no free chunk
/// satisfies a request. The pool only ever grows: sources hand out fresh
/// regions and never take them back.
///
/// # Safety
///
/// A successful `extend(bytes)` must return a region of at least `bytes`
/// writable bytes, on an 8-byte boundary relative to every region the
/// source handed out before, exclusively owned by the caller, and valid for
/// the life of the allocator. The allocator writes chunk headers into these
/// regions without further checks.
pub unsafe trait HeapSource {
  /// Extends the pool by exactly `bytes` bytes and returns the base of the
  /// new region, or `None` when the environment refuses.
  fn extend(&mut self, bytes: usize) -> Option<NonNull<u8>>;
}

/// Default source: grows the pool by moving the program break with
/// `sbrk(2)`.
///
/// Easy to use, not the most efficient way to obtain memory, and Unix-only.
pub struct Sbrk;

unsafe impl HeapSource for Sbrk {
  fn extend(&mut self, bytes: usize) -> Option<NonNull<u8>> {
    // sbrk takes a signed delta; anything above isize::MAX would turn
    // negative through the cast and shrink the break.
    if bytes > isize::MAX as usize {
      return None;
    }

    let address = unsafe { sbrk(bytes as intptr_t) };

    // sbrk reports failure as (void *) -1.
    if address == usize::MAX as *mut c_void {
      return None;
    }

    NonNull::new(address as *mut u8)
  }
}
