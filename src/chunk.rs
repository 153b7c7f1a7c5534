use std::mem;

/// Metadata record prefixed to every chunk of pool memory.
///
/// `next` links the chunk into the free list and is meaningful only while
/// the chunk is a member of it; once the chunk is handed out, the field is
/// stale and ignored. Free versus allocated is purely a matter of list
/// membership.
#[repr(C)]
pub struct Chunk {
  /// Total bytes occupied by this chunk, header included. Always a
  /// multiple of [`ALIGNMENT`](crate::align::ALIGNMENT).
  pub size: usize,
  pub next: *mut Chunk,
}

/// Bytes taken by the [`Chunk`] header at the start of every chunk.
pub const HEADER_SIZE: usize = mem::size_of::<Chunk>();

impl Chunk {
  /// Formats the memory at `address` as a chunk header.
  ///
  /// # Safety
  ///
  /// `address` must point to at least `HEADER_SIZE` writable bytes on an
  /// 8-byte boundary, owned by the allocator.
  pub unsafe fn format(
    address: *mut u8,
    size: usize,
    next: *mut Chunk,
  ) -> *mut Chunk {
    let chunk = address as *mut Chunk;

    unsafe {
      (*chunk).size = size;
      (*chunk).next = next;
    }

    chunk
  }

  /// First byte past the header: the pointer handed to callers.
  ///
  /// # Safety
  ///
  /// `chunk` must point to a formatted chunk header.
  pub unsafe fn payload(chunk: *mut Chunk) -> *mut u8 {
    unsafe { (chunk as *mut u8).add(HEADER_SIZE) }
  }

  /// Recovers the header from a payload pointer previously produced by
  /// [`Chunk::payload`].
  ///
  /// # Safety
  ///
  /// `payload` must have been returned by `allocate` on the same pool and
  /// not released since; anything else corrupts the free list.
  pub unsafe fn from_payload(payload: *mut u8) -> *mut Chunk {
    unsafe { payload.sub(HEADER_SIZE) as *mut Chunk }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::ptr;

  #[test]
  fn test_header_layout() {
    assert_eq!(HEADER_SIZE, 2 * mem::size_of::<usize>());
    assert_eq!(mem::align_of::<Chunk>(), mem::align_of::<usize>());
  }

  #[test]
  fn test_payload_round_trip() {
    let mut backing = [0u64; 8];

    unsafe {
      let chunk = Chunk::format(backing.as_mut_ptr() as *mut u8, 64, ptr::null_mut());
      let payload = Chunk::payload(chunk);

      assert_eq!(payload as usize, chunk as usize + HEADER_SIZE);
      assert_eq!(Chunk::from_payload(payload), chunk);
      assert_eq!((*chunk).size, 64);
      assert!((*chunk).next.is_null());
    }
  }
}
