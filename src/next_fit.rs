use std::ptr::{self, NonNull};

use log::{debug, trace, warn};

use crate::align::{ALIGNMENT, adjusted_size};
use crate::chunk::{Chunk, HEADER_SIZE};
use crate::error::AllocError;
use crate::grow::{HeapSource, Sbrk};

/// A next-fit free-list allocator over a single growable memory pool.
///
/// Free chunks form an unordered singly linked list, most recently released
/// first. `cursor` remembers the chunk last touched by an allocation or a
/// release: searches resume there instead of restarting at the head, and
/// releases raise it toward the highest known address.
///
/// The pool never shrinks. Released chunks go back on the free list as-is;
/// address-adjacent free chunks are never merged, so fragmentation
/// accumulates over time.
pub struct NextFitAllocator<S: HeapSource = Sbrk> {
  free_list: *mut Chunk,
  cursor: *mut Chunk,
  source: S,
}

// The allocator exclusively owns every chunk header it ever formats; the
// payload pointers handed to callers are non-owning leases returned through
// `release`.
unsafe impl<S: HeapSource + Send> Send for NextFitAllocator<S> {}

impl NextFitAllocator<Sbrk> {
  /// Creates an empty allocator that grows through `sbrk`.
  pub fn new() -> Self {
    Self::with_source(Sbrk)
  }
}

impl Default for NextFitAllocator<Sbrk> {
  fn default() -> Self {
    Self::new()
  }
}

impl<S: HeapSource> NextFitAllocator<S> {
  /// Creates an empty allocator drawing pool memory from `source`.
  ///
  /// The free list starts empty; the first allocation grows the pool on
  /// demand unless [`init_pool`](Self::init_pool) seeds it first.
  pub fn with_source(source: S) -> Self {
    Self {
      free_list: ptr::null_mut(),
      cursor: ptr::null_mut(),
      source,
    }
  }

  /// Seeds the pool with one free chunk of `initial_size` bytes, installed
  /// as both the free-list head and the cursor.
  ///
  /// `initial_size` is rounded up to the chunk boundary, with
  /// [`HEADER_SIZE`] as the floor; an odd size would leave every region the
  /// source hands out afterwards off the boundary.
  pub fn init_pool(&mut self, initial_size: usize) -> Result<(), AllocError> {
    let initial_size = initial_size
      .max(HEADER_SIZE)
      .checked_add(ALIGNMENT - 1)
      .ok_or(AllocError::SizeOverflow)?
      & !(ALIGNMENT - 1);

    let region = self
      .source
      .extend(initial_size)
      .ok_or(AllocError::OutOfMemory)?;

    let chunk = unsafe { Chunk::format(region.as_ptr(), initial_size, ptr::null_mut()) };
    self.free_list = chunk;
    self.cursor = chunk;

    debug!("pool initialized with {initial_size} bytes");

    Ok(())
  }

  /// Allocates `size` bytes and returns a pointer to the payload, aligned
  /// to the chunk boundary and usable for at least `size` bytes.
  ///
  /// Zero is a legal size and yields a distinct, releasable pointer. Fails
  /// with [`AllocError::OutOfMemory`] only when the heap source refuses to
  /// grow the pool, and with [`AllocError::SizeOverflow`] when the request
  /// is too large for the chunk size arithmetic; neither failure leaves any
  /// state change behind.
  pub fn allocate(&mut self, size: usize) -> Result<NonNull<u8>, AllocError> {
    let adjusted = adjusted_size(size).ok_or(AllocError::SizeOverflow)?;

    let (mut chunk, mut prev) = self.search_start();

    unsafe {
      while !chunk.is_null() && (*chunk).size < adjusted {
        prev = chunk;
        chunk = (*chunk).next;
      }

      if chunk.is_null() {
        // No fit along the walk; prev is the free-list tail here (or null
        // when the list is empty).
        chunk = self.grow(adjusted, prev)?;
      }

      // Carve the tail off an oversized chunk, provided the remainder can
      // hold its own header.
      if (*chunk).size - adjusted >= HEADER_SIZE {
        let remainder = Chunk::format(
          (chunk as *mut u8).add(adjusted),
          (*chunk).size - adjusted,
          (*chunk).next,
        );
        (*chunk).size = adjusted;
        (*chunk).next = remainder;
      }

      if prev.is_null() {
        self.free_list = (*chunk).next;
      } else {
        (*prev).next = (*chunk).next;
      }

      self.cursor = chunk;

      let payload = Chunk::payload(chunk);
      trace!("allocate({size}) -> {payload:p}, {adjusted}-byte chunk");

      Ok(NonNull::new_unchecked(payload))
    }
  }

  /// Returns a payload pointer to the pool. Null is a no-op.
  ///
  /// The chunk becomes the new free-list head, and the cursor moves to it
  /// when its address exceeds the cursor's (or the cursor is null). No
  /// merging with neighboring free chunks takes place.
  ///
  /// # Safety
  ///
  /// `payload` must be null or a pointer previously returned by
  /// [`allocate`](Self::allocate) on this allocator and not released since.
  /// Foreign, mid-buffer, or double-released pointers corrupt the free
  /// list.
  pub unsafe fn release(&mut self, payload: *mut u8) {
    if payload.is_null() {
      return;
    }

    unsafe {
      let chunk = Chunk::from_payload(payload);

      (*chunk).next = self.free_list;
      self.free_list = chunk;

      if self.cursor.is_null() || chunk > self.cursor {
        self.cursor = chunk;
      }

      trace!("release({payload:p}), {}-byte chunk", (*chunk).size);
    }
  }

  /// Number of chunks currently on the free list.
  pub fn free_chunk_count(&self) -> usize {
    let mut count = 0;
    let mut chunk = self.free_list;

    while !chunk.is_null() {
      count += 1;
      chunk = unsafe { (*chunk).next };
    }

    count
  }

  /// Total bytes, headers included, currently sitting on the free list.
  pub fn free_bytes(&self) -> usize {
    let mut bytes = 0;
    let mut chunk = self.free_list;

    while !chunk.is_null() {
      bytes += unsafe { (*chunk).size };
      chunk = unsafe { (*chunk).next };
    }

    bytes
  }

  /// Start position for the next-fit walk, along with its predecessor so
  /// the unlink can repair the list.
  ///
  /// While the cursor is still a free-list member the walk starts there and
  /// never wraps: chunks earlier in the list are not considered. Once the
  /// cursor has been handed out it no longer marks a list position, and the
  /// walk starts at the head.
  fn search_start(&self) -> (*mut Chunk, *mut Chunk) {
    let mut prev = ptr::null_mut();
    let mut chunk = self.free_list;

    while !chunk.is_null() {
      if chunk == self.cursor {
        return (chunk, prev);
      }
      prev = chunk;
      chunk = unsafe { (*chunk).next };
    }

    (self.free_list, ptr::null_mut())
  }

  /// Requests exactly `adjusted` bytes from the heap source and appends
  /// them to the free list after `tail` (or as the sole member).
  fn grow(&mut self, adjusted: usize, tail: *mut Chunk) -> Result<*mut Chunk, AllocError> {
    let region = match self.source.extend(adjusted) {
      Some(region) => region,
      None => {
        warn!("pool growth of {adjusted} bytes refused by the heap source");
        return Err(AllocError::OutOfMemory);
      }
    };

    debug!("pool grown by {adjusted} bytes");

    let chunk = unsafe { Chunk::format(region.as_ptr(), adjusted, ptr::null_mut()) };

    if tail.is_null() {
      self.free_list = chunk;
    } else {
      unsafe { (*tail).next = chunk };
    }

    Ok(chunk)
  }
}
