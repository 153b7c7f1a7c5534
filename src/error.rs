use thiserror::Error;

/// Failures reported by [`allocate`](crate::NextFitAllocator::allocate) and
/// [`init_pool`](crate::NextFitAllocator::init_pool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
  /// The heap source refused to extend the pool.
  #[error("out of memory: the heap source refused to extend the pool")]
  OutOfMemory,
  /// Rounding the request up to the chunk layout overflowed `usize`.
  #[error("requested size overflows the chunk size arithmetic")]
  SizeOverflow,
}
