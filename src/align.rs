use crate::chunk::HEADER_SIZE;

/// Boundary every chunk size and payload pointer is rounded to, in bytes.
pub const ALIGNMENT: usize = 8;

/// Rounds the given size up to the 8-byte chunk boundary.
///
/// # Examples
///
/// ```rust
/// use nextfit::align;
///
/// assert_eq!(align!(13), 16);
/// assert_eq!(align!(16), 16);
/// assert_eq!(align!(0), 0);
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    ($value + $crate::align::ALIGNMENT - 1) & !($crate::align::ALIGNMENT - 1)
  };
}

/// Total chunk size backing a `payload`-byte request: the payload plus the
/// header, rounded up to the chunk boundary.
///
/// Returns `None` when the arithmetic would wrap around `usize`.
pub(crate) fn adjusted_size(payload: usize) -> Option<usize> {
  payload
    .checked_add(HEADER_SIZE)?
    .checked_add(ALIGNMENT - 1)
    .map(|padded| padded & !(ALIGNMENT - 1))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_align() {
    let mut alignments = Vec::new();

    for i in 0..10 {
      let sizes = (ALIGNMENT * i + 1)..=(ALIGNMENT * (i + 1));

      let expected_alignment = ALIGNMENT * (i + 1);

      alignments.push((sizes, expected_alignment));
    }

    for (sizes, expected) in alignments {
      for size in sizes {
        assert_eq!(expected, align!(size));
      }
    }
  }

  #[test]
  fn test_adjusted_size_covers_header() {
    assert_eq!(adjusted_size(0), Some(align!(HEADER_SIZE)));
    assert_eq!(adjusted_size(20), Some(align!(20 + HEADER_SIZE)));
  }

  #[test]
  fn test_adjusted_size_overflow_is_rejected() {
    assert_eq!(adjusted_size(usize::MAX), None);
    assert_eq!(adjusted_size(usize::MAX - HEADER_SIZE), None);
  }
}
