//! # nextfit - A Next-Fit Free-List Memory Allocator
//!
//! This crate implements a **next-fit free-list allocator** over a single
//! growable memory pool, managed without any existing allocator underneath.
//!
//! ## Overview
//!
//! Every block of pool memory, free or allocated, starts with a small
//! header. Free blocks are threaded into a singly linked list; allocated
//! blocks are simply the ones the list does not reach.
//!
//! ```text
//!   Single Chunk:
//!   ┌───────────────────────┬────────────────────────────────┐
//!   │    Chunk Header       │           Payload              │
//!   │  ┌─────────────────┐  │                                │
//!   │  │ size: N         │  │  ┌──────────────────────────┐  │
//!   │  │ next: null/ptr  │  │  │   N - 16 bytes usable    │  │
//!   │  └─────────────────┘  │  │                          │  │
//!   │      16 bytes         │  └──────────────────────────┘  │
//!   └───────────────────────┴────────────────────────────────┘
//!                           ▲
//!                           └── Pointer returned to the caller
//! ```
//!
//! Allocation walks the free list with a **next-fit** strategy: the search
//! resumes from the cursor (the chunk touched by the previous operation)
//! instead of restarting at the head, and it does not wrap around.
//!
//! ```text
//!   Free list (insertion order, not address order):
//!
//!   head ──► ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐
//!            │ 48 B │───►│ 96 B │───►│ 32 B │───►│904 B │───► null
//!            └──────┘    └──────┘    └──────┘    └──────┘
//!                                    ▲
//!                                    │ cursor
//!                                    └── next search starts here;
//!                                        chunks to the left are skipped
//! ```
//!
//! When no chunk on the walk fits, the pool grows by exactly the adjusted
//! request size. Oversized chunks are split in place; the remainder becomes
//! a new free chunk. Released chunks are pushed onto the front of the list
//! as-is; adjacent free chunks are never merged, so fragmentation
//! accumulates over time.
//!
//! ## Crate Structure
//!
//! ```text
//!   nextfit
//!   ├── align      - 8-byte alignment macro and checked size arithmetic
//!   ├── chunk      - chunk header record (internal)
//!   ├── grow       - HeapSource trait and the sbrk-backed default source
//!   ├── next_fit   - NextFitAllocator implementation
//!   ├── error      - AllocError
//!   └── pool       - process-wide pool behind one global lock
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use nextfit::NextFitAllocator;
//!
//! fn main() -> Result<(), nextfit::AllocError> {
//!     let mut allocator = NextFitAllocator::new();
//!     allocator.init_pool(1024)?;
//!
//!     let ptr = allocator.allocate(20)?;
//!     unsafe {
//!         ptr.as_ptr().write_bytes(0x42, 20);
//!         allocator.release(ptr.as_ptr());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! A process-wide pool with the original two-function surface is also
//! available as [`init_pool`], [`allocate`], and [`release`]; one global
//! lock serializes those calls, growth included.
//!
//! ## How It Grows
//!
//! The default [`Sbrk`] source extends the program's data segment:
//!
//! ```text
//!   Program Memory Layout:
//!
//!   High Address ┌─────────────────────┐
//!                │       Stack         │ ↓ grows down
//!                │         │           │
//!                │         ▼           │
//!                │                     │
//!                │         ▲           │
//!                │         │           │
//!                │       Pool          │ ↑ grows up (sbrk)
//!                ├─────────────────────┤ ← Program Break
//!                │        Data         │
//!                ├─────────────────────┤
//!                │        Text         │
//!   Low Address  └─────────────────────┘
//! ```
//!
//! Any other growth policy plugs in through the [`HeapSource`] trait; the
//! test suite uses a deterministic arena source this way.
//!
//! ## Limitations
//!
//! - **No coalescing**: adjacent free chunks stay separate forever
//! - **No shrinking**: pool memory is never returned to the OS
//! - **Coarse locking**: the process-wide pool serializes every call
//! - **No corruption detection**: releasing a foreign or already-released
//!   pointer silently corrupts the free list
//! - **Unix-only default source**: [`Sbrk`] requires `libc` and `sbrk(2)`
//!
//! ## Safety
//!
//! Allocating is safe; using the returned memory and releasing it are not.
//! A payload pointer is a non-owning lease that must be returned exactly
//! once via `release`, and only to the pool it came from.

pub mod align;
mod chunk;
mod error;
mod grow;
mod next_fit;
mod pool;

pub use chunk::HEADER_SIZE;
pub use error::AllocError;
pub use grow::{HeapSource, Sbrk};
pub use next_fit::NextFitAllocator;
pub use pool::{allocate, init_pool, release};
