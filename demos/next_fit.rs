use std::mem::size_of;
use std::process;
use std::ptr::{self, NonNull};

use log::LevelFilter;
use nextfit::{allocate, init_pool, release};
use simple_logger::SimpleLogger;

const INITIAL_POOL_SIZE: usize = 1024;

/// Prints an error message to the standard error stream and exits.
fn fail(message: &str) -> ! {
  eprintln!("{message}");
  process::exit(1);
}

fn must_allocate(size: usize, message: &str) -> NonNull<u8> {
  match allocate(size) {
    Ok(payload) => payload,
    Err(_) => fail(message),
  }
}

fn main() {
  SimpleLogger::new()
    .with_level(LevelFilter::Debug)
    .init()
    .unwrap();

  if init_pool(INITIAL_POOL_SIZE).is_err() {
    fail("Failed to initialize the memory pool");
  }

  // --------------------------------------------------------------------
  // 1) Allocate memory for a string and write through the raw pointer.
  // --------------------------------------------------------------------
  println!("Allocating memory for a string");
  let text = "Memory Allocator";
  let str1 = must_allocate(20, "Failed to allocate memory for string");
  unsafe {
    ptr::copy_nonoverlapping(text.as_ptr(), str1.as_ptr(), text.len());
    let written = std::slice::from_raw_parts(str1.as_ptr(), text.len());
    println!("String: {}", std::str::from_utf8(written).unwrap());
  }

  // --------------------------------------------------------------------
  // 2) Allocate memory for an array of integers.
  // --------------------------------------------------------------------
  println!("\nAllocating memory for an array of integers");
  let int_array = must_allocate(
    5 * size_of::<i32>(),
    "Failed to allocate memory for integer array",
  )
  .as_ptr() as *mut i32;
  unsafe {
    for i in 0..5 {
      int_array.add(i).write(i as i32 * 2);
    }
    print!("Integer array: ");
    for i in 0..5 {
      print!("{} ", int_array.add(i).read());
    }
    println!();
  }

  // --------------------------------------------------------------------
  // 3) Release the string, then allocate again: the released chunk is
  //    reused because the cursor still points at it.
  // --------------------------------------------------------------------
  println!("\nDeallocating memory for string");
  unsafe { release(str1.as_ptr()) };

  println!("Allocating memory for another string, should reuse the previously deallocated memory");
  let str2 = must_allocate(20, "Failed to allocate memory for second string");
  println!("Returned address: {:?}", str2.as_ptr());

  println!("\nDeallocating memory for integer array");
  unsafe { release(int_array as *mut u8) };

  // --------------------------------------------------------------------
  // 4) A large array far exceeds the remaining pool and forces growth.
  // --------------------------------------------------------------------
  println!("Allocating memory for a large array, may require additional memory allocation");
  let large_array = must_allocate(
    100_000 * size_of::<u64>(),
    "Failed to allocate memory for large array",
  );
  println!("Returned address: {:?}", large_array.as_ptr());

  println!("\nDeallocating memory for large array");
  unsafe { release(large_array.as_ptr()) };

  println!("Deallocating memory for second string");
  unsafe { release(str2.as_ptr()) };

  // --------------------------------------------------------------------
  // 5) Edge cases: zero bytes and a null release.
  // --------------------------------------------------------------------
  println!("Allocating zero bytes, should return a non-NULL pointer");
  match allocate(0) {
    Ok(zero_ptr) => {
      println!(
        "Allocating zero bytes returned a non-NULL pointer: {:?}",
        zero_ptr.as_ptr()
      );
      unsafe { release(zero_ptr.as_ptr()) };
    }
    Err(error) => println!("Allocating zero bytes failed: {error}"),
  }

  println!("\nDeallocating NULL pointer (should not crash)");
  unsafe { release(ptr::null_mut()) };
}
