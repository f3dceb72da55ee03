//!Allocation callbacks routing engine memory through Rust's global allocator
//!
//!Engine allocations become visible to whatever `#[global_allocator]` the program installs,
//!which is what keeps the working set of a decompression run measurable.
use core::ffi::{c_void, c_uint};

extern crate alloc;

use core::{mem, ptr};
use alloc::alloc::Layout;

//Linux & win 32 bit are 8
#[cfg(not(any(target_os = "macos", all(windows, target_pointer_width = "64"))))]
const MIN_ALIGN: usize = 8;
//Mac and  win 64 bit are 16
#[cfg(any(target_os = "macos", all(windows, target_pointer_width = "64")))]
const MIN_ALIGN: usize = 16;

//Allocation size is stored right before returned pointer
const LAYOUT_OFFSET: usize = mem::size_of::<usize>();

#[cold]
#[inline(never)]
fn unlikely_null() -> *mut c_void {
    ptr::null_mut()
}

#[inline]
///`malloc` impl with Rust allocator
///
///Returns null on zero size or allocation failure.
pub unsafe extern "C" fn ungz_malloc(size: usize) -> *mut c_void {
    if size == 0 {
        return unlikely_null();
    }

    let full_size = match size.checked_add(LAYOUT_OFFSET) {
        Some(full_size) => full_size,
        None => return unlikely_null(),
    };

    if let Ok(layout) = Layout::from_size_align(full_size, MIN_ALIGN) {
        let mem = alloc::alloc::alloc(layout);
        if !mem.is_null() {
            ptr::write(mem as *mut usize, size);
            return mem.add(LAYOUT_OFFSET) as _
        }
    }

    unlikely_null()
}

#[inline]
///`free` impl with Rust allocator
///
///Accepts only pointers returned by [ungz_malloc] or null.
pub unsafe extern "C" fn ungz_free(mem: *mut c_void) {
    if !mem.is_null() {
        let mem = (mem as *mut u8).offset(-(LAYOUT_OFFSET as isize));
        let size = ptr::read(mem as *const usize);
        let layout = Layout::from_size_align_unchecked(size + LAYOUT_OFFSET, MIN_ALIGN);
        alloc::alloc::dealloc(mem, layout);
    }
}

///`zalloc` for `z_stream`
pub(crate) unsafe extern "C" fn ungz_zalloc(_: *mut c_void, items: c_uint, size: c_uint) -> *mut c_void {
    match (items as usize).checked_mul(size as usize) {
        Some(0) | None => unlikely_null(),
        Some(size) => ungz_malloc(size),
    }
}

///`zfree` for `z_stream`
pub(crate) unsafe extern "C" fn ungz_zfree(_: *mut c_void, mem: *mut c_void) {
    ungz_free(mem)
}
