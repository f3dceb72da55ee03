//! `zlib` wrapper

extern crate alloc;

use libz_sys as sys;

use core::{mem, ptr};
use core::ffi::{c_char, c_int};
use alloc::boxed::Box;

use super::{Interface, Decoder, Decode, DecodeError, DecodeErrorKind, DecodeStatus};
use super::zlib_common::ZlibMode;
use crate::mem::{ungz_zalloc, ungz_zfree};

extern "C" {
    pub fn zError(code: c_int) -> *const c_char;
}

///`zlib` interface
static ZLIB: Interface = Interface {
    drop_fn,
    reset_fn,
    decode_fn,
    describe_error_fn,
};

#[repr(transparent)]
struct State {
    inner: sys::z_stream,
}

impl State {
    fn reset(&mut self) -> bool {
        unsafe {
            sys::inflateReset(&mut self.inner) == sys::Z_OK
        }
    }
}

impl Drop for State {
    #[inline(always)]
    fn drop(&mut self) {
        unsafe {
            sys::inflateEnd(&mut self.inner);
        }
    }
}

impl Interface {
    ///Creates decoder with `zlib` interface
    ///
    ///Returns `None` if unable to initialize it (likely due to lack of memory)
    pub fn zlib(mode: ZlibMode) -> Option<Decoder> {
        let mut instance = Box::new(State {
            inner: sys::z_stream {
                next_in: ptr::null_mut(),
                avail_in: 0,
                total_in: 0,
                next_out: ptr::null_mut(),
                avail_out: 0,
                total_out: 0,
                msg: ptr::null_mut(),
                state: ptr::null_mut(),
                zalloc: ungz_zalloc,
                zfree: ungz_zfree,
                opaque: ptr::null_mut(),
                data_type: 0,
                adler: 0,
                reserved: 0,
            },
        });
        let result = unsafe {
            sys::inflateInit2_(&mut instance.inner, mode.window_bits(), sys::zlibVersion(), mem::size_of::<sys::z_stream>() as _)
        };

        if result == sys::Z_OK {
            let instance = unsafe {
                ptr::NonNull::new_unchecked(Box::into_raw(instance)).cast()
            };
            Some(ZLIB.inner_decoder(instance))
        } else {
            None
        }
    }
}

#[inline]
fn map_status(result: c_int, avail_out: usize) -> Result<DecodeStatus, DecodeError> {
    match result {
        sys::Z_OK | sys::Z_BUF_ERROR => match avail_out {
            0 => Ok(DecodeStatus::NeedOutput),
            _ => Ok(DecodeStatus::NeedInput),
        },
        sys::Z_STREAM_END => Ok(DecodeStatus::Finished),
        sys::Z_DATA_ERROR => Err(DecodeError::new(DecodeErrorKind::InvalidData, result)),
        sys::Z_NEED_DICT => Err(DecodeError::new(DecodeErrorKind::NeedDictionary, result)),
        sys::Z_MEM_ERROR => Err(DecodeError::new(DecodeErrorKind::OutOfMemory, result)),
        other => Err(DecodeError::new(DecodeErrorKind::StateViolation, other)),
    }
}

#[inline]
unsafe fn decode_fn(state: ptr::NonNull<u8>, input: *const u8, input_len: usize, output: *mut u8, output_len: usize) -> Decode {
    let state = &mut *(state.as_ptr() as *mut State);

    //z_stream counters are 32bit, so feed no more than fits and report the rest as remaining
    let input_fed = input_len.min(sys::uInt::MAX as usize);
    let output_fed = output_len.min(sys::uInt::MAX as usize);

    state.inner.avail_out = output_fed as _;
    state.inner.next_out = output;

    state.inner.avail_in = input_fed as _;
    state.inner.next_in = input as *mut _;

    let result = sys::inflate(&mut state.inner, sys::Z_NO_FLUSH);

    let output_remain = state.inner.avail_out as usize + (output_len - output_fed);
    Decode {
        input_remain: state.inner.avail_in as usize + (input_len - input_fed),
        output_remain,
        status: map_status(result, output_remain),
    }
}

#[inline]
fn reset_fn(state: ptr::NonNull<u8>) -> Option<ptr::NonNull<u8>> {
    let result = unsafe {
        (*(state.as_ptr() as *mut State)).reset()
    };
    if result {
        Some(state)
    } else {
        None
    }
}

#[inline]
fn drop_fn(data: ptr::NonNull<u8>) {
    unsafe {
        drop(Box::from_raw(data.as_ptr() as *mut State));
    }
}

#[inline]
fn describe_error_fn(code: i32) -> Option<&'static str> {
    let result = unsafe {
        zError(code)
    };
    crate::utils::convert_c_str(result)
}
