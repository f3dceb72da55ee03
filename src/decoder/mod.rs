//! Decoder
use core::{fmt, ptr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Category of decoding failure
pub enum DecodeErrorKind {
    ///Input is not valid compressed data
    InvalidData,
    ///Stream requires preset dictionary
    NeedDictionary,
    ///Engine failed to allocate memory
    OutOfMemory,
    ///Engine detected inconsistency of its own state
    StateViolation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Decoding error
pub struct DecodeError {
    kind: DecodeErrorKind,
    code: i32,
}

impl DecodeError {
    #[inline(always)]
    ///Creates new error from its category and raw engine code
    pub const fn new(kind: DecodeErrorKind, code: i32) -> Self {
        Self {
            kind,
            code,
        }
    }

    #[inline(always)]
    ///Returns error category
    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    #[inline(always)]
    ///Returns raw integer
    pub const fn as_raw(&self) -> i32 {
        self.code
    }
}

impl fmt::Display for DecodeError {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{:?}({})", self.kind, self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Result of decoding
pub enum DecodeStatus {
    ///Cannot finish due to lack of input data
    NeedInput,
    ///Need to flush data somewhere before continuing
    NeedOutput,
    ///Successfully finished decoding.
    Finished,
}

#[derive(Debug)]
///Decode output
pub struct Decode {
    ///Number of bytes left unprocessed in `input`
    pub input_remain: usize,
    ///Number of bytes left unprocessed in `output`
    pub output_remain: usize,
    ///Result of decoding
    pub status: Result<DecodeStatus, DecodeError>,
}

///Decoder interface
pub struct Interface {
    decode_fn: unsafe fn(ptr::NonNull<u8>, *const u8, usize, *mut u8, usize) -> Decode,
    //returns new/updated instance, MUST be replaced
    reset_fn: fn(ptr::NonNull<u8>) -> Option<ptr::NonNull<u8>>,
    drop_fn: fn(ptr::NonNull<u8>),
    describe_error_fn: fn(i32) -> Option<&'static str>,
}

impl Interface {
    ///Creates new `Interface` with provided functions to build vtable.
    ///
    ///First argument of every function, except `describe_error_fn`, is state as pointer.
    ///
    ///It is user responsibility to pass correct function pointers
    pub const fn new(
        decode_fn: unsafe fn(ptr::NonNull<u8>, *const u8, usize, *mut u8, usize) -> Decode,
        reset_fn: fn(ptr::NonNull<u8>) -> Option<ptr::NonNull<u8>>,
        drop_fn: fn(ptr::NonNull<u8>),
        describe_error_fn: fn(i32) -> Option<&'static str>,
    ) -> Self {
        Self {
            decode_fn,
            reset_fn,
            drop_fn,
            describe_error_fn,
        }
    }

    #[inline(always)]
    pub(crate) fn inner_decoder(&'static self, instance: ptr::NonNull<u8>) -> Decoder {
        Decoder {
            instance,
            interface: self,
        }
    }

    #[inline(always)]
    ///Creates new decoder
    ///
    ///This function is unsafe as it is up to user to ensure correctness of `Interface`
    ///
    ///`state` - Decoder state, passed as first argument to every function in vtable.
    ///It is released via `drop_fn` exactly once, when `Decoder` is dropped.
    pub unsafe fn decoder(&'static self, state: ptr::NonNull<u8>) -> Decoder {
        self.inner_decoder(state)
    }
}

///Decoder
///
///Use [Interface] to instantiate decoder.
///
///Under hood, in order to avoid generics, implemented as vtable with series of function pointers.
///Engine state is released on drop.
///
///## Example
///
///Brief example for chunked decoding.
///```rust
///use ungz::{Decoder, DecodeStatus, ZlibMode};
///
///fn decompress(decoder: &mut Decoder, input: core::slice::Chunks<'_, u8>, output: &mut Vec<u8>) {
///   let mut buffer = [0u8; 4];
///   'input: for mut chunk in input {
///     loop {
///         let result = decoder.decode(chunk, &mut buffer);
///         let status = result.status.expect("success");
///         output.extend_from_slice(&buffer[..buffer.len() - result.output_remain]);
///         chunk = &chunk[chunk.len() - result.input_remain..];
///
///         match status {
///             DecodeStatus::Finished => break 'input,
///             DecodeStatus::NeedInput => break,
///             //Output buffer is full, drain it and carry on with the same chunk
///             DecodeStatus::NeedOutput => continue,
///         }
///     }
///   }
///
///   //Make sure to reset state, if you want to re-use decoder.
///   decoder.reset();
///}
///
///const COMPRESSED: &[u8] = &[
///    0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0xcb, 0x48, 0xcd, 0xc9, 0xc9, 0x57,
///    0x28, 0xcf, 0x2f, 0xca, 0x49, 0x01, 0x00, 0x85, 0x11, 0x4a, 0x0d, 0x0b, 0x00, 0x00, 0x00,
///];
///
///let mut output = Vec::new();
///let mut decoder = ungz::decoder::Interface::zlib(ZlibMode::Auto).expect("to create zlib decoder");
///decompress(&mut decoder, COMPRESSED.chunks(5), &mut output);
///assert_eq!(output, b"hello world");
///```
pub struct Decoder {
    instance: ptr::NonNull<u8>,
    interface: &'static Interface,
}

impl Decoder {
    #[inline(always)]
    ///Raw decoding function, with no checks.
    ///
    ///Intended to be used as building block of higher level interfaces
    ///
    ///Arguments
    ///
    ///- `input` - Pointer to start of input to process. MUST NOT be null.
    ///- `input_len` - Size of data to process in `input`
    ///- `ouput` - Pointer to start of buffer where to write result. MUST NOT be null
    ///- `output_len` - Size of buffer pointed by `output`
    pub unsafe fn raw_decode(&mut self, input: *const u8, input_len: usize, output: *mut u8, output_len: usize) -> Decode {
        (self.interface.decode_fn)(self.instance, input, input_len, output, output_len)
    }

    #[inline(always)]
    ///Decodes `input` into `output`.
    ///
    ///Consumes prefix of `input` and writes at most `output.len()` bytes.
    pub fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Decode {
        let input_len = input.len();
        let output_len = output.len();
        unsafe {
            self.raw_decode(input.as_ptr(), input_len, output.as_mut_ptr(), output_len)
        }
    }

    #[inline(always)]
    ///Resets `Decoder` state to initial.
    ///
    ///Returns `true` if successfully reset, otherwise `false`
    pub fn reset(&mut self) -> bool {
        match (self.interface.reset_fn)(self.instance) {
            Some(ptr) => {
                self.instance = ptr;
                true
            },
            None => false,
        }
    }

    #[inline(always)]
    ///Returns descriptive text for error.
    pub fn describe_error(&self, error: DecodeError) -> Option<&'static str> {
        (self.interface.describe_error_fn)(error.as_raw())
    }
}

impl Drop for Decoder {
    #[inline]
    fn drop(&mut self) {
        (self.interface.drop_fn)(self.instance);
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Decoder").field("instance", &self.instance).finish()
    }
}

mod zlib_common;
pub use zlib_common::ZlibMode;
mod zlib;
