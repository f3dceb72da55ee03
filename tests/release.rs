//! Engine state must be released exactly once per run, whatever the outcome.

use std::io::{self, Read, Write};
use std::ptr::NonNull;
use std::slice;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ungz::decoder::Interface;
use ungz::{decompress_using, Decode, DecodeError, DecodeErrorKind, DecodeStatus, Decoder, ErrorKind, Options};

const END: u8 = b'!';
const INVALID: u8 = b'#';
const BROKEN: u8 = b'%';
const OOM: u8 = b'&';

///Copies input into output until marker byte.
struct Probe {
    released: Arc<AtomicUsize>,
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

static PROBE: Interface = Interface::new(probe_decode, keep_state, release, describe);
static STALLED: Interface = Interface::new(stalled_decode, keep_state, release, describe);

unsafe fn probe_decode(_: NonNull<u8>, input: *const u8, input_len: usize, output: *mut u8, output_len: usize) -> Decode {
    let input = slice::from_raw_parts(input, input_len);
    let output = slice::from_raw_parts_mut(output, output_len);

    let mut consumed = 0;
    let mut produced = 0;
    let status = loop {
        let byte = match input.get(consumed) {
            Some(byte) => *byte,
            None => break Ok(DecodeStatus::NeedInput),
        };
        let status = match byte {
            END => Ok(DecodeStatus::Finished),
            INVALID => Err(DecodeError::new(DecodeErrorKind::InvalidData, -3)),
            BROKEN => Err(DecodeError::new(DecodeErrorKind::StateViolation, -2)),
            OOM => Err(DecodeError::new(DecodeErrorKind::OutOfMemory, -4)),
            _ if produced == output.len() => break Ok(DecodeStatus::NeedOutput),
            _ => {
                output[produced] = byte;
                produced += 1;
                consumed += 1;
                continue;
            },
        };
        consumed += 1;
        break status;
    };

    Decode {
        input_remain: input.len() - consumed,
        output_remain: output.len() - produced,
        status,
    }
}

unsafe fn stalled_decode(_: NonNull<u8>, _: *const u8, input_len: usize, _: *mut u8, output_len: usize) -> Decode {
    Decode {
        input_remain: input_len,
        output_remain: output_len,
        status: Ok(DecodeStatus::NeedInput),
    }
}

fn keep_state(state: NonNull<u8>) -> Option<NonNull<u8>> {
    Some(state)
}

fn release(state: NonNull<u8>) {
    unsafe {
        drop(Box::from_raw(state.as_ptr() as *mut Probe));
    }
}

fn describe(_: i32) -> Option<&'static str> {
    Some("probe failure")
}

fn create(interface: &'static Interface) -> (Decoder, Arc<AtomicUsize>) {
    let released = Arc::new(AtomicUsize::new(0));
    let probe = Box::new(Probe {
        released: released.clone(),
    });
    let state = NonNull::from(Box::leak(probe)).cast::<u8>();
    let decoder = unsafe {
        interface.decoder(state)
    };
    (decoder, released)
}

fn run<R: Read, W: Write>(input: R, output: W) -> (Result<ungz::Summary, ungz::Error>, usize) {
    let (decoder, released) = create(&PROBE);
    assert_eq!(released.load(Ordering::SeqCst), 0);
    let result = decompress_using(decoder, Options::new().chunk_size(16), input, output);
    (result, released.load(Ordering::SeqCst))
}

struct FailingSource;

impl Read for FailingSource {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "no data"))
    }
}

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "no space"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn should_release_on_success() {
    let mut output = Vec::new();
    let (result, released) = run(&b"hello!"[..], &mut output);
    let summary = result.expect("to finish");
    assert_eq!(released, 1);
    assert_eq!(output, b"hello");
    assert_eq!(summary.reads, 1);
    assert_eq!(summary.decode_calls, 1);
}

#[test]
fn should_drain_full_output_before_reading_again() {
    let input = b"0123456789abcdef0123456789abcdef0123!";
    let mut output = Vec::new();
    let (result, released) = run(&input[..], &mut output);
    result.expect("to finish");
    assert_eq!(released, 1);
    assert_eq!(output, &input[..input.len() - 1]);
}

#[test]
fn should_release_on_truncation() {
    let mut output = Vec::new();
    let (result, released) = run(&b"hello"[..], &mut output);
    assert_eq!(result.expect_err("no end marker").kind(), ErrorKind::TruncatedOrInvalidStream);
    assert_eq!(released, 1);
    assert_eq!(output, b"hello");
}

#[test]
fn should_release_on_invalid_data() {
    let mut output = Vec::new();
    let (result, released) = run(&b"he#llo!"[..], &mut output);
    let error = result.expect_err("invalid data");
    assert_eq!(error.kind(), ErrorKind::TruncatedOrInvalidStream);
    assert_eq!(error.to_string(), "truncated or invalid stream: probe failure");
    assert_eq!(released, 1);
}

#[test]
fn should_release_on_engine_fault() {
    let mut output = Vec::new();
    let (result, released) = run(&b"he%llo!"[..], &mut output);
    assert_eq!(result.expect_err("engine fault").kind(), ErrorKind::EngineFault);
    assert_eq!(released, 1);
}

#[test]
fn should_release_on_resource_exhaustion() {
    let mut output = Vec::new();
    let (result, released) = run(&b"he&llo!"[..], &mut output);
    assert_eq!(result.expect_err("out of memory").kind(), ErrorKind::ResourceExhausted);
    assert_eq!(released, 1);
}

#[test]
fn should_release_on_read_failure() {
    let mut output = Vec::new();
    let (result, released) = run(FailingSource, &mut output);
    assert_eq!(result.expect_err("read failure").kind(), ErrorKind::IoRead);
    assert_eq!(released, 1);
    assert!(output.is_empty());
}

#[test]
fn should_release_on_write_failure() {
    let (result, released) = run(&b"hello!"[..], FailingSink);
    assert_eq!(result.expect_err("write failure").kind(), ErrorKind::IoWrite);
    assert_eq!(released, 1);
}

#[test]
fn should_fail_on_stalled_engine() {
    let (decoder, released) = create(&STALLED);
    let mut output = Vec::new();
    let result = decompress_using(decoder, Options::new(), &b"data"[..], &mut output);
    assert_eq!(result.expect_err("stalled").kind(), ErrorKind::EngineFault);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}
