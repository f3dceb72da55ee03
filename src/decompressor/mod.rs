//!Streaming decompression driver
//!
//!Moves compressed bytes from [Read] into [Decoder] one chunk at a time and drains decoded
//!bytes into [Write], until decoder reports end of stream or an error happens.
//!
//!Working memory is two buffers of [Options::chunk_size](crate::Options::chunk_size) bytes
//!plus decoder state, no matter how long the stream is.

use std::io::{self, Read, Write};

use log::{debug, trace};

use crate::buffer::Buffer;
use crate::decoder::{Decoder, DecodeStatus};
use crate::error::Error;
use crate::options::Options;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
///Statistics of successful run
pub struct Summary {
    ///Number of compressed bytes consumed by decoder
    pub input_len: u64,
    ///Number of decompressed bytes written into sink
    pub output_len: u64,
    ///Number of read requests issued to source
    pub reads: usize,
    ///Number of decode calls issued to decoder
    pub decode_calls: usize,
}

///Decompresses gzip or zlib stream from `source` into `sink` with default [Options].
///
///Returns [Summary] once decoder confirms valid end of stream, otherwise first error encountered.
///On success everything decoded is written and `sink` is flushed.
pub fn decompress<R: Read, W: Write>(source: R, sink: W) -> Result<Summary, Error> {
    decompress_with(Options::new(), source, sink)
}

///Decompresses `source` into `sink` according to `options`.
pub fn decompress_with<R: Read, W: Write>(options: Options, source: R, sink: W) -> Result<Summary, Error> {
    let decoder = match options.decoder() {
        Some(decoder) => decoder,
        None => return Err(Error::ResourceExhausted {
            detail: "unable to initialize decoder",
        }),
    };
    decompress_using(decoder, options, source, sink)
}

///Decompresses `source` into `sink` using provided `decoder`.
///
///Only chunk size is taken from `options`, framing is whatever `decoder` was created with.
///
///`decoder` is consumed and released before return, regardless of outcome.
pub fn decompress_using<R: Read, W: Write>(decoder: Decoder, options: Options, source: R, sink: W) -> Result<Summary, Error> {
    Driver::new(decoder, options.get_chunk_size()).run(source, sink)
}

struct Driver {
    decoder: Decoder,
    input: Buffer,
    //Offset of first byte in `input` not yet consumed by decoder
    position: usize,
    output: Buffer,
    summary: Summary,
}

impl Driver {
    fn new(decoder: Decoder, chunk_size: usize) -> Self {
        Self {
            decoder,
            input: Buffer::new(chunk_size),
            position: 0,
            output: Buffer::new(chunk_size),
            summary: Summary::default(),
        }
    }

    fn run<R: Read, W: Write>(mut self, mut source: R, mut sink: W) -> Result<Summary, Error> {
        let mut status = DecodeStatus::NeedInput;

        while status != DecodeStatus::Finished {
            if self.fill(&mut source)? == 0 {
                break;
            }
            status = self.drain(&mut sink)?;
        }

        if status != DecodeStatus::Finished {
            debug!("Input ended after {} bytes without end of stream", self.summary.input_len);
            return Err(Error::TruncatedOrInvalidStream {
                detail: "unexpected end of compressed input",
            });
        }

        sink.flush().map_err(Error::IoWrite)?;

        debug!("Decompressed {} bytes into {} bytes", self.summary.input_len, self.summary.output_len);
        Ok(self.summary)
    }

    //Reads next chunk, only called once previous one is fully consumed.
    fn fill<R: Read>(&mut self, source: &mut R) -> Result<usize, Error> {
        debug_assert_eq!(self.position, self.input.len());
        self.input.consume();
        self.position = 0;

        loop {
            self.summary.reads += 1;
            match source.read(self.input.spare_capacity_mut()) {
                Ok(len) => {
                    trace!("Read {len} bytes");
                    self.input.advance(len);
                    break Ok(len);
                },
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => break Err(Error::IoRead(error)),
            }
        }
    }

    //Decodes staged chunk until decoder needs more input or stream ends.
    fn drain<W: Write>(&mut self, sink: &mut W) -> Result<DecodeStatus, Error> {
        loop {
            let input = &self.input.data()[self.position..];
            let output = self.output.spare_capacity_mut();
            let output_len = output.len();

            let result = self.decoder.decode(input, output);
            self.summary.decode_calls += 1;

            let status = match result.status {
                Ok(status) => status,
                Err(error) => {
                    debug!("Decoder failed with {error}");
                    return Err(Error::from_decode(error, self.decoder.describe_error(error)));
                },
            };

            let consumed = input.len() - result.input_remain;
            let produced = output_len - result.output_remain;
            self.position += consumed;
            self.summary.input_len += consumed as u64;

            self.output.advance(produced);
            sink.write_all(self.output.data()).map_err(Error::IoWrite)?;
            self.output.consume();
            self.summary.output_len += produced as u64;

            trace!("Decoded {consumed} bytes into {produced} bytes: {status:?}");

            if status == DecodeStatus::Finished {
                let trailing = self.input.len() - self.position;
                if trailing > 0 {
                    debug!("Ignoring {trailing} bytes after end of stream");
                }
                break Ok(status);
            }

            //Full output means decoder may hold more for the same input
            if result.output_remain == 0 {
                continue;
            }

            if self.position == self.input.len() {
                break Ok(DecodeStatus::NeedInput);
            }

            if consumed == 0 && produced == 0 {
                break Err(Error::EngineFault {
                    detail: "decoder made no progress on pending input",
                });
            }
        }
    }
}
