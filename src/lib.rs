//!Streaming gzip decompression over zlib
//!
//!Pumps compressed bytes from any [std::io::Read] into the decoding engine in fixed-size
//!chunks and drains decoded bytes into any [std::io::Write], using bounded memory regardless
//!of stream length.
//!
//!## Features
//!
//!All features are off by default.
//!
//!- `static` - Links `zlib` statically.
//!
//!## Example
//!
//!```rust,no_run
//!let stdin = std::io::stdin();
//!let stdout = std::io::stdout();
//!
//!match ungz::decompress(stdin.lock(), stdout.lock()) {
//!    Ok(summary) => eprintln!("{} bytes decoded", summary.output_len),
//!    Err(error) => eprintln!("{error} ({:?})", error.kind()),
//!}
//!```

#![warn(missing_docs)]

pub(crate) mod utils;
pub mod mem;
pub mod buffer;
pub use buffer::Buffer;
pub mod decoder;
pub use decoder::{Decoder, Decode, DecodeStatus, DecodeError, DecodeErrorKind, ZlibMode};
mod options;
pub use options::{Options, DEFAULT_CHUNK_SIZE};
mod error;
pub use error::{Error, ErrorKind};
pub mod decompressor;
pub use decompressor::{decompress, decompress_with, decompress_using, Summary};
