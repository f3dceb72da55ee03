use crate::decoder::{Decoder, Interface, ZlibMode};

///Default size of input and output chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 16384;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
///Decompression options.
///
///Defaults to 16K chunks and [ZlibMode::Auto].
pub struct Options {
    chunk_size: usize,
    mode: ZlibMode,
}

impl Options {
    #[inline(always)]
    ///Creates new default value
    pub const fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            mode: ZlibMode::Auto,
        }
    }

    #[inline]
    ///Sets capacity of both input and output buffers.
    ///
    ///Larger values trade memory for fewer read/write calls.
    ///Panics if `chunk_size` is zero.
    pub const fn chunk_size(mut self, chunk_size: usize) -> Self {
        assert!(chunk_size > 0);
        self.chunk_size = chunk_size;
        self
    }

    #[inline]
    ///Sets framing expected by decoder.
    pub const fn mode(mut self, mode: ZlibMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline(always)]
    ///Returns chunk size
    pub const fn get_chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[inline(always)]
    ///Returns framing mode
    pub const fn get_mode(&self) -> ZlibMode {
        self.mode
    }

    #[inline]
    ///Creates zlib decoder configured with these options.
    ///
    ///Returns `None` if unable to initialize it (likely due to lack of memory)
    pub fn decoder(&self) -> Option<Decoder> {
        Interface::zlib(self.mode)
    }
}

impl Default for Options {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
