//!Chunk buffer

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec;

///Fixed capacity byte buffer, reused for every chunk of a run.
///
///Memory is allocated once in [Buffer::new] and never grows.
///`cursor` separates filled bytes (`..cursor`) from spare capacity (`cursor..`).
pub struct Buffer {
    buffer: Box<[u8]>,
    cursor: usize,
}

impl Buffer {
    ///Creates new instance with fixed `capacity`.
    ///
    ///Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Buffer capacity must be at least 1 byte");
        Self {
            buffer: vec![0; capacity].into_boxed_slice(),
            cursor: 0,
        }
    }

    #[inline(always)]
    ///Returns total capacity
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline(always)]
    ///Returns number of filled bytes
    pub fn len(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    ///Returns whether buffer holds no data
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    #[inline(always)]
    ///Returns whether there is no spare capacity left
    pub fn is_full(&self) -> bool {
        self.cursor == self.buffer.len()
    }

    #[inline(always)]
    ///Returns split of buffer into filled and spare parts
    pub fn split_buffer(&mut self) -> (&[u8], &mut [u8]) {
        debug_assert!(self.cursor <= self.buffer.len());
        let (filled, spare) = self.buffer.split_at_mut(self.cursor);
        (&*filled, spare)
    }

    #[inline(always)]
    ///Returns filled data
    pub fn data(&self) -> &[u8] {
        &self.buffer[..self.cursor]
    }

    #[inline(always)]
    ///Returns spare capacity in buffer
    pub fn spare_capacity_mut(&mut self) -> &mut [u8] {
        self.split_buffer().1
    }

    #[inline(always)]
    ///Marks `len` bytes of spare capacity as filled.
    pub fn advance(&mut self, len: usize) {
        debug_assert!(self.cursor + len <= self.buffer.len());
        self.cursor += len;
    }

    #[inline(always)]
    ///Marks internal buffer as consumed fully
    pub fn consume(&mut self) {
        self.cursor = 0;
    }
}
