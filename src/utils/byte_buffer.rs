//! Cursor based binary reader/writer
//!
//! A `ByteBuffer` owns a fixed-size byte vector and an offset. Every read and
//! write advances the offset by the exact width of the value; nothing ever
//! grows the buffer or wraps around.

use thiserror::Error;

/// Bounds violations raised by [`ByteBuffer`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Write over buffer boundary")]
    WriteOverflow,
    #[error("Read over buffer boundary")]
    ReadOverflow,
    #[error("Jump over buffer boundary: {0} vs {1}")]
    JumpOutOfBounds(isize, usize),
}

macro_rules! int_codec {
    ($write:ident, $read:ident, $ty:ty, $to:ident, $from:ident) => {
        pub fn $write(&mut self, value: $ty) -> Result<(), BufferError> {
            self.write_bytes(&value.$to())
        }

        pub fn $read(&mut self) -> Result<$ty, BufferError> {
            let mut raw = [0u8; std::mem::size_of::<$ty>()];
            raw.copy_from_slice(self.read_bytes(std::mem::size_of::<$ty>())?);
            Ok(<$ty>::$from(raw))
        }
    };
}

/// Fixed capacity buffer with a read/write cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    buffer: Vec<u8>,
    offset: usize,
}

impl ByteBuffer {
    /// Allocate a zero-filled buffer of `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity],
            offset: 0,
        }
    }

    /// Wrap existing bytes for reading, cursor at the start
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: bytes.into(),
            offset: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Bytes written (or consumed) so far
    pub fn result(&self) -> &[u8] {
        &self.buffer[..self.offset]
    }

    pub fn into_result(mut self) -> Vec<u8> {
        self.buffer.truncate(self.offset);
        self.buffer
    }

    /// Unread tail of the buffer
    pub fn remainder(&self) -> &[u8] {
        &self.buffer[self.offset..]
    }

    pub fn remainder_len(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Move the cursor to an absolute position
    pub fn go_to(&mut self, position: usize) -> Result<(), BufferError> {
        if position > self.buffer.len() {
            return Err(BufferError::JumpOutOfBounds(
                position as isize,
                self.buffer.len(),
            ));
        }
        self.offset = position;
        Ok(())
    }

    /// Move the cursor relative to its current position
    pub fn jump(&mut self, delta: isize) -> Result<(), BufferError> {
        let target = self.offset as isize + delta;
        if target < 0 || target as usize > self.buffer.len() {
            return Err(BufferError::JumpOutOfBounds(target, self.buffer.len()));
        }
        self.offset = target as usize;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        if bytes.len() > self.remainder_len() {
            return Err(BufferError::WriteOverflow);
        }
        self.buffer[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
        Ok(())
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&[u8], BufferError> {
        if length > self.remainder_len() {
            return Err(BufferError::ReadOverflow);
        }
        let start = self.offset;
        self.offset += length;
        Ok(&self.buffer[start..start + length])
    }

    int_codec!(write_u8, read_u8, u8, to_le_bytes, from_le_bytes);
    int_codec!(write_i8, read_i8, i8, to_le_bytes, from_le_bytes);
    int_codec!(write_u16_le, read_u16_le, u16, to_le_bytes, from_le_bytes);
    int_codec!(write_u16_be, read_u16_be, u16, to_be_bytes, from_be_bytes);
    int_codec!(write_i16_le, read_i16_le, i16, to_le_bytes, from_le_bytes);
    int_codec!(write_i16_be, read_i16_be, i16, to_be_bytes, from_be_bytes);
    int_codec!(write_u32_le, read_u32_le, u32, to_le_bytes, from_le_bytes);
    int_codec!(write_u32_be, read_u32_be, u32, to_be_bytes, from_be_bytes);
    int_codec!(write_i32_le, read_i32_le, i32, to_le_bytes, from_le_bytes);
    int_codec!(write_i32_be, read_i32_be, i32, to_be_bytes, from_be_bytes);
    int_codec!(write_u64_le, read_u64_le, u64, to_le_bytes, from_le_bytes);
    int_codec!(write_u64_be, read_u64_be, u64, to_be_bytes, from_be_bytes);
    int_codec!(write_i64_le, read_i64_le, i64, to_le_bytes, from_le_bytes);
    int_codec!(write_i64_be, read_i64_be, i64, to_be_bytes, from_be_bytes);
}
