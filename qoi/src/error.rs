use std::io;

use thiserror::Error;

/// Every failure the encoder, decoder, and file wrapper can produce.
#[derive(Error, Debug)]
pub enum Error {
    #[error("incorrect magic bytes, got {0:02X?}")]
    InvalidMagic([u8; 4]),

    #[error("invalid channels value {0}, expected 3 or 4")]
    InvalidChannels(u8),

    #[error("invalid colorspace value {0}, expected 0 or 1")]
    InvalidColorspace(u8),

    #[error("image dimensions {0}x{1} are zero or exceed the pixel limit")]
    InvalidDimensions(u32, u32),

    #[error("pixel buffer is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("encoded stream ended before the image was complete")]
    TruncatedStream,

    #[error("output buffer allocation failed")]
    OutOfMemory,

    #[error("io operation failed: {0}")]
    Io(#[from] io::Error),
}
