//! QOI (**Q**uite **OK** **I**mage) is a lossless image format built around
//! small per-pixel operation codes. It compresses surprisingly well for how
//! simple it is, and both encoding and decoding happen in a single pass over
//! the pixel data.
//!
//! The encoder and decoder here are bit-exact with the format specification,
//! so files produced by this crate interoperate with any other conforming
//! implementation.
//!
//! # Example
//! ## Encoding an image
//! ```
//! use qoi::{encode, Channels, Colorspace, Header};
//!
//! let header = Header::new(2, 1, Channels::Rgb, Colorspace::Srgb);
//! let pixels = vec![
//!     0x00, 0x00, 0x00,
//!     0x80, 0x80, 0x80,
//! ];
//!
//! let encoded = encode(&pixels, &header).expect("could not encode the image");
//! assert_eq!(&encoded[0..4], b"qoif");
//! ```
//!
//! ## Reading a QOI from a file
//! ```no_run
//! use std::fs::File;
//! use qoi::QoiPicture;
//!
//! // Load it directly with the `open` function...
//! let image = qoi::open("my_image.qoi").expect("Could not open file");
//!
//! // ...or from something implementing Read.
//! let mut input_file = File::open("my_image.qoi").expect("Could not open image file");
//! let image2 = QoiPicture::decode(&mut input_file, None);
//! ```

mod codec {
    pub mod decode;
    pub mod encode;
    pub(crate) mod ops;
}
mod error;
mod pixel;

pub mod header;
pub mod picture;

// ----------------------- //
// INLINED USEFUL FEATURES //
// ----------------------- //
#[doc(inline)]
pub use picture::QoiPicture;

#[doc(inline)]
pub use picture::open;

#[doc(inline)]
pub use header::Header;

#[doc(inline)]
pub use header::Channels;

#[doc(inline)]
pub use header::Colorspace;

#[doc(inline)]
pub use error::Error;

#[doc(inline)]
pub use codec::encode::encode;

#[doc(inline)]
pub use codec::decode::decode;
