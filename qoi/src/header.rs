use std::io::{Cursor, Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt, BE};

use crate::error::Error;

/// Magic bytes identifying a QOI stream.
pub(crate) const MAGIC: [u8; 4] = *b"qoif";

/// Encoded size of the file header.
pub(crate) const HEADER_LEN: usize = 14;

/// Eight byte end-of-stream marker.
pub(crate) const PADDING: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

/// Upper bound on `width * height`; headers past this are rejected before
/// any allocation happens.
pub(crate) const PIXELS_MAX: u64 = 400_000_000;

/// The image descriptor carried in a QOI file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// Layout of the raw pixel data
    pub channels: Channels,
    /// Colorspace hint, does not affect encoding or decoding
    pub colorspace: Colorspace,
}

impl Header {
    pub fn new(width: u32, height: u32, channels: Channels, colorspace: Colorspace) -> Self {
        Self {
            width,
            height,
            channels,
            colorspace,
        }
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 || self.pixel_count() > PIXELS_MAX {
            return Err(Error::InvalidDimensions(self.width, self.height));
        }

        Ok(())
    }

    pub(crate) fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = Cursor::new(Vec::new());

        buf.write_all(&MAGIC).unwrap();
        buf.write_u32::<BE>(self.width).unwrap();
        buf.write_u32::<BE>(self.height).unwrap();
        buf.write_u8(self.channels as u8).unwrap();
        buf.write_u8(self.colorspace as u8).unwrap();

        buf.into_inner().try_into().unwrap()
    }

    pub(crate) fn read_from<T: Read + ReadBytesExt>(input: &mut T) -> Result<Self, Error> {
        let mut magic = [0u8; 4];
        input.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let header = Self {
            width: input.read_u32::<BE>()?,
            height: input.read_u32::<BE>()?,
            channels: Channels::try_from(input.read_u8()?)?,
            colorspace: Colorspace::try_from(input.read_u8()?)?,
        };
        header.validate()?;

        Ok(header)
    }
}

/// Number of color channels in a tightly packed pixel buffer.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// RGB, 8 bits per channel
    Rgb = 3,

    /// RGBA, 8 bits per channel
    Rgba = 4,
}

impl Channels {
    /// Number of bytes each pixel occupies.
    ///
    /// Ex. Rgba has `4` bytes per pixel
    pub fn bytes_per_pixel(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Channels {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            n => Err(Error::InvalidChannels(n)),
        }
    }
}

/// How the color channels of an image should be interpreted. This is
/// carried through the file header but has no effect on the pixel data.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colorspace {
    /// sRGB with linear alpha
    Srgb = 0,

    /// All channels linear
    Linear = 1,
}

impl TryFrom<u8> for Colorspace {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Colorspace::Srgb),
            1 => Ok(Colorspace::Linear),
            n => Err(Error::InvalidColorspace(n)),
        }
    }
}
