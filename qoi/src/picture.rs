use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use crate::codec::{decode::decode, encode::encode};
use crate::error::Error;
use crate::header::{Channels, Colorspace, Header};

/// An uncompressed image plus its descriptor, the in-memory form the
/// encoder consumes and the decoder produces.
pub struct QoiPicture {
    pub header: Header,
    pub bitmap: Vec<u8>,
}

impl QoiPicture {
    /// Create a picture from a raw pixel buffer. Nothing is encoded at
    /// this point.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: Channels,
        colorspace: Colorspace,
        bitmap: Vec<u8>,
    ) -> Self {
        QoiPicture {
            header: Header::new(width, height, channels, colorspace),
            bitmap,
        }
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn channels(&self) -> Channels {
        self.header.channels
    }

    pub fn colorspace(&self) -> Colorspace {
        self.header.colorspace
    }

    /// Consume the picture, returning the raw pixel buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.bitmap
    }

    /// Encode the image into anything that implements [Write]. Returns the
    /// number of bytes written.
    pub fn encode<O: Write>(&self, output: &mut O) -> Result<usize, Error> {
        let encoded = encode(&self.bitmap, &self.header)?;
        output.write_all(&encoded)?;

        Ok(encoded.len())
    }

    /// Encode and write the image out to a file. Returns the number of
    /// bytes written.
    pub fn save<P: ?Sized + AsRef<Path>>(&self, path: &P) -> Result<usize, Error> {
        let mut out_file = BufWriter::new(File::create(path.as_ref())?);

        let count = self.encode(&mut out_file)?;
        out_file.flush()?;

        Ok(count)
    }

    /// Decode a QOI stream from anything that implements [Read].
    ///
    /// `target` selects the channel count of the decoded bitmap; [None]
    /// keeps whatever the stream header declares.
    pub fn decode<I: Read>(input: &mut I, target: Option<Channels>) -> Result<QoiPicture, Error> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;

        let (bitmap, mut header) = decode(&bytes, target)?;

        // Keep the descriptor consistent with the bitmap actually produced.
        if let Some(channels) = target {
            header.channels = channels;
        }

        Ok(QoiPicture { header, bitmap })
    }
}

/// Open and decode a QOI file, keeping the channel count the file
/// declares.
pub fn open<P: ?Sized + AsRef<Path>>(path: &P) -> Result<QoiPicture, Error> {
    let mut input = File::open(path.as_ref())?;

    QoiPicture::decode(&mut input, None)
}
