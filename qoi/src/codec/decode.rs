use std::io::Cursor;

use crate::codec::ops;
use crate::error::Error;
use crate::header::{Channels, Header, HEADER_LEN, PADDING};
use crate::pixel::Pixel;

/// Decode a complete QOI stream into a tightly packed pixel buffer.
///
/// `target` selects the channel count of the output buffer; [None] keeps
/// whatever the stream header declares. The returned header is the one
/// parsed from the stream.
///
/// Decoding fails with [Error::TruncatedStream] if the opcode stream runs
/// out before every pixel has been produced.
pub fn decode(bytes: &[u8], target: Option<Channels>) -> Result<(Vec<u8>, Header), Error> {
    if bytes.len() < HEADER_LEN + PADDING.len() {
        return Err(Error::TruncatedStream);
    }

    let header = Header::read_from(&mut Cursor::new(bytes))?;
    let channels = target.unwrap_or(header.channels).bytes_per_pixel();

    let px_count = header.pixel_count() as usize;
    let mut output = Vec::new();
    output
        .try_reserve_exact(px_count * channels)
        .map_err(|_| Error::OutOfMemory)?;

    // The end-of-stream marker is reserved and never parsed as opcodes.
    let chunks = &bytes[HEADER_LEN..bytes.len() - PADDING.len()];
    let mut pos = 0;

    let mut index = [Pixel::ZERO; 64];
    let mut px = Pixel::START;
    let mut run = 0u8;

    for _ in 0..px_count {
        if run > 0 {
            run -= 1;
        } else {
            let b1 = next_byte(chunks, &mut pos)?;

            if b1 == ops::TAG_RGB {
                px.r = next_byte(chunks, &mut pos)?;
                px.g = next_byte(chunks, &mut pos)?;
                px.b = next_byte(chunks, &mut pos)?;
            } else if b1 == ops::TAG_RGBA {
                px.r = next_byte(chunks, &mut pos)?;
                px.g = next_byte(chunks, &mut pos)?;
                px.b = next_byte(chunks, &mut pos)?;
                px.a = next_byte(chunks, &mut pos)?;
            } else if b1 & ops::MASK_TAG == ops::TAG_INDEX {
                px = index[(b1 & ops::MASK_PAYLOAD) as usize];
            } else if b1 & ops::MASK_TAG == ops::TAG_DIFF {
                px.apply_diff(b1);
            } else if b1 & ops::MASK_TAG == ops::TAG_LUMA {
                let b2 = next_byte(chunks, &mut pos)?;
                px.apply_luma(b1, b2);
            } else {
                run = b1 & ops::MASK_PAYLOAD;
            }

            // Every opcode except a run refreshes the pixel's table slot,
            // mirroring the encoder's update rule.
            if b1 & ops::MASK_TAG != ops::TAG_RUN || b1 >= ops::TAG_RGB {
                index[px.hash()] = px;
            }
        }

        output.extend_from_slice(&px.rgba()[..channels]);
    }

    Ok((output, header))
}

fn next_byte(chunks: &[u8], pos: &mut usize) -> Result<u8, Error> {
    let byte = *chunks.get(*pos).ok_or(Error::TruncatedStream)?;
    *pos += 1;

    Ok(byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Colorspace;

    /// Wrap a hand built opcode stream in a valid header and terminator.
    fn stream(width: u32, height: u32, channels: u8, opcodes: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"qoif");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.push(channels);
        bytes.push(0);
        bytes.extend_from_slice(opcodes);
        bytes.extend_from_slice(&PADDING);

        bytes
    }

    #[test]
    fn decodes_a_single_run_stream() {
        let bytes = stream(1, 1, 4, &[0xC0]);
        let (pixels, header) = decode(&bytes, None).unwrap();

        assert_eq!(pixels, vec![0, 0, 0, 255]);
        assert_eq!(header, Header::new(1, 1, Channels::Rgba, Colorspace::Srgb));
    }

    #[test]
    fn run_replays_the_current_pixel() {
        let bytes = stream(3, 1, 3, &[0xFE, 1, 2, 3, 0xC1]);
        let (pixels, _) = decode(&bytes, None).unwrap();

        assert_eq!(pixels, vec![1, 2, 3, 1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn zero_diff_byte_repeats_the_pixel() {
        let bytes = stream(2, 1, 3, &[0xFE, 10, 20, 30, 0x6A]);
        let (pixels, _) = decode(&bytes, None).unwrap();

        assert_eq!(pixels, vec![10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn index_opcode_recalls_an_earlier_pixel() {
        let bytes = stream(3, 1, 3, &[0xFE, 100, 0, 0, 0xFE, 0, 100, 0, 0x21]);
        let (pixels, _) = decode(&bytes, None).unwrap();

        assert_eq!(pixels, vec![100, 0, 0, 0, 100, 0, 100, 0, 0]);
    }

    #[test]
    fn rgb_opcode_keeps_the_previous_alpha() {
        let bytes = stream(2, 1, 4, &[0xFF, 1, 1, 1, 128, 0xFE, 2, 2, 2]);
        let (pixels, _) = decode(&bytes, None).unwrap();

        assert_eq!(pixels, vec![1, 1, 1, 128, 2, 2, 2, 128]);
    }

    #[test]
    fn luma_opcode_applies_wrapping_deltas() {
        // dg = 5, dr-dg = 0, db-dg = 0 over (0,0,0).
        let bytes = stream(1, 1, 3, &[0xA5, 0x88]);
        let (pixels, _) = decode(&bytes, None).unwrap();

        assert_eq!(pixels, vec![5, 5, 5]);
    }

    #[test]
    fn four_channel_stream_can_decode_to_three() {
        let bytes = stream(2, 1, 4, &[0xFF, 1, 2, 3, 4, 0xFF, 5, 6, 7, 8]);
        let (pixels, header) = decode(&bytes, Some(Channels::Rgb)).unwrap();

        assert_eq!(pixels, vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(header.channels, Channels::Rgba);
    }

    #[test]
    fn three_channel_stream_can_decode_to_four() {
        let bytes = stream(1, 1, 3, &[0xFE, 9, 8, 7]);
        let (pixels, _) = decode(&bytes, Some(Channels::Rgba)).unwrap();

        assert_eq!(pixels, vec![9, 8, 7, 255]);
    }

    #[test]
    fn too_short_buffer_is_rejected() {
        assert!(matches!(
            decode(b"qoif", None),
            Err(Error::TruncatedStream)
        ));
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut bytes = stream(1, 1, 4, &[0xC0]);
        bytes[0] = b'Q';

        assert!(matches!(
            decode(&bytes, None),
            Err(Error::InvalidMagic([b'Q', b'o', b'i', b'f']))
        ));
    }

    #[test]
    fn bad_channels_byte_is_rejected() {
        let bytes = stream(1, 1, 5, &[0xC0]);

        assert!(matches!(decode(&bytes, None), Err(Error::InvalidChannels(5))));
    }

    #[test]
    fn bad_colorspace_byte_is_rejected() {
        let mut bytes = stream(1, 1, 4, &[0xC0]);
        bytes[13] = 2;

        assert!(matches!(
            decode(&bytes, None),
            Err(Error::InvalidColorspace(2))
        ));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let bytes = stream(0, 4, 4, &[]);

        assert!(matches!(
            decode(&bytes, None),
            Err(Error::InvalidDimensions(0, 4))
        ));
    }

    #[test]
    fn exhausted_opcode_stream_is_an_error() {
        // Two pixels promised, one opcode supplied.
        let bytes = stream(2, 1, 4, &[0xFE, 1, 2, 3]);

        assert!(matches!(decode(&bytes, None), Err(Error::TruncatedStream)));
    }

    #[test]
    fn opcode_payload_cannot_spill_into_the_terminator() {
        let bytes = stream(1, 1, 4, &[0xFE, 1]);

        assert!(matches!(decode(&bytes, None), Err(Error::TruncatedStream)));
    }
}
