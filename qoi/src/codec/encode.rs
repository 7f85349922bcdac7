use crate::codec::ops;
use crate::error::Error;
use crate::header::{Header, HEADER_LEN, PADDING};
use crate::pixel::{Diff, Pixel};

/// Encode a tightly packed pixel buffer into a complete QOI stream.
///
/// The buffer must hold `width * height` pixels in row-major order with no
/// padding between rows, three or four bytes per pixel as the header
/// declares. Three channel input is treated as fully opaque.
///
/// The returned vector holds the file header, the opcode stream, and the
/// end-of-stream marker; its length is the encoded byte count.
pub fn encode(pixels: &[u8], header: &Header) -> Result<Vec<u8>, Error> {
    header.validate()?;

    let channels = header.channels.bytes_per_pixel();
    let px_count = header.pixel_count() as usize;
    let px_len = px_count * channels;

    if pixels.len() != px_len {
        return Err(Error::BufferSize {
            expected: px_len,
            actual: pixels.len(),
        });
    }

    // Worst case is one five byte RGBA opcode per pixel.
    let max_len = px_count * (channels + 1) + HEADER_LEN + PADDING.len();
    let mut output = Vec::new();
    output
        .try_reserve_exact(max_len)
        .map_err(|_| Error::OutOfMemory)?;

    output.extend_from_slice(&header.to_bytes());

    let mut index = [Pixel::ZERO; 64];
    let mut prev = Pixel::START;
    let mut run = 0u8;

    for (i, chunk) in pixels.chunks_exact(channels).enumerate() {
        let alpha = if channels == 4 { chunk[3] } else { u8::MAX };
        let px = Pixel::new(chunk[0], chunk[1], chunk[2], alpha);

        if px == prev {
            run += 1;
            if run == ops::MAX_RUN || i + 1 == px_count {
                output.push(ops::TAG_RUN | (run - 1));
                run = 0;
            }
        } else {
            // A pending run always ends before the new pixel is encoded.
            if run > 0 {
                output.push(ops::TAG_RUN | (run - 1));
                run = 0;
            }

            let slot = px.hash();
            if index[slot] == px {
                output.push(ops::TAG_INDEX | slot as u8);
            } else {
                index[slot] = px;

                match px.diff(prev) {
                    Some(Diff::Small { dr, dg, db }) => {
                        output.push(ops::TAG_DIFF | (dr << 4) | (dg << 2) | db);
                    }
                    Some(Diff::Luma { dg, dr_dg, db_dg }) => {
                        output.push(ops::TAG_LUMA | dg);
                        output.push((dr_dg << 4) | db_dg);
                    }
                    None if px.a == prev.a => {
                        output.extend_from_slice(&[ops::TAG_RGB, px.r, px.g, px.b]);
                    }
                    None => {
                        output.extend_from_slice(&[ops::TAG_RGBA, px.r, px.g, px.b, px.a]);
                    }
                }
            }
        }

        prev = px;
    }

    output.extend_from_slice(&PADDING);

    Ok(output)
}
