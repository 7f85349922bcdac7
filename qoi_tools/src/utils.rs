use std::path::Path;

use anyhow::{bail, Result};
use image::ColorType;
use qoi::Channels;

/// File formats the converter understands, chosen by path suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Png,
    Qoi,
}

impl Format {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(Format::Png),
            Some(ext) if ext.eq_ignore_ascii_case("qoi") => Ok(Format::Qoi),
            _ => bail!("{:?} is not a .png or .qoi path", path),
        }
    }
}

pub fn channels_to_color_type(channels: Channels) -> ColorType {
    match channels {
        Channels::Rgb => ColorType::Rgb8,
        Channels::Rgba => ColorType::Rgba8,
    }
}
