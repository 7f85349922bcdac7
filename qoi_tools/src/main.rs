mod utils;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use image::ImageReader;
use qoi::{Channels, Colorspace, QoiPicture};

use utils::{channels_to_color_type, Format};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input image, either a PNG or a QOI file
    input: PathBuf,

    /// Output image, either a PNG or a QOI file
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let input_format = Format::from_path(&args.input)?;
    let output_format = Format::from_path(&args.output)?;

    let picture = match input_format {
        Format::Png => load_png(&args.input)?,
        Format::Qoi => qoi::open(&args.input)?,
    };

    match output_format {
        Format::Png => {
            let width = picture.width();
            let height = picture.height();
            let color_type = channels_to_color_type(picture.channels());

            image::save_buffer(&args.output, &picture.into_raw(), width, height, color_type)?;
        }
        Format::Qoi => {
            picture.save(&args.output)?;
        }
    }

    Ok(())
}

fn load_png(path: &Path) -> Result<QoiPicture> {
    if !path.try_exists()? {
        bail!("Input file {:?} does not exist", path);
    }

    let image = ImageReader::open(path)?.decode()?;

    let width = image.width();
    let height = image.height();

    // Anything that is not plain RGB is loaded as RGBA.
    let (channels, bitmap) = match image.color() {
        image::ColorType::Rgb8 => (Channels::Rgb, image.into_rgb8().into_vec()),
        _ => (Channels::Rgba, image.into_rgba8().into_vec()),
    };

    Ok(QoiPicture::from_raw(
        width,
        height,
        channels,
        Colorspace::Srgb,
        bitmap,
    ))
}
