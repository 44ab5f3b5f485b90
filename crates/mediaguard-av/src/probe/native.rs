//! In-process image probing with the `image` crate.
//!
//! Only the header is read; pixels are never decoded.

use super::types::Geometry;
use crate::{Error, Result};
use image::{ImageDecoder, ImageReader};
use std::path::Path;

/// Read image geometry from the file header, honouring EXIF orientation.
pub fn native_geometry(path: &Path) -> Result<Geometry> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;

    let (width, height) = decoder.dimensions();
    let orientation = decoder
        .orientation()
        .ok()
        .map(|o| u16::from(o.to_exif()));

    Ok(Geometry::new(width, height).oriented(orientation))
}
