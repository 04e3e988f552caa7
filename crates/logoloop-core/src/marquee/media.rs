//! Intrinsic size of media items
//!
//! Local images are probed with the `image` crate; remote sources are not
//! fetched and report an error, which the settle tracker treats as settled.

use std::path::Path;

use crate::{Error, Result};

/// Read the pixel dimensions of a local image without decoding it fully
pub fn probe_dimensions(src: &str) -> Result<(u32, u32)> {
    if let Ok(url) = url::Url::parse(src) {
        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| Error::Other(format!("invalid file URL: {}", src)))?;
                return Ok(image::image_dimensions(path)?);
            }
            // Windows drive letters parse as a one-letter scheme
            scheme if scheme.len() > 1 => {
                return Err(Error::Other(format!("remote media is not fetched: {}", src)));
            }
            _ => {}
        }
    }

    Ok(image::image_dimensions(Path::new(src))?)
}

/// Terminal columns for an image drawn `rows` tall
///
/// Cells are roughly twice as tall as they are wide.
pub fn media_columns(size: (u32, u32), rows: u16) -> u16 {
    let (w, h) = size;
    if w == 0 || h == 0 {
        return 0;
    }
    let cols = (rows.max(1) as f64 * 2.0 * w as f64 / h as f64).ceil();
    cols.clamp(1.0, u16::MAX as f64) as u16
}
