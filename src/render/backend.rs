use std::io::Cursor;

use image::{ImageBuffer, Rgb};
use plotters::prelude::{BitMapBackend, IntoDrawingArea, SVGBackend};

use crate::api::Canvas;
use crate::error::{PlotsError, PlotsResult};

fn checked_size<C: Canvas + ?Sized>(canvas: &C) -> PlotsResult<(u32, u32)> {
    let (width, height) = canvas.size();
    if width == 0 || height == 0 {
        return Err(PlotsError::InvalidViewport { width, height });
    }
    Ok((width, height))
}

/// Paints `canvas` into an RGB bitmap and encodes it as PNG.
pub fn render_png<C: Canvas + ?Sized>(canvas: &C) -> PlotsResult<Vec<u8>> {
    let (width, height) = checked_size(canvas)?;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        canvas.paint(&root)?;
        root.present()?;
    }

    let image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, buffer)
        .ok_or_else(|| PlotsError::Encode("bitmap buffer does not match the canvas size".to_owned()))?;
    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, image::ImageFormat::Png)
        .map_err(|err| PlotsError::Encode(err.to_string()))?;
    Ok(png.into_inner())
}

/// Paints `canvas` into an SVG document.
pub fn render_svg<C: Canvas + ?Sized>(canvas: &C) -> PlotsResult<Vec<u8>> {
    let (width, height) = checked_size(canvas)?;
    let mut document = String::new();
    {
        let root = SVGBackend::with_string(&mut document, (width, height)).into_drawing_area();
        canvas.paint(&root)?;
        root.present()?;
    }
    Ok(document.into_bytes())
}
