use std::{io::Cursor, sync::Arc};

use anyhow::{Context, Result, anyhow};
use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::{
    tiny_skia::{Pixmap, Transform},
    usvg::{self, fontdb},
};

/// Rasterize an SVG document and encode it in the given format.
pub fn render_image(
    svg: &str,
    fontdb: Arc<fontdb::Database>,
    format: ImageFormat,
) -> Result<Vec<u8>> {
    let options = usvg::Options {
        fontdb,
        // Fallback family for text nodes that do not name one.
        font_family: "Satoshi".to_string(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &options).context("Failed to parse SVG document")?;
    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow!("Failed to allocate {}x{} pixmap", size.width(), size.height()))?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
    let mut image = RgbaImage::new(size.width(), size.height());
    for (pixel, out) in pixmap.pixels().iter().zip(image.pixels_mut()) {
        let color = pixel.demultiply();
        *out = image::Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    let mut data = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image).write_to(&mut data, format).context("Failed to encode image")?;
    Ok(data.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_fontdb() -> Arc<fontdb::Database> {
        Arc::new(fontdb::Database::new())
    }

    #[test]
    fn test_render_image() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20">
            <rect width="100%" height="100%" fill="#ff0000"/>
        </svg>"##;
        let data = render_image(svg, empty_fontdb(), ImageFormat::Png).unwrap();
        let image = image::load_from_memory(&data).unwrap();
        assert_eq!((image.width(), image.height()), (10, 20));
        assert_eq!(image.to_rgba8().get_pixel(5, 10), &image::Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_render_image_invalid_document() {
        assert!(render_image("not an svg", empty_fontdb(), ImageFormat::Png).is_err());
    }
}
