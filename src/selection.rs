use image::RgbaImage;

use crate::geometry::PixelRect;
use crate::raster;

/// A rectangular region lifted off the canvas.
///
/// While the user is still dragging out the rectangle `pixels` is `None`;
/// once finalized it holds a detached copy of what the rectangle covered.
/// The source region is left in place on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub rect: PixelRect,
    pub pixels: Option<RgbaImage>,
}

impl Selection {
    /// A rectangle being dragged out; nothing captured yet.
    pub fn pending(rect: PixelRect) -> Self {
        Self { rect, pixels: None }
    }

    /// Copy the part of `rect` that lies on `image`. `None` if that is empty.
    pub fn capture(image: &RgbaImage, rect: PixelRect) -> Option<Self> {
        let rect = rect.clipped_to(image.width(), image.height());
        if rect.is_empty() {
            return None;
        }
        let pixels = image::imageops::crop_imm(
            image,
            rect.min_x as u32,
            rect.min_y as u32,
            rect.width(),
            rect.height(),
        )
        .to_image();
        Some(Self {
            rect,
            pixels: Some(pixels),
        })
    }

    pub fn is_captured(&self) -> bool {
        self.pixels.is_some()
    }

    /// Paste the captured pixels at the rectangle's current position.
    /// Returns whether anything was written.
    pub fn merge_into(&self, image: &mut RgbaImage) -> bool {
        match &self.pixels {
            Some(pixels) => {
                raster::paste(image, pixels, self.rect.min_x, self.rect.min_y);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn capture_copies_without_clearing_the_source() {
        let mut image = RgbaImage::from_pixel(20, 20, WHITE);
        image.put_pixel(5, 5, RED);
        let selection = Selection::capture(&image, PixelRect::from_min_size(4, 4, 4, 4)).unwrap();

        assert_eq!(*selection.pixels.as_ref().unwrap().get_pixel(1, 1), RED);
        assert_eq!(*image.get_pixel(5, 5), RED);
    }

    #[test]
    fn capture_is_clipped_to_the_canvas() {
        let image = RgbaImage::from_pixel(10, 10, WHITE);
        let selection = Selection::capture(&image, PixelRect::from_min_size(6, 6, 10, 10)).unwrap();
        assert_eq!(selection.rect, PixelRect::from_min_size(6, 6, 4, 4));
        assert!(Selection::capture(&image, PixelRect::from_min_size(20, 20, 5, 5)).is_none());
    }

    #[test]
    fn merge_pastes_at_the_moved_position() {
        let mut image = RgbaImage::from_pixel(20, 20, WHITE);
        image.put_pixel(2, 2, RED);
        let mut selection = Selection::capture(&image, PixelRect::from_min_size(2, 2, 3, 3)).unwrap();
        selection.rect = selection.rect.moved_to(pos2(10.0, 12.0));

        assert!(selection.merge_into(&mut image));
        assert_eq!(*image.get_pixel(10, 12), RED);
        assert_eq!(*image.get_pixel(2, 2), RED);
    }

    #[test]
    fn pending_selection_has_nothing_to_merge() {
        let mut image = RgbaImage::from_pixel(4, 4, WHITE);
        let selection = Selection::pending(PixelRect::from_min_size(0, 0, 2, 2));
        assert!(!selection.merge_into(&mut image));
    }
}
