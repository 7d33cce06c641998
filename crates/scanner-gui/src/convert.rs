use image::GrayImage;

/// Convert an 8-bit luma camera frame to an egui ColorImage.
pub fn gray_to_color_image(frame: &GrayImage) -> egui::ColorImage {
    let (w, h) = frame.dimensions();
    let pixels = frame
        .pixels()
        .map(|p| egui::Color32::from_gray(p.0[0]))
        .collect();

    egui::ColorImage {
        size: [w as usize, h as usize],
        pixels,
        source_size: egui::vec2(w as f32, h as f32),
    }
}
