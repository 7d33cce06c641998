use std::time::Instant;

/// Live camera view state.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Frame size of the last uploaded texture.
    pub image_size: Option<[usize; 2]>,
    /// Id of the uploaded frame; 0 before the first upload.
    pub frame_id: u64,
    /// Last tap-to-focus point in screen space, for the focus ring.
    pub focus_tap: Option<(egui::Pos2, Instant)>,
}

impl ViewportState {
    pub fn clear(&mut self) {
        self.texture = None;
        self.image_size = None;
        self.frame_id = 0;
        self.focus_tap = None;
    }
}
