use image::DynamicImage;

pub enum ArtworkState {
    Idle,
    Loading,
    Loaded(DynamicImage),
    Failed,
}

impl ArtworkState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
