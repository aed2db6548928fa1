use crate::entities::image::Image;

pub const EMPTY_GALLERY_MESSAGE: &str = "No images uploaded yet.";

/// State behind the Gallery tab.
///
/// Responses are applied in the order they arrive, with no request ids. When
/// two fetches overlap, whichever resolves last decides the list, and the
/// first resolution already clears `loading`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryPanel {
    pub images: Vec<Image>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum GalleryView<'a> {
    Loading,
    /// Shown with a retry action.
    Error(&'a str),
    Empty,
    Items(&'a [Image]),
}

impl GalleryPanel {
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn loaded(&mut self, images: Vec<Image>) {
        self.images = images;
        self.loading = false;
    }

    pub fn failed(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    pub fn view(&self) -> GalleryView<'_> {
        if self.loading {
            GalleryView::Loading
        } else if let Some(error) = &self.error {
            GalleryView::Error(error)
        } else if self.images.is_empty() {
            GalleryView::Empty
        } else {
            GalleryView::Items(&self.images)
        }
    }
}
