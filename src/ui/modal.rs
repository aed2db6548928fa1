use crate::{
    entities::image::Image,
    ui::{
        gallery::GalleryPanel,
        upload::{DragEvent, FileCandidate, UploadPanel},
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Upload,
    Gallery,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Closed,
    Open { animating: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent {
    Open,
    /// The host's enter-animation timer fired.
    EnterAnimationStarted,
    Close,
    BackdropClicked,
    SelectTab(Tab),
    Drag(DragEvent),
    Dropped(Vec<FileCandidate>),
    FileChosen(Option<FileCandidate>),
    RemoveSelection,
    UploadClicked,
    UploadSucceeded(Image),
    UploadFailed(String),
    GalleryLoaded(Vec<Image>),
    GalleryFailed(String),
    RetryClicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScheduleEnterAnimation,
    FetchImages,
    CreateImage(String),
}

/// The upload/gallery dialog as a state machine over visibility and the active tab.
///
/// User input is ignored while closed. Network results are applied whenever
/// they arrive, open or not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageModal {
    visibility: Visibility,
    active_tab: Tab,
    upload: UploadPanel,
    gallery: GalleryPanel,
}

impl ImageModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        matches!(self.visibility, Visibility::Open { .. })
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.visibility, Visibility::Open { animating: true })
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn upload(&self) -> &UploadPanel {
        &self.upload
    }

    pub fn gallery(&self) -> &GalleryPanel {
        &self.gallery
    }

    pub fn update(&mut self, event: ModalEvent) -> Vec<Effect> {
        match event {
            ModalEvent::Open => self.open(),
            ModalEvent::EnterAnimationStarted => {
                if self.is_open() {
                    self.visibility = Visibility::Open { animating: true };
                }
                Vec::new()
            }
            ModalEvent::Close | ModalEvent::BackdropClicked => {
                self.visibility = Visibility::Closed;
                Vec::new()
            }
            ModalEvent::UploadSucceeded(image) => {
                tracing::debug!(image_id = %image.id, "Upload finished");
                self.upload.upload_succeeded();
                self.active_tab = Tab::Gallery;
                self.fetch_images()
            }
            ModalEvent::UploadFailed(message) => {
                self.upload.upload_failed(message);
                Vec::new()
            }
            ModalEvent::GalleryLoaded(images) => {
                self.gallery.loaded(images);
                Vec::new()
            }
            ModalEvent::GalleryFailed(message) => {
                self.gallery.failed(message);
                Vec::new()
            }
            _ if !self.is_open() => Vec::new(),
            ModalEvent::SelectTab(tab) => self.select_tab(tab),
            ModalEvent::Drag(drag) => {
                self.upload.drag(drag);
                Vec::new()
            }
            ModalEvent::Dropped(files) => {
                self.upload.drop_files(&files);
                Vec::new()
            }
            ModalEvent::FileChosen(file) => {
                if let Some(file) = file {
                    self.upload.select_file(&file);
                }
                Vec::new()
            }
            ModalEvent::RemoveSelection => {
                self.upload.clear_selection();
                Vec::new()
            }
            ModalEvent::UploadClicked => self
                .upload
                .begin_upload()
                .map(|url| vec![Effect::CreateImage(url)])
                .unwrap_or_default(),
            ModalEvent::RetryClicked => {
                if self.active_tab == Tab::Gallery {
                    self.fetch_images()
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn open(&mut self) -> Vec<Effect> {
        if self.is_open() {
            return Vec::new();
        }

        self.visibility = Visibility::Open { animating: false };

        let mut effects = vec![Effect::ScheduleEnterAnimation];
        if self.active_tab == Tab::Gallery {
            effects.extend(self.fetch_images());
        }
        effects
    }

    fn select_tab(&mut self, tab: Tab) -> Vec<Effect> {
        if tab == self.active_tab {
            return Vec::new();
        }

        self.active_tab = tab;
        match tab {
            Tab::Gallery => self.fetch_images(),
            Tab::Upload => Vec::new(),
        }
    }

    fn fetch_images(&mut self) -> Vec<Effect> {
        self.gallery.begin_fetch();
        vec![Effect::FetchImages]
    }
}
