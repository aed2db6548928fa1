use std::collections::VecDeque;

use crate::{
    client::image_api::ImageApi,
    ui::modal::{Effect, ImageModal, ModalEvent},
};

/// Runs an [`ImageModal`] against a live API.
///
/// Network effects are awaited one at a time and their outcome is fed back
/// into the modal. Effects that need the host (the enter-animation timer)
/// are handed back from [`ModalDriver::dispatch`].
pub struct ModalDriver<A>
where
    A: ImageApi,
{
    modal: ImageModal,
    api: A,
}

impl<A> ModalDriver<A>
where
    A: ImageApi,
{
    pub fn new(api: A) -> Self {
        ModalDriver {
            modal: ImageModal::new(),
            api,
        }
    }

    pub fn modal(&self) -> &ImageModal {
        &self.modal
    }

    pub async fn dispatch(&mut self, event: ModalEvent) -> Vec<Effect> {
        let mut pending: VecDeque<Effect> = self.modal.update(event).into();
        let mut host_effects = Vec::new();

        while let Some(effect) = pending.pop_front() {
            let outcome = match effect {
                Effect::FetchImages => match self.api.list_images().await {
                    Ok(images) => ModalEvent::GalleryLoaded(images),
                    Err(e) => ModalEvent::GalleryFailed(e.message),
                },
                Effect::CreateImage(url) => match self.api.create_image(&url).await {
                    Ok(image) => ModalEvent::UploadSucceeded(image),
                    Err(e) => ModalEvent::UploadFailed(e.message),
                },
                Effect::ScheduleEnterAnimation => {
                    host_effects.push(effect);
                    continue;
                }
            };

            pending.extend(self.modal.update(outcome));
        }

        host_effects
    }
}
