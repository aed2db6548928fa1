//! Framework-independent model of the image modal.
//!
//! Input events go through [`modal::ImageModal::update`], which mutates state
//! and returns the side effects to run. [`driver::ModalDriver`] runs the
//! network effects against an [`crate::client::image_api::ImageApi`].

pub mod driver;
pub mod gallery;
pub mod modal;
pub mod upload;
