#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod cache;
mod photo;

pub use cache::*;
pub use photo::render_photo_thumbnail;
