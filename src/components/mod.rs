mod footer;
mod image_picker;

pub use footer::StatusFooter;
pub use image_picker::ImagePicker;
