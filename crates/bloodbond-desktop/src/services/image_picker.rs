//! Native file dialog for profile photos.

use bloodbond_core::media::ImageFile;
use rfd::AsyncFileDialog;
use thiserror::Error;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickError {
    #[error("Selected file has an empty filename.")]
    EmptyName,
    #[error("Selected file is empty.")]
    EmptyFile,
    #[error("Selected file is not an image.")]
    NotAnImage,
}

/// Ask the user for an image. `Ok(None)` means the dialog was cancelled.
pub async fn pick_image() -> Result<Option<ImageFile>, PickError> {
    let Some(handle) = AsyncFileDialog::new()
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
        .await
    else {
        return Ok(None);
    };
    let file_name = handle.file_name();
    let bytes = handle.read().await;
    image_from_parts(&file_name, bytes).map(Some)
}

fn image_from_parts(file_name: &str, bytes: Vec<u8>) -> Result<ImageFile, PickError> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(PickError::EmptyName);
    }
    if bytes.is_empty() {
        return Err(PickError::EmptyFile);
    }
    let content_type = mime_guess::from_path(file_name)
        .first_raw()
        .map(str::to_string);
    if !content_type
        .as_deref()
        .is_some_and(|mime| mime.starts_with("image/"))
    {
        return Err(PickError::NotAnImage);
    }
    Ok(ImageFile::new(file_name, content_type, bytes))
}
