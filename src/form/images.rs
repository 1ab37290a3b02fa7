use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ListingImage;

/// Hard cap the backend enforces on images per listing
pub const MAX_IMAGES: usize = 10;

lazy_static! {
    // Mirrors the backend's accepted-extension pattern.
    static ref IMAGE_URL: Regex =
        Regex::new(r"(?i)^https?://.*\.(jpg|jpeg|png|gif|webp)$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("image URL must point to a jpg, jpeg, png, gif or webp file")]
    InvalidUrl,
    #[error("a listing can carry at most 10 images")]
    ListFull,
}

/// Draft-local image list.
///
/// Keeps `display_order` a contiguous 1..N sequence matching list position.
/// Purely local state; nothing here talks to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageList {
    entries: Vec<ListingImage>,
}

impl ImageList {
    /// Validate and append an image URL, assigning the next display order
    pub fn add(&mut self, url: &str) -> Result<(), ImageError> {
        let url = url.trim();
        let captures = IMAGE_URL.captures(url).ok_or(ImageError::InvalidUrl)?;
        if self.entries.len() >= MAX_IMAGES {
            return Err(ImageError::ListFull);
        }

        let extension = captures[1].to_lowercase();
        let content_type = match extension.as_str() {
            "jpg" => "image/jpeg".to_string(),
            other => format!("image/{other}"),
        };
        let file_name = url.rsplit('/').next().map(str::to_string);

        self.entries.push(ListingImage {
            image_url: url.to_string(),
            display_order: self.entries.len() as u32 + 1,
            original_file_name: file_name,
            content_type: Some(content_type),
        });
        Ok(())
    }

    /// Remove the image at `index` and renumber the remaining entries.
    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        self.entries.remove(index);
        for (position, image) in self.entries.iter_mut().enumerate() {
            image.display_order = position as u32 + 1;
        }
    }

    pub fn entries(&self) -> &[ListingImage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<ListingImage> {
        self.entries
    }
}
