use serde::{Deserialize, Serialize};

use super::domain::ImageRef;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageListError {
    #[error("image index {index} out of range (listing has {len} images)")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered image references for a draft. The first entry is the cover image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageList(Vec<ImageRef>);

impl ImageList {
    /// Append references after the existing images, keeping their relative order.
    pub fn add_images<I>(&mut self, refs: I)
    where
        I: IntoIterator,
        I::Item: Into<ImageRef>,
    {
        self.0.extend(refs.into_iter().map(Into::into));
    }

    pub fn remove_image(&mut self, index: usize) -> Result<ImageRef, ImageListError> {
        if index >= self.0.len() {
            return Err(ImageListError::OutOfRange {
                index,
                len: self.0.len(),
            });
        }
        Ok(self.0.remove(index))
    }

    pub fn cover(&self) -> Option<&ImageRef> {
        self.0.first()
    }

    pub fn as_slice(&self) -> &[ImageRef] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<ImageRef> {
        self.0.clone()
    }
}

impl From<Vec<ImageRef>> for ImageList {
    fn from(value: Vec<ImageRef>) -> Self {
        Self(value)
    }
}

/// Cursor over a listing's images for the detail page carousel. Navigation wraps.
#[derive(Debug, Clone)]
pub struct ImageGallery<'a> {
    images: &'a [ImageRef],
    index: usize,
}

impl<'a> ImageGallery<'a> {
    pub fn new(images: &'a [ImageRef]) -> Self {
        Self { images, index: 0 }
    }

    pub fn current(&self) -> Option<&'a ImageRef> {
        self.images.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.index = if self.index + 1 == self.images.len() {
            0
        } else {
            self.index + 1
        };
    }

    pub fn previous(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.index = if self.index == 0 {
            self.images.len() - 1
        } else {
            self.index - 1
        };
    }

    /// Jump to a thumbnail; out-of-range selections are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Counter shown over the photo, e.g. `2 / 5`. Hidden for single-image listings.
    pub fn position_label(&self) -> Option<String> {
        (self.images.len() > 1).then(|| format!("{} / {}", self.index + 1, self.images.len()))
    }
}
