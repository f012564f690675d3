use std::fmt;

use uuid::Uuid;

use crate::member::errors::PhotoError;
use crate::member::errors::PhotoIdError;

/// Photo unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhotoId(pub Uuid);

impl PhotoId {
    /// Generate a new random photo ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a photo ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PhotoIdError> {
        Uuid::parse_str(s)
            .map(PhotoId)
            .map_err(|e| PhotoIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A photo in a member's gallery.
///
/// `external_id` references the object in external blob storage, when the
/// photo was uploaded through it. Fields are public for persistence
/// hydration; new photos enter a gallery only through [`PhotoGallery::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: PhotoId,
    pub url: String,
    pub external_id: Option<String>,
    pub is_main: bool,
}

/// Ordered photo gallery owned exclusively by one member.
///
/// Maintains the single-main invariant: at most one photo has
/// `is_main = true`, and exactly one whenever the gallery is non-empty. All
/// mutations go through [`add`](Self::add), [`set_main`](Self::set_main), and
/// [`remove`](Self::remove), each of which either upholds the invariant or
/// fails leaving the gallery unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhotoGallery(Vec<Photo>);

impl PhotoGallery {
    /// Create an empty gallery.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Rebuild a gallery from persisted photos, preserving stored order.
    ///
    /// Intended for repository hydration; the rows are trusted to satisfy the
    /// invariant they were saved under.
    pub fn from_photos(photos: Vec<Photo>) -> Self {
        Self(photos)
    }

    /// Append a new photo.
    ///
    /// The first photo added to an empty gallery is promoted to main; any
    /// later photo is inserted unselected. Photo construction is private to
    /// this method, so a caller cannot insert an already-main photo into a
    /// non-empty gallery.
    ///
    /// # Arguments
    /// * `url` - Public URL of the stored photo
    /// * `external_id` - Blob storage reference, when uploaded through it
    ///
    /// # Returns
    /// Reference to the appended photo
    pub fn add(&mut self, url: String, external_id: Option<String>) -> &Photo {
        let photo = Photo {
            id: PhotoId::new(),
            url,
            external_id,
            is_main: self.0.is_empty(),
        };
        self.0.push(photo);
        &self.0[self.0.len() - 1]
    }

    /// Select a photo as the main photo.
    ///
    /// Demotes the current main photo (if any) and promotes the target. Both
    /// flips happen under this one `&mut` borrow, so no observer can see two
    /// mains or zero mains.
    ///
    /// # Errors
    /// * `NotFound` - No photo has this ID (gallery unchanged)
    /// * `AlreadyMain` - Target is already the main photo (gallery unchanged)
    pub fn set_main(&mut self, id: &PhotoId) -> Result<(), PhotoError> {
        let target = self
            .0
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| PhotoError::NotFound(id.to_string()))?;

        if self.0[target].is_main {
            return Err(PhotoError::AlreadyMain(id.to_string()));
        }

        if let Some(current) = self.0.iter_mut().find(|p| p.is_main) {
            current.is_main = false;
        }
        self.0[target].is_main = true;

        Ok(())
    }

    /// Remove a photo and return it.
    ///
    /// The main photo cannot be removed without an explicit re-selection
    /// first, so a non-empty gallery never ends up without a main photo.
    ///
    /// # Errors
    /// * `NotFound` - No photo has this ID (gallery unchanged)
    /// * `CannotDeleteMain` - Target is the main photo (gallery unchanged)
    pub fn remove(&mut self, id: &PhotoId) -> Result<Photo, PhotoError> {
        let target = self
            .0
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| PhotoError::NotFound(id.to_string()))?;

        if self.0[target].is_main {
            return Err(PhotoError::CannotDeleteMain(id.to_string()));
        }

        Ok(self.0.remove(target))
    }

    /// Look up a photo by ID.
    pub fn get(&self, id: &PhotoId) -> Option<&Photo> {
        self.0.iter().find(|p| p.id == *id)
    }

    /// The currently selected main photo, if any.
    pub fn main(&self) -> Option<&Photo> {
        self.0.iter().find(|p| p.is_main)
    }

    /// URL of the main photo, if one is selected.
    pub fn main_url(&self) -> Option<&str> {
        self.main().map(|p| p.url.as_str())
    }

    /// All photos in insertion order.
    pub fn photos(&self) -> &[Photo] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
