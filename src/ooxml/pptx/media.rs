//! Image parts referenced by picture fills.
//!
//! Shapes never own image bytes. A picture fill holds an [`ImageHandle`]: the
//! relationship id from `a:blip/@r:embed` plus the registrar of the part that
//! owns the shape. Writing a new picture goes through the same registrar so
//! the relationship id stays stable across updates.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::format::ImageFormat;
use bytes::Bytes;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Image relationships of one part.
pub trait ImageRegistrar {
    /// Store a new image and return the relationship id that references it.
    fn add_image(&mut self, bytes: Bytes) -> Result<String>;

    /// Replace the bytes behind an existing relationship id.
    fn update_image(&mut self, rel_id: &str, bytes: Bytes) -> Result<()>;

    /// Bytes behind a relationship id, if it exists.
    fn image(&self, rel_id: &str) -> Option<Bytes>;
}

/// Registrar shared by every shape of a part.
pub type SharedImages = Rc<RefCell<dyn ImageRegistrar>>;

#[derive(Debug, Clone)]
struct MediaEntry {
    rel_id: String,
    bytes: Bytes,
    format: Option<ImageFormat>,
}

/// In-memory image registrar that allocates `rIdN` relationship ids.
#[derive(Debug, Clone)]
pub struct MediaStore {
    entries: Vec<MediaEntry>,
    next_id: u32,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start allocating at `rId{first}`, for parts that already use lower ids.
    pub fn starting_at(first: u32) -> Self {
        Self {
            entries: Vec::new(),
            next_id: first,
        }
    }

    /// Wrap the store for sharing between shapes.
    pub fn shared(self) -> SharedImages {
        Rc::new(RefCell::new(self))
    }

    /// Register bytes under a relationship id read from an existing part.
    pub fn insert(&mut self, rel_id: impl Into<String>, bytes: Bytes) {
        let rel_id = rel_id.into();
        let format = ImageFormat::detect(&bytes);
        match self.entries.iter_mut().find(|e| e.rel_id == rel_id) {
            Some(entry) => {
                entry.bytes = bytes;
                entry.format = format;
            },
            None => self.entries.push(MediaEntry { rel_id, bytes, format }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Detected format of the image behind a relationship id.
    pub fn format(&self, rel_id: &str) -> Option<ImageFormat> {
        self.entries
            .iter()
            .find(|e| e.rel_id == rel_id)
            .and_then(|e| e.format)
    }

    fn allocate_id(&mut self) -> String {
        loop {
            let mut buf = itoa::Buffer::new();
            let mut candidate = String::from("rId");
            candidate.push_str(buf.format(self.next_id));
            self.next_id += 1;
            if !self.entries.iter().any(|e| e.rel_id == candidate) {
                return candidate;
            }
        }
    }
}

impl Default for MediaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageRegistrar for MediaStore {
    fn add_image(&mut self, bytes: Bytes) -> Result<String> {
        let format = ImageFormat::detect(&bytes);
        if format.is_none() {
            warn!(len = bytes.len(), "registering image with unrecognised format");
        }
        let rel_id = self.allocate_id();
        debug!(rel_id = %rel_id, ?format, "image registered");
        self.entries.push(MediaEntry {
            rel_id: rel_id.clone(),
            bytes,
            format,
        });
        Ok(rel_id)
    }

    fn update_image(&mut self, rel_id: &str, bytes: Bytes) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.rel_id == rel_id)
            .ok_or_else(|| OoxmlError::InvalidRelationship(rel_id.to_string()))?;
        entry.format = ImageFormat::detect(&bytes);
        entry.bytes = bytes;
        debug!(rel_id, format = ?entry.format, "image updated in place");
        Ok(())
    }

    fn image(&self, rel_id: &str) -> Option<Bytes> {
        self.entries
            .iter()
            .find(|e| e.rel_id == rel_id)
            .map(|e| e.bytes.clone())
    }
}

/// A picture fill's image: a relationship id bound to its part's registrar.
#[derive(Clone)]
pub struct ImageHandle {
    rel_id: String,
    images: SharedImages,
}

impl ImageHandle {
    pub fn new(rel_id: impl Into<String>, images: SharedImages) -> Self {
        Self {
            rel_id: rel_id.into(),
            images,
        }
    }

    #[inline]
    pub fn rel_id(&self) -> &str {
        &self.rel_id
    }

    /// Image bytes; a dangling relationship id is an error.
    pub fn bytes(&self) -> Result<Bytes> {
        self.images
            .borrow()
            .image(&self.rel_id)
            .ok_or_else(|| OoxmlError::InvalidRelationship(self.rel_id.clone()))
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.images
            .borrow()
            .image(&self.rel_id)
            .and_then(|bytes| ImageFormat::detect(&bytes))
    }

    /// Replace the image bytes, keeping the relationship id.
    pub fn update(&self, bytes: Bytes) -> Result<()> {
        self.images.borrow_mut().update_image(&self.rel_id, bytes)
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.rel_id == other.rel_id && Rc::ptr_eq(&self.images, &other.images)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("rel_id", &self.rel_id)
            .finish_non_exhaustive()
    }
}
