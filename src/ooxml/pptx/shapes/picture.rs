/// Picture (image) shape implementation.
use crate::ooxml::drawings::blip::blip_embed;
use crate::ooxml::element::XmlElement;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::media::{ImageHandle, SharedImages};
use crate::ooxml::pptx::shapes::base::{BaseShape, ShapeType};

/// A picture shape (`p:pic`) on a slide, layout or master.
///
/// # Examples
///
/// ```rust,ignore
/// if let Shape::Picture(picture) = shape {
///     let image = picture.image().unwrap();
///     println!("{} -> {:?}", image.rel_id(), image.format());
/// }
/// ```
#[derive(Clone)]
pub struct PictureShape {
    base: BaseShape,
    images: SharedImages,
}

impl PictureShape {
    pub fn new(element: XmlElement, images: SharedImages) -> Result<Self> {
        let base = BaseShape::new(element)?;
        if base.shape_type() != ShapeType::Picture {
            return Err(OoxmlError::InvalidFormat(format!(
                "expected <p:pic>, found <{}>",
                base.element().name()
            )));
        }
        Ok(Self { base, images })
    }

    #[inline]
    pub fn base(&self) -> &BaseShape {
        &self.base
    }

    #[inline]
    pub fn base_mut(&mut self) -> &mut BaseShape {
        &mut self.base
    }

    /// Relationship id of the embedded image (`p:blipFill/a:blip/@r:embed`).
    pub fn image_rel_id(&self) -> Option<&str> {
        self.base.element().first_child("blipFill").and_then(blip_embed)
    }

    /// Handle to the embedded image, bound to the part's registrar.
    pub fn image(&self) -> Option<ImageHandle> {
        self.image_rel_id()
            .map(|rel_id| ImageHandle::new(rel_id, self.images.clone()))
    }

    pub fn into_element(self) -> XmlElement {
        self.base.into_element()
    }
}

impl std::fmt::Debug for PictureShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PictureShape")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
