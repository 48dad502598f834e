//! Services a shape reaches through the part it belongs to.

use crate::ooxml::error::Result;
use crate::ooxml::pptx::measure::{FixedAdvanceMeasurer, TextMeasurer};
use crate::ooxml::pptx::media::{MediaStore, SharedImages};
use crate::ooxml::pptx::options::LayoutOptions;
use crate::ooxml::pptx::parts::{MasterStyle, PartOwner};
use std::rc::Rc;

/// Everything a shape needs from its owning part.
///
/// Cloning is cheap: every field is reference counted, and all shapes of one
/// part share the same context.
#[derive(Clone)]
pub struct PartContext {
    owner: PartOwner,
    images: SharedImages,
    measurer: Rc<dyn TextMeasurer>,
    options: Rc<LayoutOptions>,
}

impl PartContext {
    /// Bind the part services together. Fails if `options` does not validate.
    pub fn new(
        owner: PartOwner,
        images: SharedImages,
        measurer: Rc<dyn TextMeasurer>,
        options: Rc<LayoutOptions>,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            owner,
            images,
            measurer,
            options,
        })
    }

    /// Context with an empty media store, the fixed-advance measurer and default options.
    pub fn headless(owner: PartOwner) -> Self {
        Self {
            owner,
            images: MediaStore::new().shared(),
            measurer: Rc::new(FixedAdvanceMeasurer::default()),
            options: Rc::new(LayoutOptions::default()),
        }
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        self.options = Rc::new(options);
        Ok(self)
    }

    pub fn with_measurer(mut self, measurer: Rc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    #[inline]
    pub fn owner(&self) -> &PartOwner {
        &self.owner
    }

    #[inline]
    pub fn master_style(&self) -> &MasterStyle {
        self.owner.master_style()
    }

    #[inline]
    pub fn images(&self) -> &SharedImages {
        &self.images
    }

    #[inline]
    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    #[inline]
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }
}

impl std::fmt::Debug for PartContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartContext")
            .field("owner", &self.owner.kind())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
