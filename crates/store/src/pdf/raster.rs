//! Rasterization collaborators
//!
//! The PDF encoder never renders markup itself. It asks the live view for
//! pixel slices of the laid-out content, and asks a staging area to lay out
//! header and footer fragments off-screen before capturing them.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by rasterization collaborators
#[derive(Debug, Error)]
pub enum RasterError {
    /// The renderer could not produce an image
    #[error("Rasterization failed: {0}")]
    Failed(String),

    /// The produced image is unusable
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A staging node was used after being detached
    #[error("Staging node is not attached")]
    Detached,
}

/// Result type for rasterization
pub type RasterResult<T> = std::result::Result<T, RasterError>;

/// A captured bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterImage {
    /// 8-bit RGB pixels, row-major, no padding
    Rgb {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
    /// A baseline JPEG file
    Jpeg(Vec<u8>),
}

/// The on-screen editor surface holding the laid-out document
#[async_trait(?Send)]
pub trait RenderedView {
    /// Full scroll height of the content in pixels
    fn content_height_px(&self) -> f64;

    /// Capture `height_px` pixels of content starting `top_px` from the top
    ///
    /// `scale` multiplies the output resolution.
    async fn rasterize_slice(
        &self,
        top_px: f64,
        height_px: f64,
        scale: f64,
    ) -> RasterResult<RasterImage>;
}

/// Handle to a fragment attached to a staging area
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct StagingNode {
    id: u64,
}

impl StagingNode {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Off-screen area where markup fragments are laid out for capture
#[async_trait(?Send)]
pub trait StagingArea {
    /// Lay out a markup fragment and return its node
    async fn attach(&mut self, markup: &str) -> RasterResult<StagingNode>;

    /// Capture an attached node
    async fn rasterize(&mut self, node: &StagingNode) -> RasterResult<RasterImage>;

    /// Remove a node from the staging area
    fn detach(&mut self, node: StagingNode);
}

/// A fragment attached to a staging area for the lifetime of the guard
///
/// The guard holds the staging area mutably, so only one fragment can be
/// staged at a time. Dropping it detaches the fragment, on the error path
/// as well.
pub struct StagedMarkup<'a, S: StagingArea + ?Sized> {
    area: &'a mut S,
    node: Option<StagingNode>,
}

impl<'a, S: StagingArea + ?Sized> StagedMarkup<'a, S> {
    /// Attach `markup` to `area`
    pub async fn attach(area: &'a mut S, markup: &str) -> RasterResult<Self> {
        let node = area.attach(markup).await?;
        tracing::trace!(node = node.id(), "Staged markup");
        Ok(Self {
            area,
            node: Some(node),
        })
    }

    /// Capture the staged fragment
    pub async fn rasterize(&mut self) -> RasterResult<RasterImage> {
        match &self.node {
            Some(node) => self.area.rasterize(node).await,
            None => Err(RasterError::Detached),
        }
    }
}

impl<S: StagingArea + ?Sized> Drop for StagedMarkup<'_, S> {
    fn drop(&mut self) {
        if let Some(node) = self.node.take() {
            tracing::trace!(node = node.id(), "Detaching staged markup");
            self.area.detach(node);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory collaborators shared by the PDF tests

    use super::*;
    use std::cell::Cell;

    /// A view with a fixed content height that returns solid white slices
    pub struct FakeView {
        pub height_px: f64,
        pub slices: Cell<usize>,
        pub fail_on_slice: Option<usize>,
    }

    impl FakeView {
        pub fn new(height_px: f64) -> Self {
            Self {
                height_px,
                slices: Cell::new(0),
                fail_on_slice: None,
            }
        }
    }

    #[async_trait(?Send)]
    impl RenderedView for FakeView {
        fn content_height_px(&self) -> f64 {
            self.height_px
        }

        async fn rasterize_slice(
            &self,
            _top_px: f64,
            _height_px: f64,
            _scale: f64,
        ) -> RasterResult<RasterImage> {
            let index = self.slices.get();
            self.slices.set(index + 1);
            if self.fail_on_slice == Some(index) {
                return Err(RasterError::Failed("slice capture failed".to_string()));
            }
            Ok(white(4, 4))
        }
    }

    /// A staging area that records attached markup and balances nodes
    #[derive(Default)]
    pub struct FakeStaging {
        pub next_id: u64,
        pub live: usize,
        pub max_live: usize,
        pub attached: Vec<String>,
        pub detached: usize,
        pub fail_rasterize: bool,
    }

    #[async_trait(?Send)]
    impl StagingArea for FakeStaging {
        async fn attach(&mut self, markup: &str) -> RasterResult<StagingNode> {
            self.next_id += 1;
            self.live += 1;
            self.max_live = self.max_live.max(self.live);
            self.attached.push(markup.to_string());
            Ok(StagingNode::new(self.next_id))
        }

        async fn rasterize(&mut self, _node: &StagingNode) -> RasterResult<RasterImage> {
            if self.fail_rasterize {
                return Err(RasterError::Failed("staging capture failed".to_string()));
            }
            Ok(white(8, 2))
        }

        fn detach(&mut self, _node: StagingNode) {
            self.live -= 1;
            self.detached += 1;
        }
    }

    pub fn white(width: u32, height: u32) -> RasterImage {
        RasterImage::Rgb {
            width,
            height,
            pixels: vec![255; (width * height * 3) as usize],
        }
    }
}
