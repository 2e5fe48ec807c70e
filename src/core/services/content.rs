//=========================================================================
// Content Loading Contract
//=========================================================================
//
// Asset loading as seen by scenes. Decoding lives in whichever backend
// implements `ContentLoader`; asset paths are opaque strings to the core.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use async_trait::async_trait;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::cancel::{CancellationToken, Cancelled};

//=== ContentError ========================================================

/// Failure while resolving or decoding an asset.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to decode `{path}`: {reason}")]
    Decode { path: String, reason: String },

    #[error("asset load was cancelled")]
    Cancelled,
}

impl From<Cancelled> for ContentError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

//=== Resources ===========================================================

/// A decoded 2D texture.
pub trait Texture {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// A loaded font face.
pub trait Font {
    /// Family or file name, for diagnostics.
    fn name(&self) -> &str;
}

//=== ContentLoader =======================================================

/// Asynchronous texture and font loading.
#[async_trait(?Send)]
pub trait ContentLoader {
    async fn load_texture(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Rc<dyn Texture>, ContentError>;

    async fn load_font(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Rc<dyn Font>, ContentError>;
}
