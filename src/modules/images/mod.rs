pub mod models;

use async_graphql::{Context, Object, Result};

use super::backend::Backend;
use models::{ImageInput, ResizedImage};

const RESIZE_IMAGE: &str = "resize-image";

#[derive(Default)]
pub struct ImageMutation;

#[Object]
impl ImageMutation {
    /// Resize an image. Runs without caller identity.
    async fn resize_image(&self, ctx: &Context<'_>, image: ImageInput) -> Result<ResizedImage> {
        Backend::anonymous(ctx)?.call(RESIZE_IMAGE, &image).await
    }
}
