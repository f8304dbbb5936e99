/// FBCube Core Library - Wireframe cube rendering onto raw pixel surfaces
///
/// This library provides the single-threaded rendering pipeline: rotation,
/// perspective projection, integer line rasterization and the animation loop
/// that ties them together. Acquiring the pixel memory is left to the caller.

pub mod animation;
pub mod geometry;
pub mod projection;
pub mod raster;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use animation::{
    AnimationConfig, AnimationLoop, BounceConfig, CancelToken, EdgePalette, FrameClock, PoseState,
    ThreadClock,
};
pub use geometry::{Edge, EdgeGroup, SolidMesh};
pub use projection::{ProjectionAnchor, Projector};
pub use raster::draw_line;
pub use surface::{Canvas, Color, PixelFormat, PixelSurface, SurfaceError, SurfaceGeometry};
pub use transform::{RotationState, Transform};
