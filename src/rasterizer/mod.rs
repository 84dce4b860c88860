// src/rasterizer/mod.rs

//! Software 3D rasterizer for the torus.
//!
//! The pipeline runs strictly downstream, once per sample:
//!
//! ```text
//! SurfaceSampler  →  Rotation::project  →  ZBuffer::resolve  →  shading::shade
//!  (object space)     (screen + 1/z)        (nearest wins)       (grayscale)
//! ```
//!
//! Nothing here owns frame state; the compositor threads its `RenderContext`
//! through these pieces.

pub mod depth;
pub mod shading;
pub mod surface;
pub mod transform;

pub use depth::{DepthTest, ZBuffer};
pub use surface::{SurfacePoint, SurfaceSampler, Torus};
pub use transform::{Projected, Projection, Rotation};

#[cfg(test)]
mod tests;
