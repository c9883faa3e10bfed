//! Line rendering collaborator.
//!
//! The stroke controller drives a [`LineRenderer`] and never rasterizes anything
//! itself. [`SceneLineRenderer`] is the in-memory implementation used by the
//! studio and by tests; GPU backends implement the same trait.

mod line;
mod scene;

pub use line::{ContainerId, EndCapMode, EndCapStyle, Joins, LineDesc, LineHandle, LineRenderer, TextureId};
pub use scene::{SceneLine, SceneLineRenderer};
