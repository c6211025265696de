//! Rendering module
//!
//! The scene is built as a plain list of 2D draw commands, then replayed on a
//! `DrawSurface` (the browser canvas on wasm32).

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod commands;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, load_sprite_sheet};
pub use commands::{Color, DrawCommand, DrawSurface, Rect, SpriteFrame, replay};
pub use scene::{SceneOptions, Viewport, build_scene, is_blinking};
