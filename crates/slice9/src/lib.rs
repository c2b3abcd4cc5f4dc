#![deny(unsafe_code)]

//! # Nine-Slice Planes for Bevy
//!
//! Renders UI panels and sprites with crisp, non-distorted borders from a
//! single texture: a plane built as a fixed 4x4 control grid whose 4 corner
//! patches keep their size while the 4 edge patches and the center stretch
//! to any width/height.
//!
//! ## Architecture
//! - `grid`: 4x4 control-grid layout table and the fixed triangulation
//! - `mesh`: initial plane construction (16 vertices, fixed topology)
//! - `regen`: in-place position/UV regeneration, including atlas remapping
//! - `config`: the [`Slice9`] component, render-side and material mapping
//! - `systems`: attach, configuration diffing, async texture binding
//! - [`Slice9Plugin`]: registers everything
//!
//! ## Usage
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_slice9::{Slice9, Slice9Plugin};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(Slice9Plugin)
//!         .add_systems(Startup, |mut commands: Commands| {
//!             commands.spawn((
//!                 Slice9 {
//!                     width: 3.0,
//!                     height: 1.5,
//!                     padding: 0.12,
//!                     left: 16.0,
//!                     right: 48.0,
//!                     top: 16.0,
//!                     bottom: 48.0,
//!                     src: "textures/panel.png".into(),
//!                     ..default()
//!                 },
//!                 Transform::default(),
//!             ));
//!         })
//!         .run();
//! }
//! ```

pub mod config;
pub mod grid;
pub mod mesh;
pub mod regen;
pub mod systems;

pub use config::*;
pub use grid::*;
pub use mesh::*;
pub use regen::*;
pub use systems::*;

use bevy::prelude::*;

/// Nine-slice plane plugin.
///
/// Registers the reflected configuration types and the three lifecycle
/// systems, chained so that an entity spawned, edited, and textured in the
/// same frame resolves in order.
pub struct Slice9Plugin;

impl Plugin for Slice9Plugin {
    fn build(&self, app: &mut App) {
        app
            // Types for reflection/serialization
            .register_type::<Slice9>()
            .register_type::<RenderSide>()
            // Lifecycle systems
            .add_systems(
                Update,
                (setup_slice9, update_slice9, apply_loaded_textures).chain(),
            );
    }
}
