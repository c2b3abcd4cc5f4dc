//! Attach / update / texture-binding systems.
//!
//! Lifecycle mirrors the host's schedule: `setup_slice9` reacts to newly
//! added [`Slice9`] components, `update_slice9` diffs edited configurations
//! against the previous snapshot, and `apply_loaded_textures` polls in-flight
//! image loads and finishes the binding once pixel data (and therefore the
//! image's dimensions) is available.

use bevy::asset::LoadState;
use bevy::pbr::wireframe::Wireframe;
use bevy::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{apply_material_config, geometry_changed, make_material, Slice9};
use crate::mesh::build_plane_mesh;
use crate::regen::regenerate_mesh;

/// Runtime state of a nine-slice entity, inserted by [`setup_slice9`].
#[derive(Component)]
pub struct Slice9State {
    /// Geometry handle; positions and UVs are rewritten in place
    pub mesh: Handle<Mesh>,
    /// Owned material, `None` in custom-material mode
    pub material: Option<Handle<StandardMaterial>>,
    /// Currently bound image
    pub texture: Option<Handle<Image>>,
    /// Most recently requested texture path, suppresses redundant loads
    pub last_src: Option<String>,
    /// Previous configuration snapshot for the key-level diff
    pub last: Slice9,
}

/// An in-flight texture load.
///
/// `src` records what was asked for; a completion is applied only while it
/// still matches the component's current `src`, so a superseded request's
/// late callback can never overwrite a newer texture.
#[derive(Component)]
pub struct PendingTexture {
    pub handle: Handle<Image>,
    pub src: String,
}

/// Does `src` warrant a new load request?
///
/// Empty sources never load, and re-setting the same value as the last
/// request is a no-op.
fn is_new_source(src: &str, last_src: Option<&str>) -> bool {
    !src.is_empty() && last_src != Some(src)
}

/// Pixel dimensions regeneration should map against, or `None` to skip.
///
/// Material-owned mode with no bound texture has nothing meaningful to map —
/// regeneration is deferred until the image arrives. Custom-material mode
/// has no image metadata at all, so it falls back to a 1x1 ratio and UV
/// insets equal the raw pixel values.
fn current_image_size(
    slice: &Slice9,
    state: &Slice9State,
    images: &Assets<Image>,
) -> Option<Vec2> {
    if slice.using_custom_material {
        return Some(Vec2::ONE);
    }
    let image = images.get(state.texture.as_ref()?)?;
    Some(Vec2::new(image.width() as f32, image.height() as f32))
}

/// System to attach mesh and material to newly added [`Slice9`] entities.
pub fn setup_slice9(
    mut commands: Commands,
    query: Query<(Entity, &Slice9), Added<Slice9>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    for (entity, slice) in query.iter() {
        let mut mesh = build_plane_mesh(slice.width, slice.height);

        // Custom-material mode never waits on an image, so the nine-slice
        // shape can be applied immediately at the 1x1 ratio. Owned-material
        // mode keeps the uniform grid until the texture arrives.
        if slice.using_custom_material {
            regenerate_mesh(&mut mesh, slice, Vec2::ONE);
        }

        let mesh_handle = meshes.add(mesh);
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert(Mesh3d(mesh_handle.clone()));

        let mut material = None;
        let mut last_src = None;

        if !slice.using_custom_material {
            let material_handle = materials.add(make_material(slice));
            entity_commands.insert(MeshMaterial3d(material_handle.clone()));
            material = Some(material_handle);

            if slice.debug {
                entity_commands.insert(Wireframe);
            }

            if !slice.src.is_empty() {
                last_src = Some(slice.src.clone());
                let handle: Handle<Image> = asset_server.load(slice.src.clone());
                entity_commands.insert(PendingTexture {
                    handle,
                    src: slice.src.clone(),
                });
                debug!("requested texture {:?} for {:?}", slice.src, entity);
            }
        }

        entity_commands.insert(Slice9State {
            mesh: mesh_handle,
            material,
            texture: None,
            last_src,
            last: slice.clone(),
        });

        info!(
            "attached nine-slice plane {}x{} to {:?}",
            slice.width, slice.height, entity
        );
    }
}

/// System to apply configuration edits.
///
/// Order matches the update contract: visual material fields re-apply
/// unconditionally (cheap, idempotent), then texture binding if `src`
/// changed, then geometry regeneration if any of width/height/padding or the
/// four slice boundaries changed.
pub fn update_slice9(
    mut commands: Commands,
    mut query: Query<(Entity, &Slice9, &mut Slice9State), Changed<Slice9>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    images: Res<Assets<Image>>,
    asset_server: Res<AssetServer>,
) {
    for (entity, slice, mut state) in query.iter_mut() {
        // Change detection also fires on mutable access without an actual
        // edit; the snapshot comparison filters those out.
        if state.last == *slice {
            continue;
        }

        if !slice.using_custom_material {
            if let Some(material) = state
                .material
                .as_ref()
                .and_then(|handle| materials.get_mut(handle))
            {
                apply_material_config(material, slice);
            }

            if slice.debug != state.last.debug {
                if slice.debug {
                    commands.entity(entity).insert(Wireframe);
                } else {
                    commands.entity(entity).remove::<Wireframe>();
                }
            }

            if slice.src != state.last.src {
                bind_texture(
                    entity,
                    slice,
                    &mut state,
                    &mut commands,
                    &mut materials,
                    &mut meshes,
                    &images,
                    &asset_server,
                );
            }
        }

        if geometry_changed(slice, &state.last) {
            if let Some(image_size) = current_image_size(slice, &state, &images) {
                if let Some(mesh) = meshes.get_mut(&state.mesh) {
                    regenerate_mesh(mesh, slice, image_size);
                }
            }
        }

        state.last = slice.clone();
    }
}

/// Bind or clear the texture for an owned-material entity.
#[allow(clippy::too_many_arguments)]
fn bind_texture(
    entity: Entity,
    slice: &Slice9,
    state: &mut Slice9State,
    commands: &mut Commands,
    materials: &mut Assets<StandardMaterial>,
    meshes: &mut Assets<Mesh>,
    images: &Assets<Image>,
    asset_server: &AssetServer,
) {
    if !slice.src.is_empty() {
        if !is_new_source(&slice.src, state.last_src.as_deref()) {
            return;
        }
        // Texture added or changed.
        state.last_src = Some(slice.src.clone());
        let handle: Handle<Image> = asset_server.load(slice.src.clone());
        commands.entity(entity).insert(PendingTexture {
            handle,
            src: slice.src.clone(),
        });
        debug!("requested texture {:?} for {:?}", slice.src, entity);
        return;
    }

    // Texture removed.
    if state.texture.is_none() && state.last_src.is_none() {
        return;
    }
    state.last_src = None;
    state.texture = None;
    commands.entity(entity).remove::<PendingTexture>();

    if let Some(material) = state
        .material
        .as_ref()
        .and_then(|handle| materials.get_mut(handle))
    {
        material.base_color_texture = None;
    }

    // With no image bound this falls through to the regeneration guard
    // (owned-material mode) or the 1x1 ratio (custom-material mode).
    if let Some(image_size) = current_image_size(slice, state, images) {
        if let Some(mesh) = meshes.get_mut(&state.mesh) {
            regenerate_mesh(mesh, slice, image_size);
        }
    }
    info!("cleared texture binding for {:?}", entity);
}

/// System to finish texture bindings once their image has loaded.
///
/// Polls each [`PendingTexture`]; on success the image goes onto the
/// material and geometry regenerates against the now-known pixel dimensions.
/// A completion whose `src` no longer matches the component is stale and gets
/// dropped. Failures are logged and dropped — retry policy belongs to the
/// asset server, not this plugin.
pub fn apply_loaded_textures(
    mut commands: Commands,
    mut query: Query<(Entity, &Slice9, &mut Slice9State, &PendingTexture)>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    for (entity, slice, mut state, pending) in query.iter_mut() {
        match asset_server.load_state(&pending.handle) {
            LoadState::Loaded => {
                commands.entity(entity).remove::<PendingTexture>();

                if pending.src != slice.src {
                    debug!(
                        "discarding stale texture {:?} for {:?} (now {:?})",
                        pending.src, entity, slice.src
                    );
                    continue;
                }

                let Some(image) = images.get(&pending.handle) else {
                    continue;
                };
                let image_size = Vec2::new(image.width() as f32, image.height() as f32);

                state.texture = Some(pending.handle.clone());
                if let Some(material) = state
                    .material
                    .as_ref()
                    .and_then(|handle| materials.get_mut(handle))
                {
                    material.base_color_texture = Some(pending.handle.clone());
                }

                if let Some(mesh) = meshes.get_mut(&state.mesh) {
                    regenerate_mesh(mesh, slice, image_size);
                }

                info!(
                    "bound texture {:?} ({}x{}) to {:?}",
                    pending.src, image_size.x, image_size.y, entity
                );
            }
            LoadState::Failed(_) => {
                warn!("failed to load texture {:?} for {:?}", pending.src, entity);
                commands.entity(entity).remove::<PendingTexture>();
            }
            _ => {
                // Still loading, do nothing
            }
        }
    }
}
