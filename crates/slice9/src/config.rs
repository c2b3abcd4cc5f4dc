//! Nine-slice configuration component and material mapping.

use bevy::prelude::*;
use bevy::render::render_resource::Face;
use serde::{Deserialize, Serialize};

/// Which faces of the plane get rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum RenderSide {
    /// Render the front face only (cull back faces)
    #[default]
    Front,
    /// Render the back face only (cull front faces)
    Back,
    /// Render both faces
    Double,
}

impl RenderSide {
    /// Culling mode for [`StandardMaterial::cull_mode`].
    pub fn cull_mode(self) -> Option<Face> {
        match self {
            RenderSide::Front => Some(Face::Back),
            RenderSide::Back => Some(Face::Front),
            RenderSide::Double => None,
        }
    }
}

impl From<&str> for RenderSide {
    /// Parse a side name from external string configuration (scene files,
    /// editor fields, console input) — the entry point for hosts that carry
    /// sides as text rather than typed values. Unrecognized values fall back
    /// to `Front` instead of failing.
    fn from(value: &str) -> Self {
        match value {
            "back" => RenderSide::Back,
            "double" => RenderSide::Double,
            // Including "front".
            _ => RenderSide::Front,
        }
    }
}

/// Nine-slice plane configuration.
///
/// Add this to an entity and [`Slice9Plugin`](crate::Slice9Plugin) attaches
/// the mesh (and material, unless `using_custom_material`) and keeps both in
/// sync with later edits.
///
/// `width`/`height`/`padding` are world units; `left`/`right`/`top`/`bottom`
/// are texture-space slice boundaries in pixels of the source image. The two
/// metrics are deliberately independent: how thick the border renders on
/// screen is decoupled from which pixels of the artwork are treated as
/// non-stretching.
///
/// `padding` should stay below `min(width, height) / 2`; a larger value is
/// not rejected but produces crossed (degenerate) geometry.
#[derive(Component, Reflect, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[reflect(Component)]
pub struct Slice9 {
    /// Plane width in world units
    pub width: f32,
    /// Plane height in world units
    pub height: f32,
    /// Non-scaling border thickness in world units, uniform on all sides
    pub padding: f32,
    /// Left slice boundary in image pixels
    pub left: f32,
    /// Right slice boundary in image pixels
    pub right: f32,
    /// Top slice boundary in image pixels
    pub top: f32,
    /// Bottom slice boundary in image pixels
    pub bottom: f32,
    /// Material base color
    pub color: Color,
    /// Material opacity (0-1)
    pub opacity: f32,
    /// Alpha-blend the material
    pub transparent: bool,
    /// Which faces get rendered
    pub side: RenderSide,
    /// Render as wireframe for debugging
    pub debug: bool,
    /// Alpha cutoff; above 0 switches the material to alpha masking
    pub alpha_test: f32,
    /// Texture asset path, empty for no texture
    pub src: String,
    /// When true this component only manages geometry; the entity's material
    /// is supplied (and owned) externally
    pub using_custom_material: bool,
    /// Remap UVs into a sub-rectangle of a shared atlas texture
    pub using_atlas: bool,
    /// Atlas sub-rectangle minimum corner in normalized UV space
    pub uv_atlas_min: Vec2,
    /// Atlas sub-rectangle maximum corner in normalized UV space
    pub uv_atlas_max: Vec2,
}

impl Default for Slice9 {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            padding: 0.1,
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            color: Color::WHITE,
            opacity: 1.0,
            transparent: true,
            side: RenderSide::Front,
            debug: false,
            alpha_test: 0.0,
            src: String::new(),
            using_custom_material: false,
            using_atlas: false,
            uv_atlas_min: Vec2::ZERO,
            uv_atlas_max: Vec2::ONE,
        }
    }
}

impl Slice9 {
    /// Create a configuration at the given size with default styling.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..default()
        }
    }
}

/// Did any field that feeds the geometry kernels change?
///
/// Visual material fields are excluded on purpose: they re-apply cheaply
/// without touching the vertex buffers.
pub fn geometry_changed(new: &Slice9, old: &Slice9) -> bool {
    new.width != old.width
        || new.height != old.height
        || new.padding != old.padding
        || new.left != old.left
        || new.right != old.right
        || new.top != old.top
        || new.bottom != old.bottom
}

/// Build the unlit material owned by a nine-slice entity.
pub fn make_material(slice: &Slice9) -> StandardMaterial {
    StandardMaterial {
        base_color: slice.color.with_alpha(slice.opacity),
        unlit: true,
        alpha_mode: alpha_mode(slice),
        cull_mode: slice.side.cull_mode(),
        double_sided: slice.side == RenderSide::Double,
        ..default()
    }
}

/// Re-apply the visual configuration to an existing material, leaving the
/// texture binding alone.
pub fn apply_material_config(material: &mut StandardMaterial, slice: &Slice9) {
    material.base_color = slice.color.with_alpha(slice.opacity);
    material.alpha_mode = alpha_mode(slice);
    material.cull_mode = slice.side.cull_mode();
    material.double_sided = slice.side == RenderSide::Double;
}

fn alpha_mode(slice: &Slice9) -> AlphaMode {
    if slice.alpha_test > 0.0 {
        AlphaMode::Mask(slice.alpha_test)
    } else if slice.transparent {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let slice = Slice9::default();
        assert_eq!(slice.width, 1.0);
        assert_eq!(slice.height, 1.0);
        assert_eq!(slice.padding, 0.1);
        assert_eq!(slice.left, 0.0);
        assert_eq!(slice.color, Color::WHITE);
        assert_eq!(slice.opacity, 1.0);
        assert!(slice.transparent);
        assert_eq!(slice.side, RenderSide::Front);
        assert!(!slice.debug);
        assert_eq!(slice.alpha_test, 0.0);
        assert!(slice.src.is_empty());
        assert!(!slice.using_custom_material);
        assert!(!slice.using_atlas);
        assert_eq!(slice.uv_atlas_min, Vec2::ZERO);
        assert_eq!(slice.uv_atlas_max, Vec2::ONE);
    }

    #[test]
    fn test_side_parsing_falls_back_to_front() {
        assert_eq!(RenderSide::from("front"), RenderSide::Front);
        assert_eq!(RenderSide::from("back"), RenderSide::Back);
        assert_eq!(RenderSide::from("double"), RenderSide::Double);
        assert_eq!(RenderSide::from("sideways"), RenderSide::Front);
        assert_eq!(RenderSide::from(""), RenderSide::Front);
    }

    #[test]
    fn test_cull_modes() {
        assert_eq!(RenderSide::Front.cull_mode(), Some(Face::Back));
        assert_eq!(RenderSide::Back.cull_mode(), Some(Face::Front));
        assert_eq!(RenderSide::Double.cull_mode(), None);
    }

    #[test]
    fn test_geometry_changed_tracks_geometry_fields_only() {
        let base = Slice9::default();

        let edits: [fn(&mut Slice9); 7] = [
            |s| s.width = 2.0,
            |s| s.height = 3.0,
            |s| s.padding = 0.2,
            |s| s.left = 4.0,
            |s| s.right = 4.0,
            |s| s.top = 4.0,
            |s| s.bottom = 4.0,
        ];
        for edit in edits {
            let mut edited = base.clone();
            edit(&mut edited);
            assert!(geometry_changed(&edited, &base));
        }

        let mut visual = base.clone();
        visual.color = Color::BLACK;
        visual.opacity = 0.5;
        visual.debug = true;
        visual.src = "panel.png".into();
        assert!(!geometry_changed(&visual, &base));
    }

    #[test]
    fn test_alpha_mode_mapping() {
        let mut slice = Slice9::default();
        assert_eq!(alpha_mode(&slice), AlphaMode::Blend);

        slice.transparent = false;
        assert_eq!(alpha_mode(&slice), AlphaMode::Opaque);

        slice.alpha_test = 0.5;
        assert_eq!(alpha_mode(&slice), AlphaMode::Mask(0.5));
    }
}
