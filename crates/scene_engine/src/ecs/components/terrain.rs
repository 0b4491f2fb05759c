//! Terrain component
//!
//! Holds the settings an external generator needs to build a heightmap, the
//! layer stack used to texture it, and the resulting heights once supplied.
//! The heightmap itself is runtime data and is never persisted.

use approx::relative_eq;
use log::{debug, warn};

use crate::assets::{Material, ResourceHandle};
use crate::ecs::component::component_variant;
use crate::ecs::{Component, ComponentKind};
use crate::editor::Inspector;
use crate::foundation::math::{utils, Color, Vec2, Vec3, Vec4};
use crate::serialization::{PropertyTable, SerializedObject};

/// Side length of a generated heightmap, in samples
pub const HEIGHTMAP_RESOLUTION: usize = 1024;

/// Maximum number of texture layers
pub const MAX_LAYERS: usize = 32;

/// One texture layer, blended in by altitude and slope
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainLayer {
    /// Altitude (0..1 of terrain height) where the layer starts
    pub altitude_border: f32,
    /// Width of the altitude blend band
    pub altitude_transition: f32,
    /// Slope above which the layer applies; negative disables the slope test
    pub slope_border: f32,
    /// Sharpness of the slope blend
    pub slope_hardness: f32,
    /// World size of one texture tile
    pub texture_tile_size: Vec2,
    /// Texture tile offset
    pub tile_offset: f32,
    /// Surface material
    pub material: Option<ResourceHandle<Material>>,
}

impl Default for TerrainLayer {
    fn default() -> Self {
        Self {
            altitude_border: 0.0,
            altitude_transition: 0.0,
            slope_border: -1.0,
            slope_hardness: 1.0,
            texture_tile_size: Vec2::new(10.0, 10.0),
            tile_offset: 0.0,
            material: None,
        }
    }
}

impl SerializedObject for TerrainLayer {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.property("altitude_border", &mut self.altitude_border, 0.0);
        table.property("altitude_transition", &mut self.altitude_transition, 0.0);
        table.property("slope_border", &mut self.slope_border, -1.0);
        table.property("slope_hardness", &mut self.slope_hardness, 1.0);
        table.property("texture_tile_size", &mut self.texture_tile_size, Vec2::new(10.0, 10.0));
        table.property("tile_offset", &mut self.tile_offset, 0.0);
        table.resource("material", &mut self.material);
    }
}

/// Inputs that determine the generated heightmap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    /// World extent (x, max height, z)
    pub dimensions: Vec3,
    /// Noise seed
    pub seed: i32,
    /// Fractal persistence
    pub fractal_smoothness: f32,
    /// Vertical exaggeration of mountains
    pub mountain_scale: f32,
    /// How strongly edges fall off into water
    pub island_factor: f32,
}

impl GenerationSettings {
    fn differs_from(&self, other: &Self) -> bool {
        self.seed != other.seed
            || !relative_eq!(self.dimensions, other.dimensions)
            || !relative_eq!(self.fractal_smoothness, other.fractal_smoothness)
            || !relative_eq!(self.mountain_scale, other.mountain_scale)
            || !relative_eq!(self.island_factor, other.island_factor)
    }
}

/// Procedural landscape with water
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    dimensions: Vec3,
    water_color: Color,
    water_depth: f32,
    layers: Vec<TerrainLayer>,
    seed: i32,
    fractal_smoothness: f32,
    mountain_scale: f32,
    island_factor: f32,

    heights: Vec<f32>,
    resolution: usize,
    needs_regeneration: bool,
}

impl Default for Terrain {
    fn default() -> Self {
        Self {
            dimensions: Vec3::new(2000.0, 300.0, 2000.0),
            water_color: Vec4::new(0.1, 0.3, 0.5, 0.8),
            water_depth: 20.0,
            layers: vec![TerrainLayer::default()],
            seed: 0,
            fractal_smoothness: 0.5,
            mountain_scale: 1.0,
            island_factor: 0.5,
            heights: Vec::new(),
            resolution: 0,
            needs_regeneration: true,
        }
    }
}

impl Terrain {
    /// World extent (x, max height, z)
    pub fn dimensions(&self) -> Vec3 {
        self.dimensions
    }

    /// Set the world extent
    pub fn set_dimensions(&mut self, dimensions: Vec3) {
        self.dimensions = dimensions;
        self.needs_regeneration = true;
    }

    /// Water surface colour
    pub fn water_color(&self) -> Color {
        self.water_color
    }

    /// Water level above the terrain base
    pub fn water_depth(&self) -> f32 {
        self.water_depth
    }

    /// Texture layers, lowest first
    pub fn layers(&self) -> &[TerrainLayer] {
        &self.layers
    }

    /// Append a layer; fails once [`MAX_LAYERS`] is reached
    pub fn add_layer(&mut self, layer: TerrainLayer) -> bool {
        if self.layers.len() >= MAX_LAYERS {
            warn!("Terrain already has {MAX_LAYERS} layers");
            return false;
        }
        self.layers.push(layer);
        true
    }

    /// Remove a layer by index
    pub fn remove_layer(&mut self, index: usize) -> Option<TerrainLayer> {
        (index < self.layers.len()).then(|| self.layers.remove(index))
    }

    /// Current generation inputs
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            dimensions: self.dimensions,
            seed: self.seed,
            fractal_smoothness: self.fractal_smoothness,
            mountain_scale: self.mountain_scale,
            island_factor: self.island_factor,
        }
    }

    /// Replace the generation inputs
    pub fn set_generation_settings(&mut self, settings: GenerationSettings) {
        if settings.differs_from(&self.generation_settings()) {
            self.needs_regeneration = true;
        }
        self.dimensions = settings.dimensions;
        self.seed = settings.seed;
        self.fractal_smoothness = settings.fractal_smoothness;
        self.mountain_scale = settings.mountain_scale;
        self.island_factor = settings.island_factor;
    }

    /// Whether the heightmap is missing or stale
    pub fn needs_regeneration(&self) -> bool {
        self.needs_regeneration
    }

    /// Consume a pending regeneration request
    pub fn take_regeneration_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_regeneration)
    }

    /// Install a generated heightmap
    ///
    /// `heights` holds `resolution * resolution` samples in 0..1, row-major
    /// along z. Returns false and leaves the terrain unchanged on a size
    /// mismatch.
    pub fn set_heights(&mut self, resolution: usize, heights: Vec<f32>) -> bool {
        if resolution < 2 || heights.len() != resolution * resolution {
            warn!(
                "Rejected heightmap with {} samples for resolution {}",
                heights.len(),
                resolution
            );
            return false;
        }
        self.resolution = resolution;
        self.heights = heights;
        self.needs_regeneration = false;
        debug!("Terrain heightmap installed ({resolution}x{resolution})");
        true
    }

    /// Whether a heightmap is installed
    pub fn has_heights(&self) -> bool {
        !self.heights.is_empty()
    }

    /// World height at local (x, z), bilinearly interpolated
    ///
    /// The terrain is centred on its origin. Points outside it return `None`.
    pub fn sample_height(&self, x: f32, z: f32) -> Option<f32> {
        if self.heights.is_empty() {
            return None;
        }
        let u = x / self.dimensions.x + 0.5;
        let v = z / self.dimensions.z + 0.5;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }

        let last = (self.resolution - 1) as f32;
        let (gx, gz) = (u * last, v * last);
        let (x0, z0) = (gx.floor() as usize, gz.floor() as usize);
        let (x1, z1) = ((x0 + 1).min(self.resolution - 1), (z0 + 1).min(self.resolution - 1));
        let (tx, tz) = (gx - x0 as f32, gz - z0 as f32);

        let at = |ix: usize, iz: usize| self.heights[iz * self.resolution + ix];
        let near = utils::lerp(at(x0, z0), at(x1, z0), tx);
        let far = utils::lerp(at(x0, z1), at(x1, z1), tx);
        Some(utils::lerp(near, far, tz) * self.dimensions.y)
    }
}

impl SerializedObject for Terrain {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        let before = self.generation_settings();

        table.property("dimensions", &mut self.dimensions, Vec3::new(2000.0, 300.0, 2000.0));
        table.property("water_color", &mut self.water_color, Vec4::new(0.1, 0.3, 0.5, 0.8));
        table.property("water_depth", &mut self.water_depth, 20.0);
        table.property("seed", &mut self.seed, 0);
        table.property("fractal_smoothness", &mut self.fractal_smoothness, 0.5);
        table.property("mountain_scale", &mut self.mountain_scale, 1.0);
        table.property("island_factor", &mut self.island_factor, 0.5);
        table.objects("layers", &mut self.layers);

        if table.is_reading() {
            if self.layers.len() > MAX_LAYERS {
                warn!("Terrain has {} layers, keeping the first {MAX_LAYERS}", self.layers.len());
                self.layers.truncate(MAX_LAYERS);
            }
            if self.generation_settings().differs_from(&before) {
                self.needs_regeneration = true;
            }
        }
    }
}

impl Component for Terrain {
    const KIND: ComponentKind = ComponentKind::Terrain;

    fn draw_properties(&mut self, ui: &mut dyn Inspector) {
        let mut settings = self.generation_settings();
        ui.drag_vec3("Size", &mut settings.dimensions, 1.0);
        ui.drag_i32("Seed", &mut settings.seed, 1.0);
        ui.drag_f32("Fractal Smoothness", &mut settings.fractal_smoothness, 0.01, 0.0, 1.0);
        ui.drag_f32("Mountain Scale", &mut settings.mountain_scale, 0.01, 0.0, 10.0);
        ui.drag_f32("Island Factor", &mut settings.island_factor, 0.01, 0.0, 1.0);
        self.set_generation_settings(settings);

        ui.drag_vec4("Water Color", &mut self.water_color, 0.01, 0.0, 1.0);
        ui.drag_f32("Water Depth", &mut self.water_depth, 0.1, 0.0, f32::MAX);

        ui.text(&format!("Layers: {}/{MAX_LAYERS}", self.layers.len()));
        for (index, layer) in self.layers.iter_mut().enumerate() {
            if ui.collapsing_header(&format!("Layer {index}")) {
                ui.drag_f32("Altitude Border", &mut layer.altitude_border, 0.01, 0.0, 1.0);
                ui.drag_f32("Altitude Transition", &mut layer.altitude_transition, 0.01, 0.0, 1.0);
                ui.drag_f32("Slope Border", &mut layer.slope_border, 0.01, -1.0, 1.0);
                ui.drag_f32("Slope Hardness", &mut layer.slope_hardness, 0.01, 0.0, f32::MAX);
                ui.drag_vec2("Tile Size", &mut layer.texture_tile_size, 0.1);
                ui.drag_f32("Tile Offset", &mut layer.tile_offset, 0.01, 0.0, 1.0);
            }
        }
        if ui.button("Add Layer") {
            self.add_layer(TerrainLayer::default());
        }
        if ui.button("Regenerate") {
            self.needs_regeneration = true;
        }
    }

    component_variant!(Terrain);
}
