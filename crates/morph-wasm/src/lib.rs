use std::sync::Once;

use morph_core::control::{HandData, HandLandmarks};
use morph_core::shapes::glyph::AlphaMask;
use morph_core::{MorphConfig, ShapeModel, Solver};
use wasm_bindgen::prelude::*;

static LOGGER: Once = Once::new();

fn init_logging() {
    LOGGER.call_once(|| {
        console_error_panic_hook::set_once();
        // a second logger registration only fails if the host already set one
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

fn to_js(err: morph_core::MorphError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// GPU-compatible point record: 16 bytes, a `vec3<f32>` padded for storage buffers.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuPoint {
    position: [f32; 3],
    _pad: f32,
}

#[wasm_bindgen]
pub struct MorphWorld {
    solver: Solver,
    gpu_buffer: Vec<GpuPoint>,
}

#[wasm_bindgen]
impl MorphWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(particle_count: usize) -> Result<MorphWorld, JsValue> {
        init_logging();
        let solver = Solver::with_particle_count(particle_count).map_err(to_js)?;
        log::info!("MorphWorld created: {particle_count} particles");

        let gpu_buffer = vec![GpuPoint { position: [0.0; 3], _pad: 0.0 }; particle_count];
        let mut world = MorphWorld { solver, gpu_buffer };
        world.write_gpu_output();
        Ok(world)
    }

    /// Advance one frame; returns the time spent in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32, time: f32) -> f32 {
        let start = js_sys::Date::now();
        self.solver.step(dt, time);
        self.write_gpu_output();
        (js_sys::Date::now() - start) as f32
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_ptr(&self) -> *const f32 {
        self.gpu_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_byte_length(&self) -> usize {
        bytemuck::cast_slice::<GpuPoint, u8>(&self.gpu_buffer).len()
    }

    /// Tightly packed `x, y, z` positions, copied out.
    #[wasm_bindgen]
    pub fn positions(&self) -> Vec<f32> {
        self.solver.positions_flat().to_vec()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.solver.particles.count
    }

    #[wasm_bindgen]
    pub fn set_model(&mut self, name: &str) -> Result<(), JsValue> {
        let model: ShapeModel = name.parse().map_err(to_js)?;
        self.solver.set_model(model);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_model_index(&mut self, index: u32) -> Result<(), JsValue> {
        let model = ShapeModel::from_index(index)
            .ok_or_else(|| JsValue::from_str(&format!("no shape model at index {index}")))?;
        self.solver.set_model(model);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn model_name(&self) -> String {
        self.solver.model().name().to_string()
    }

    /// Display names of every model, in index order.
    #[wasm_bindgen]
    pub fn model_names() -> Vec<JsValue> {
        ShapeModel::ALL
            .iter()
            .map(|m| JsValue::from_str(m.name()))
            .collect()
    }

    /// Publish a tracked hand. `span` is the already normalised openness.
    #[wasm_bindgen]
    pub fn set_hand(&mut self, is_open: bool, span: f32, center_x: f32, center_y: f32) {
        self.solver.publish_hand(Some(HandData {
            is_open,
            span,
            center_x,
            center_y,
        }));
    }

    /// Publish raw landmarks as `[x0, y0, ..., x20, y20]` or with a `z` after
    /// each pair. Returns false and clears the hand when the length is wrong
    /// or a coordinate is not finite.
    #[wasm_bindgen]
    pub fn set_hand_landmarks(&mut self, coords: &[f32]) -> bool {
        let hand = HandLandmarks::from_flat(coords).map(|l| HandData::from_landmarks(&l));
        self.solver.publish_hand(hand);
        hand.is_some()
    }

    #[wasm_bindgen]
    pub fn clear_hand(&mut self) {
        self.solver.publish_hand(None);
    }

    #[wasm_bindgen]
    pub fn control_value(&self) -> f32 {
        self.solver.control_value()
    }

    #[wasm_bindgen]
    pub fn set_color(&mut self, hex: &str) -> Result<(), JsValue> {
        self.solver.set_color(hex).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn color(&self) -> Vec<f32> {
        self.solver.style.color.0.to_vec()
    }

    #[wasm_bindgen]
    pub fn point_size(&self) -> f32 {
        self.solver.style.point_size
    }

    #[wasm_bindgen]
    pub fn opacity(&self) -> f32 {
        self.solver.style.opacity
    }

    #[wasm_bindgen]
    pub fn additive_blending(&self) -> bool {
        self.solver.style.additive_blending
    }

    #[wasm_bindgen]
    pub fn depth_write(&self) -> bool {
        self.solver.style.depth_write
    }

    #[wasm_bindgen]
    pub fn rotation_y(&self) -> f32 {
        self.solver.rotation_y()
    }

    /// Column-major 4x4 model matrix carrying the cloud's rotation.
    #[wasm_bindgen]
    pub fn model_matrix(&self) -> Vec<f32> {
        self.solver.model_matrix().to_cols_array().to_vec()
    }

    #[wasm_bindgen]
    pub fn set_greeting(&mut self, text: &str, font_size: u32) -> Result<(), JsValue> {
        self.solver.set_greeting(text, font_size).map_err(to_js)
    }

    /// Hand over the alpha channel of a canvas the host drew a text model's
    /// string on, for glyphs the built-in font cannot render.
    #[wasm_bindgen]
    pub fn load_text_mask(
        &mut self,
        model: &str,
        width: u32,
        height: u32,
        alpha: Vec<u8>,
    ) -> Result<(), JsValue> {
        let model: ShapeModel = model.parse().map_err(to_js)?;
        let mask = AlphaMask::from_alpha(width, height, alpha).map_err(to_js)?;
        self.solver.insert_text_mask(model, &mask).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn set_frame_rate_independent(&mut self, enabled: bool) {
        self.solver.config.frame_rate_independent = enabled;
    }

    #[wasm_bindgen]
    pub fn reinitialize(&mut self) {
        self.solver.reinitialize();
        self.write_gpu_output();
    }

    /// Defaults the engine starts from, for host UIs.
    #[wasm_bindgen]
    pub fn default_particle_count() -> usize {
        MorphConfig::default().particle_count
    }
}

impl MorphWorld {
    fn write_gpu_output(&mut self) {
        for (out, pos) in self.gpu_buffer.iter_mut().zip(&self.solver.particles.position) {
            *out = GpuPoint {
                position: pos.to_array(),
                _pad: 0.0,
            };
        }
    }
}
