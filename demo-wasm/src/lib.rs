use drape::{
    Camera, CameraControls, Cloth, ClothConfig, NoOpStepObserver, PointerEvent, RippleField, Vec3,
};
use wasm_bindgen::prelude::*;

/// Mirrors the page's orbit controls. JS polls `controls_enabled` each frame.
struct ControlsFlag(bool);

impl CameraControls for ControlsFlag {
    fn set_enabled(&mut self, enabled: bool) {
        self.0 = enabled;
    }
}

#[wasm_bindgen]
pub struct ClothDemo {
    cloth: Cloth<f32>,
    camera: Camera<f32>,
    controls: ControlsFlag,
    ripple: RippleField<f32>,
    /// Animate the ripple instead of simulating until the first grab.
    idle: bool,
    time: f32,
    buffer: Vec<f32>,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize, spacing: f32) -> Result<ClothDemo, JsValue> {
        let config = ClothConfig::new().with_grid(rows, cols).with_spacing(spacing);
        let cloth = Cloth::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut buffer = Vec::new();
        cloth.write_positions(&mut buffer);
        Ok(ClothDemo {
            cloth,
            camera: Camera::perspective(
                Vec3::new(0.0, 1.0, 6.0),
                Vec3::new(0.0, 1.0, 0.0),
                core::f32::consts::FRAC_PI_4,
                1.0,
                0.1,
                100.0,
            ),
            controls: ControlsFlag(true),
            ripple: RippleField::default(),
            idle: true,
            time: 0.0,
            buffer,
        })
    }

    /// Camera pose from the page, refreshed whenever the view changes.
    pub fn set_camera(&mut self, px: f32, py: f32, pz: f32, tx: f32, ty: f32, tz: f32, fov_y: f32, aspect: f32) {
        self.camera = Camera::perspective(Vec3::new(px, py, pz), Vec3::new(tx, ty, tz), fov_y, aspect, 0.1, 100.0);
        self.cloth.update_camera(&self.camera);
    }

    /// Returns true when a particle was grabbed.
    pub fn pointer_down(&mut self, ndc_x: f32, ndc_y: f32) -> bool {
        let grabbed = self
            .cloth
            .handle_pointer(PointerEvent::Down { ndc: [ndc_x, ndc_y] }, &self.camera, &mut self.controls)
            .is_some();
        if grabbed {
            self.idle = false;
        }
        grabbed
    }

    pub fn pointer_move(&mut self, ndc_x: f32, ndc_y: f32) {
        self.cloth
            .handle_pointer(PointerEvent::Move { ndc: [ndc_x, ndc_y] }, &self.camera, &mut self.controls);
    }

    pub fn pointer_up(&mut self) {
        self.cloth.handle_pointer(PointerEvent::Up, &self.camera, &mut self.controls);
    }

    pub fn update(&mut self, dt: f32) {
        if self.idle {
            self.time += dt.clamp(0.0, self.cloth.config().max_dt);
            let mut verts = self.cloth.positions();
            self.ripple.displace(&mut verts, self.time);
            self.buffer.clear();
            self.buffer.extend(verts.into_iter().flatten());
        } else {
            self.cloth.step(dt, &mut NoOpStepObserver);
            self.cloth.write_positions(&mut self.buffer);
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.cloth.set_paused(paused);
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls.0
    }

    /// Returns flat [x0, y0, z0, x1, ...] in row-major order
    pub fn positions(&self) -> Vec<f32> {
        self.buffer.clone()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.cloth.triangle_indices()
    }

    pub fn uvs(&self) -> Vec<f32> {
        drape::mesh::uvs(self.cloth.rows(), self.cloth.cols())
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.cloth.rows()
    }
    pub fn cols(&self) -> usize {
        self.cloth.cols()
    }
}
