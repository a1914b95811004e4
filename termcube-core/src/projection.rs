/// Camera, orbit controls and projection utilities
use std::f32::consts::FRAC_PI_2;

use nalgebra::{Matrix4, Point3, Vector3};

use crate::config::CameraConfig;

/// Perspective camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// A camera for a `width` x `height` character grid.
    ///
    /// Terminal cells are roughly twice as tall as they are wide, so the
    /// aspect ratio is halved.
    pub fn new(width: u16, height: u16, fov_degrees: f32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 8.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: fov_degrees.to_radians(),
            aspect: cell_aspect(width, height),
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.aspect = cell_aspect(width, height);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }
}

fn cell_aspect(width: u16, height: u16) -> f32 {
    width.max(1) as f32 / height.max(1) as f32 / 2.0
}

/// Map normalized device coordinates to grid cells.
///
/// Y is flipped because rows grow downward. Truncates toward zero and
/// saturates, so far off-screen points stay representable.
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: u16, height: u16) -> (i32, i32) {
    let x = (ndc_x + 1.0) * 0.5 * width as f32;
    let y = (1.0 - ndc_y) * 0.5 * height as f32;
    (x as i32, y as i32)
}

/// Yaw/pitch orbit around the origin with damped velocities.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub yaw_velocity: f32,
    pub pitch_velocity: f32,
    config: CameraConfig,
}

impl OrbitCamera {
    /// Pitch stays strictly inside +-90 degrees so look-at never flips.
    pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

    pub fn new(config: CameraConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            config,
        }
    }

    /// Push the yaw velocity by `sign` steps.
    pub fn nudge_yaw(&mut self, sign: f32) {
        self.yaw_velocity += sign * self.config.velocity_step;
    }

    pub fn nudge_pitch(&mut self, sign: f32) {
        self.pitch_velocity += sign * self.config.velocity_step;
    }

    /// Advance one frame.
    pub fn update(&mut self) {
        let cfg = &self.config;
        if self.yaw_velocity.abs() < cfg.rest_epsilon {
            self.yaw_velocity = 0.0;
        }
        if self.pitch_velocity.abs() < cfg.rest_epsilon {
            self.pitch_velocity = 0.0;
        }

        self.yaw += self.yaw_velocity;
        self.yaw_velocity /= cfg.damping;
        self.pitch += self.pitch_velocity;
        self.pitch_velocity /= cfg.damping;

        self.yaw = soft_clamp(self.yaw, cfg.iso_bound, cfg.iso_pull);
        self.pitch = soft_clamp(self.pitch, cfg.iso_bound, cfg.iso_pull)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Eye position on the orbit sphere.
    pub fn eye(&self) -> Point3<f32> {
        let r = self.config.radius;
        Point3::new(
            r * self.pitch.cos() * self.yaw.sin(),
            r * self.pitch.sin(),
            r * self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Point `camera` at the origin from the current eye position.
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.eye();
        camera.target = Point3::origin();
        camera.up = Vector3::y();
    }
}

/// Exponential pull back toward `+-bound` while outside it.
fn soft_clamp(value: f32, bound: f32, pull: f32) -> f32 {
    if value > bound {
        (1.0 - pull) * value + pull * bound
    } else if value < -bound {
        (1.0 - pull) * value - pull * bound
    } else {
        value
    }
}
