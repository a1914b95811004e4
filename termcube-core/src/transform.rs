/// Animated quarter turns applied to the cube's units
use std::f32::consts::FRAC_PI_2;

use nalgebra::{Matrix4, Unit, Vector3};

use crate::config::AnimationConfig;
use crate::geometry::Cube;
use crate::moves::Move;

/// Rotation by `turns` quarter turns about `axis` (fractional turns allowed).
pub fn quarter_turn(axis: &Unit<Vector3<f32>>, turns: f32) -> Matrix4<f32> {
    Matrix4::from_axis_angle(axis, turns * FRAC_PI_2)
}

/// The single in-flight rotation.
///
/// Idle when `progress == 1`. Affected units are indices into [`Cube::units`].
#[derive(Debug, Clone)]
pub struct Transform {
    affected: Vec<usize>,
    progress: f64,
    axis: Unit<Vector3<f32>>,
    direction: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::idle()
    }
}

impl Transform {
    pub fn idle() -> Self {
        Self {
            affected: Vec::new(),
            progress: 1.0,
            axis: Vector3::y_axis(),
            direction: 1.0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn affected(&self) -> &[usize] {
        &self.affected
    }

    /// Re-seed for `mv`, selecting units by their current positions.
    ///
    /// Any unfinished rotation must have been folded in by a cancelling
    /// [`Transform::tick`] first; this simply replaces the affected set.
    pub fn start(&mut self, mv: Move, cube: &Cube) {
        self.affected = cube
            .units
            .iter()
            .enumerate()
            .filter(|(_, unit)| mv.selects(&unit.position))
            .map(|(i, _)| i)
            .collect();
        self.progress = 0.0;
        self.axis = mv.axis();
        self.direction = mv.direction.sign();
        log::debug!("start {mv}: {} units", self.affected.len());
    }

    /// Advance one frame and return the fraction of a quarter turn applied.
    ///
    /// With `cancel` set (or once progress is past the settle threshold) the
    /// whole remainder is applied now and the transform becomes idle.
    pub fn tick(&mut self, cube: &mut Cube, cancel: bool, config: &AnimationConfig) -> f64 {
        let cancel = cancel || self.progress > config.settle_threshold;

        let mut progress = self.progress * config.easing + (1.0 - config.easing);
        let mut delta = progress - self.progress;
        if cancel {
            delta += 1.0 - progress;
            progress = 1.0;
        }

        if delta != 0.0 {
            let rotation = quarter_turn(&self.axis, self.direction * delta as f32);
            for &i in &self.affected {
                let unit = &mut cube.units[i];
                unit.position = rotation.transform_vector(&unit.position);
                unit.rotation = rotation * unit.rotation;
            }
        }
        self.progress = progress;

        if self.is_idle() {
            settle(cube, &self.affected);
            self.affected.clear();
        }
        delta
    }
}

/// Snap finished units back onto the lattice.
///
/// Completed rotations are whole quarter turns, so positions are lattice
/// points and rotation matrices are signed permutations.
fn settle(cube: &mut Cube, affected: &[usize]) {
    let spacing = cube.spacing();
    for &i in affected {
        let unit = &mut cube.units[i];
        unit.position = unit.position.map(|c| (c / spacing).round() * spacing);
        unit.rotation = unit.rotation.map(f32::round);
    }
}
