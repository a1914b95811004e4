/// Termcube Core Library - cube puzzle model, animation and camera
///
/// This library holds everything about the puzzle that does not touch a
/// terminal: the 27-unit geometry, animated quarter turns, the canonicalized
/// move history, the orbit camera and the frame-stepped session.

pub mod action;
pub mod config;
pub mod error;
pub mod geometry;
pub mod moves;
pub mod projection;
pub mod scene;
pub mod session;
pub mod transform;

// Re-export commonly used types
pub use action::{Action, Orbit};
pub use config::Config;
pub use error::ConfigError;
pub use geometry::{Color, Cube, CubeUnit, Plane, Triangle};
pub use moves::{Move, MoveLog};
pub use projection::{Camera, OrbitCamera};
pub use scene::make_cube;
pub use session::Session;
pub use transform::Transform;
