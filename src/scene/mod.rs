//! Scene Inputs
//!
//! Per-frame data the renderer reads but does not own:
//! - CameraState: view and projection matrices
//! - PoseSource / SkeletonPose: global and inverse bind-pose transforms
//! - Primitive: index range, reference node and influencing bones

pub mod camera;
pub mod primitive;
pub mod skeleton;

pub use camera::CameraState;
pub use primitive::Primitive;
pub use skeleton::{PoseSource, SkeletonPose};
