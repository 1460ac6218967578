pub mod lifecycle;
pub mod scene;

pub use lifecycle::{EngineLifecycle, MountError};
