pub mod debug;
pub mod edges;
pub mod interactions;
pub mod network;
pub mod nodes;
pub mod physics;
pub mod plugin;
pub mod rotation;
pub mod setup;
pub mod sync;
