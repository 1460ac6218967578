pub mod pointer;

pub use pointer::PointerState;
