//! Growable contiguous storage
//!
//! The sole memory primitive of the reader core. Token streams, node
//! arenas, root lists, and the forest builder's bracket stack are all
//! `GrowArray`s.

mod grow_array;

pub use grow_array::{GrowArray, DEFAULT_CAPACITY};
