// Copyright @yucwang 2026

pub mod computation_node;
pub mod emitter;
pub mod interaction;
pub mod medium;
pub mod medium_loader;
pub mod phase;
pub mod rng;
pub mod volume;
