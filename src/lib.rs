// Copyright @yucwang 2026

pub mod core;
pub mod emitters;
pub mod math;
pub mod media;
pub mod phase;
pub mod volumes;
