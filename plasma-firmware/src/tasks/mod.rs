//! Embassy async tasks

pub mod animation;

pub use animation::animation_task;
