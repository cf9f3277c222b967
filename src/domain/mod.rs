// Domain layer - batch configuration and job types

pub mod model;

pub use model::{ConfigurationSnapshot, Job, MusicMode, OverlayKind};
