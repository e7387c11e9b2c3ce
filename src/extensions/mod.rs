pub mod snapshot;
pub mod timeline;

pub use snapshot::SceneSnapshot;
pub use timeline::AnimationTimeline;
