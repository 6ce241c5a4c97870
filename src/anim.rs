pub mod convert;
mod types;

// Re-exports
pub use {
    convert::convert,
    types::{
        AnimationChannel, AnimationClip, Bone, PositionKey, RotationKey,
        Skeleton,
    },
};
