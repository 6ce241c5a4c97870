//! BVH motion capture import
//!
//! Parses Biovision Hierarchy (.bvh) text into a joint tree and converts
//! that tree into a [`Skeleton`] plus an [`AnimationClip`] suitable for
//! driving a renderer or animation system. Parsing is a single blocking
//! pass with no global state, so separate files may be imported from
//! separate threads.
//!
//! The usual entry points are [`bvh_import::load`] for a file on disk and
//! [`bvh_import::from_str`] for text the caller has already read.
#![allow(clippy::module_name_repetitions)]

pub mod anim;
pub mod bvh_error;
pub mod bvh_import;

// Re-exports
pub use {
    anim::{AnimationChannel, AnimationClip, Bone, Skeleton},
    bvh_error::BvhError,
    bvh_import::{BvhDocument, ImportOptions, JointNode, ParseError},
};
