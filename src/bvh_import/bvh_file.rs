//! File level entry points for BVH import

use super::{parser, types::ImportOptions};
use crate::{
    anim::{self, AnimationClip, Skeleton},
    bvh_error::BvhError,
};
use log::info;
use std::{fs, path::Path};

/// Loads a .bvh file and converts it to a skeleton and animation clip
///
/// The skeleton's bones are in depth first pre-order over the file's
/// joint hierarchy, and the clip holds one position and one rotation
/// track per animated bone, keyed by bone index. Both are built fresh on
/// every call and handed to the caller to own.
///
/// # Errors
/// May return `BvhError`
pub fn load<P: AsRef<Path>>(
    path: P,
    options: &ImportOptions,
) -> Result<(Skeleton, AnimationClip), BvhError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(BvhError::StdIoError)?;
    let document = parser::parse(&text, options)?;
    info!(
        "{:?}: frames={}, frame_time={}",
        path, document.num_frames, document.frame_time,
    );
    Ok(anim::convert(&document.root))
}

/// Converts already read BVH text to a skeleton and animation clip
///
/// The caller supplies the complete file content; see [`load`] for the
/// shape of the output.
///
/// # Errors
/// May return `BvhError`
pub fn from_str(
    text: &str,
    options: &ImportOptions,
) -> Result<(Skeleton, AnimationClip), BvhError> {
    let document = parser::parse(text, options)?;
    Ok(anim::convert(&document.root))
}
