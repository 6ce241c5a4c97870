//! Conversion from a parsed joint tree to the output artifacts

use super::types::{
    AnimationChannel, AnimationClip, Bone, PositionKey, RotationKey, Skeleton,
};
use crate::bvh_import::JointNode;
use ahash::{HashMap, HashMapExt};
use log::debug;

/// Fixed label given to every produced clip
const CLIP_NAME: &str = "animation";

/// Converts a parsed joint tree into a skeleton and an animation clip
///
/// Bones are emitted depth first in pre-order, so the flat bone index
/// matches the traversal order of the tree, with the root at index 0.
/// Every animated joint contributes one channel keyed by its bone index,
/// with the bind offset baked additively into each position sample and
/// rotations carried over verbatim. End Sites become bones without
/// channels.
///
/// Conversion cannot fail on a parser produced tree; a joint with no
/// frames simply yields empty tracks.
#[must_use]
pub fn convert(root: &JointNode) -> (Skeleton, AnimationClip) {
    let mut bones = Vec::new();
    let mut channels = HashMap::new();
    walk(root, None, &mut bones, &mut channels);

    debug!(
        "converted: bones={}, channels={}",
        bones.len(),
        channels.len()
    );

    (
        Skeleton { bones },
        AnimationClip {
            name: CLIP_NAME.to_string(),
            duration: None,
            channels,
        },
    )
}

/// Emits the bone and channel for `node`, then recurses into its children
fn walk(
    node: &JointNode,
    parent: Option<usize>,
    bones: &mut Vec<Bone>,
    channels: &mut HashMap<usize, AnimationChannel>,
) {
    let index = bones.len();
    bones.push(Bone {
        name: node.name().to_string(),
        parent,
        children: Vec::new(),
        offset: node.offset(),
    });
    if let Some(parent) = parent {
        bones[parent].children.push(index);
    }

    // End Sites have a placement in the hierarchy but no animation
    let Some(joint) = node.joint() else {
        return;
    };

    let mut channel = AnimationChannel {
        positions: Vec::with_capacity(joint.frames.len()),
        rotations: Vec::with_capacity(joint.frames.len()),
    };
    for keyframe in &joint.frames {
        channel.positions.push(PositionKey {
            time: keyframe.time,
            data: keyframe.position + joint.offset,
        });
        channel.rotations.push(RotationKey {
            time: keyframe.time,
            data: keyframe.rotation,
        });
    }
    channels.insert(index, channel);

    for child in &joint.children {
        walk(child, Some(index), bones, channels);
    }
}
