//! Distribution of motion line samples over the joint tree

use super::types::{ImportOptions, JointNode, Keyframe, ParseError};
use nalgebra_glm as glm;
use std::str::SplitWhitespace;

/// Distributes one motion line over the joint tree
///
/// Tokens are consumed depth first in the same pre-order the hierarchy
/// was parsed in, each joint taking exactly as many tokens as it has
/// channels and appending one keyframe. The line must be fully consumed
/// by the time the root's subtree completes; leftover tokens are
/// rejected.
pub fn read_frame(
    root: &mut JointNode,
    line: &str,
    time: f32,
    options: &ImportOptions,
) -> Result<(), ParseError> {
    let mut tokens = line.split_whitespace();
    read_node_frame(root, &mut tokens, time, options)?;
    let leftover = tokens.count();
    if leftover > 0 {
        return Err(ParseError::TrailingSamples(leftover));
    }
    Ok(())
}

/// Recursive worker: consumes this node's channels, then its children's
fn read_node_frame(
    node: &mut JointNode,
    tokens: &mut SplitWhitespace<'_>,
    time: f32,
    options: &ImportOptions,
) -> Result<(), ParseError> {
    // End Sites carry no motion data
    let (JointNode::Root(joint) | JointNode::Joint(joint)) = node else {
        return Ok(());
    };

    let mut keyframe = Keyframe::new(time);
    for channel in &joint.channels {
        let token = tokens
            .next()
            .ok_or_else(|| ParseError::FrameTooShort(joint.name.clone()))?;
        apply_channel(&mut keyframe, channel, token, options)?;
    }
    joint.frames.push(keyframe);

    for child in &mut joint.children {
        read_node_frame(child, tokens, time, options)?;
    }
    Ok(())
}

/// Applies one channel token to the keyframe being built
///
/// Rotation channels right multiply an axis angle quaternion into the
/// accumulated rotation, so the composed result follows the file's
/// declared channel order rather than a fixed convention.
fn apply_channel(
    keyframe: &mut Keyframe,
    channel: &str,
    token: &str,
    options: &ImportOptions,
) -> Result<(), ParseError> {
    match channel {
        "Xposition" => {
            keyframe.position.x = sample(token)? * options.scale;
        }
        "Yposition" => {
            keyframe.position.y = sample(token)? * options.scale;
        }
        "Zposition" => {
            keyframe.position.z = sample(token)? * options.scale;
        }
        "Xrotation" => {
            rotate(keyframe, sample(token)?, &glm::vec3(1.0, 0.0, 0.0));
        }
        "Yrotation" => {
            rotate(keyframe, sample(token)?, &glm::vec3(0.0, 1.0, 0.0));
        }
        "Zrotation" => {
            rotate(keyframe, sample(token)?, &glm::vec3(0.0, 0.0, 1.0));
        }
        _ => return Err(ParseError::InvalidChannel(channel.to_string())),
    }
    Ok(())
}

/// Parses one sample value
fn sample(token: &str) -> Result<f32, ParseError> {
    token
        .parse::<f32>()
        .map_err(|_| ParseError::InvalidSample(token.to_string()))
}

/// Right multiplies a rotation of `degrees` about `axis` into the
/// keyframe's accumulated rotation
fn rotate(keyframe: &mut Keyframe, degrees: f32, axis: &glm::Vec3) {
    keyframe.rotation *= glm::quat_angle_axis(degrees.to_radians(), axis);
}
