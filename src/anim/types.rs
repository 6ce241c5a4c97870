use ahash::HashMap;
use nalgebra_glm as glm;

/// One bone of a skeleton
///
/// `parent` and `children` are indices into the owning skeleton's bone
/// list; `offset` is the bind pose translation relative to the parent.
#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub offset: glm::Vec3,
}

/// An ordered bone hierarchy
///
/// Bones are stored depth first in pre-order, so index 0 is the root and
/// every parent precedes its children. End Site markers are materialized
/// as bones (they have a placement in the hierarchy) but are never
/// animated. The skeleton exclusively owns its bone list.
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
}

impl Skeleton {
    /// Index of the first bone with the given name
    #[must_use]
    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

/// Timestamped position sample
#[derive(Clone, Debug)]
pub struct PositionKey {
    pub time: f32,
    pub data: glm::Vec3,
}

/// Timestamped rotation sample
#[derive(Clone, Debug)]
pub struct RotationKey {
    pub time: f32,
    pub data: glm::Quat,
}

/// Position and rotation tracks for one bone
///
/// Both tracks are time sorted because frames are appended in ascending
/// frame order.
#[derive(Clone, Debug, Default)]
pub struct AnimationChannel {
    pub positions: Vec<PositionKey>,
    pub rotations: Vec<RotationKey>,
}

/// A set of per bone animation tracks
///
/// Channels are keyed by the flattened bone index of the matching
/// `Skeleton`. A `duration` of `None` means the duration is derived from
/// the track extents on demand. Clips are built once per import and not
/// modified afterwards.
#[derive(Clone, Debug)]
pub struct AnimationClip {
    pub name: String,
    pub duration: Option<f32>,
    pub channels: HashMap<usize, AnimationChannel>,
}

impl AnimationClip {
    /// Clip duration: the explicit value if one was set, otherwise the
    /// largest sample time across all tracks
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration.unwrap_or_else(|| {
            self.channels
                .values()
                .flat_map(|c| {
                    c.positions
                        .iter()
                        .map(|k| k.time)
                        .chain(c.rotations.iter().map(|k| k.time))
                })
                .fold(0.0f32, f32::max)
        })
    }
}
