use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Name given to bones created from `End Site` markers, which carry no
/// name of their own in the file
pub const END_SITE_NAME: &str = "ENDSITE";

#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct ImportOptions {
    /// Uniform scale applied to every bind offset and every position
    /// channel sample
    pub scale: f32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { scale: 1.0f32 }
    }
}

/// One timestamped sample of a joint's local translation and rotation
///
/// The time is derived from the frame index and the file's global frame
/// time, not read per line. Position axes without a matching position
/// channel stay zero; the rotation starts as identity and accumulates one
/// axis rotation per rotation channel in file order.
#[derive(Clone, Debug)]
pub struct Keyframe {
    pub time: f32,
    pub position: glm::Vec3,
    pub rotation: glm::Quat,
}

impl Keyframe {
    #[must_use]
    pub fn new(time: f32) -> Self {
        Self {
            time,
            position: glm::Vec3::zeros(),
            rotation: glm::Quat::identity(),
        }
    }
}

/// A named joint definition, used for both the `ROOT` entry and nested
/// `JOINT` entries
#[derive(Clone, Debug)]
pub struct Joint {
    pub name: String,
    /// Bind pose translation relative to the parent joint
    pub offset: glm::Vec3,
    /// Channel tokens in file order. The order is significant: it controls
    /// both the order values are consumed from each frame line and the
    /// order rotations are composed. Tokens are kept verbatim here and
    /// validated when frame data is consumed.
    pub channels: SmallVec<[String; 6]>,
    pub children: Vec<JointNode>,
    /// One keyframe per motion line, in ascending frame order
    pub frames: Vec<Keyframe>,
}

/// A BVH `End Site` leaf: a terminal marker with a position only. No
/// name, no channels, no children, no animation.
#[derive(Clone, Debug)]
pub struct EndSite {
    pub offset: glm::Vec3,
}

/// One node of the parsed hierarchy
#[derive(Clone, Debug)]
pub enum JointNode {
    Root(Joint),
    Joint(Joint),
    EndSite(EndSite),
}

impl JointNode {
    /// Name of the node, with End Sites reporting the fixed sentinel
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Root(j) | Self::Joint(j) => &j.name,
            Self::EndSite(_) => END_SITE_NAME,
        }
    }

    /// Bind pose translation relative to the parent joint
    #[must_use]
    pub fn offset(&self) -> glm::Vec3 {
        match self {
            Self::Root(j) | Self::Joint(j) => j.offset,
            Self::EndSite(e) => e.offset,
        }
    }

    /// Child nodes, always empty for End Sites
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Root(j) | Self::Joint(j) => &j.children,
            Self::EndSite(_) => &[],
        }
    }

    /// The joint payload for animated nodes, `None` for End Sites
    #[must_use]
    pub fn joint(&self) -> Option<&Joint> {
        match self {
            Self::Root(j) | Self::Joint(j) => Some(j),
            Self::EndSite(_) => None,
        }
    }
}

/// A fully parsed file: the joint tree plus the motion header
#[derive(Clone, Debug)]
pub struct BvhDocument {
    pub root: JointNode,
    pub num_frames: usize,
    /// Seconds per frame
    pub frame_time: f32,
}

/// Errors specific to parsing BVH text. `BvhError` has a `From` trait to
/// handle these.
///
/// Every variant is fatal to the parse in progress; no partial document is
/// ever produced. The variants fall into three families: structural
/// (missing or mismatched keywords and braces, premature end of input),
/// malformed fields (wrong token counts, values that fail numeric
/// parsing), and `InvalidChannel`, which is deferred until the offending
/// channel is consumed from a frame line.
#[derive(Debug)]
pub enum ParseError {
    ExpectedHierarchy(String),
    ExpectedMotion(String),
    ExpectedRoot(String),
    UnexpectedKeyword(String),
    ExpectedOpeningBrace(String),
    ExpectedClosingBrace(String),
    UnexpectedEnd,
    ExpectedOffset(String),
    OffsetTokenCount(usize),
    InvalidOffset(String),
    ExpectedChannels(String),
    MissingChannelCount,
    InvalidChannelCount(String),
    ChannelCountMismatch { declared: usize, found: usize },
    MissingFrameCount,
    InvalidFrameCount(String),
    MissingFrameTime,
    InvalidFrameTime(String),
    InvalidChannel(String),
    InvalidSample(String),
    FrameTooShort(String),
    TrailingSamples(usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::ExpectedHierarchy(a) => {
                write!(f, "expected HIERARCHY, got: {a}")
            }
            Self::ExpectedMotion(a) => write!(f, "expected MOTION, got: {a}"),
            Self::ExpectedRoot(a) => {
                write!(f, "expected the ROOT joint, got: {a}")
            }
            Self::UnexpectedKeyword(a) => {
                write!(f, "expected ROOT, JOINT or End Site, got: {a}")
            }
            Self::ExpectedOpeningBrace(a) => {
                write!(f, "expected opening {{ after type and name, got: {a}")
            }
            Self::ExpectedClosingBrace(a) => {
                write!(f, "expected closing }} after End Site, got: {a}")
            }
            Self::UnexpectedEnd => {
                write!(f, "input ended before the file was complete")
            }
            Self::ExpectedOffset(a) => write!(f, "expected OFFSET, got: {a}"),
            Self::OffsetTokenCount(a) => {
                write!(f, "OFFSET takes 3 values, got {a}")
            }
            Self::InvalidOffset(a) => {
                write!(f, "OFFSET value is not a number: {a}")
            }
            Self::ExpectedChannels(a) => {
                write!(f, "expected CHANNELS, got: {a}")
            }
            Self::MissingChannelCount => {
                write!(f, "CHANNELS is missing its count")
            }
            Self::InvalidChannelCount(a) => {
                write!(f, "CHANNELS count is not a number: {a}")
            }
            Self::ChannelCountMismatch { declared, found } => {
                write!(f, "CHANNELS declared {declared} names but has {found}")
            }
            Self::MissingFrameCount => {
                write!(f, "the Frames: line is missing its count")
            }
            Self::InvalidFrameCount(a) => {
                write!(f, "frame count is not a number: {a}")
            }
            Self::MissingFrameTime => {
                write!(f, "the Frame Time: line is missing its value")
            }
            Self::InvalidFrameTime(a) => {
                write!(f, "frame time is not a number: {a}")
            }
            Self::InvalidChannel(a) => write!(f, "invalid channel type: {a}"),
            Self::InvalidSample(a) => {
                write!(f, "frame sample is not a number: {a}")
            }
            Self::FrameTooShort(a) => {
                write!(f, "frame line ran out of values at joint {a}")
            }
            Self::TrailingSamples(a) => {
                write!(f, "frame line has {a} values left over")
            }
        }
    }
}
