//! Recursive descent parser for the BVH text format
//!
//! A file is two sections: `HIERARCHY`, a nested block structure of joint
//! definitions, and `MOTION`, a frame count, a frame time, and one line of
//! whitespace separated samples per frame. The whole file is consumed in a
//! single front to back pass with no lookahead: the hierarchy grammar is
//! recursive, with the remaining line stream advancing as each nested
//! block is read, and every motion line is distributed over the finished
//! tree in the same traversal order.

use super::{
    frame,
    types::{
        BvhDocument, EndSite, ImportOptions, Joint, JointNode, ParseError,
    },
};
use log::debug;
use nalgebra_glm as glm;
use smallvec::SmallVec;

/// Single pass cursor over the lines of a file
///
/// Lines are yielded at most once, in file order, trimmed, with blank
/// lines skipped. There is no rewind, so the cursor must be exclusively
/// owned by one parse.
struct Cursor<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
        }
    }

    /// The next non-blank line, or `UnexpectedEnd` when the stream is
    /// exhausted
    fn next_content(&mut self) -> Result<&'a str, ParseError> {
        for line in self.lines.by_ref() {
            let line = line.trim();
            if !line.is_empty() {
                return Ok(line);
            }
        }
        Err(ParseError::UnexpectedEnd)
    }
}

/// Parses BVH text into a joint tree plus the motion header
///
/// The `HIERARCHY` section builds the tree, then each of the declared
/// frame lines is distributed over it, so every joint ends up with one
/// keyframe per frame at `time = frame_index * frame_time`.
///
/// # Errors
/// May return `ParseError`
#[allow(clippy::cast_precision_loss)]
pub fn parse(
    text: &str,
    options: &ImportOptions,
) -> Result<BvhDocument, ParseError> {
    let mut lines = Cursor::new(text);

    let first = lines.next_content()?;
    if !first.eq_ignore_ascii_case("HIERARCHY") {
        return Err(ParseError::ExpectedHierarchy(first.to_string()));
    }

    let first = lines.next_content()?;
    let mut root = read_node(&mut lines, first, options)?;
    if !matches!(root, JointNode::Root(_)) {
        return Err(ParseError::ExpectedRoot(first.to_string()));
    }

    let motion = lines.next_content()?;
    if !motion.eq_ignore_ascii_case("MOTION") {
        return Err(ParseError::ExpectedMotion(motion.to_string()));
    }

    // `Frames:` line, with the count as the second whitespace token
    let line = lines.next_content()?;
    let token = line
        .split_whitespace()
        .nth(1)
        .ok_or(ParseError::MissingFrameCount)?;
    let num_frames = token
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidFrameCount(token.to_string()))?;

    // `Frame Time:` line, with the seconds as the third whitespace token
    let line = lines.next_content()?;
    let token = line
        .split_whitespace()
        .nth(2)
        .ok_or(ParseError::MissingFrameTime)?;
    let frame_time = token
        .parse::<f32>()
        .map_err(|_| ParseError::InvalidFrameTime(token.to_string()))?;

    for index in 0..num_frames {
        let line = lines.next_content()?;
        let time = index as f32 * frame_time;
        frame::read_frame(&mut root, line, time, options)?;
    }

    debug!("parsed bvh: frames={num_frames}, frame_time={frame_time}");

    Ok(BvhDocument {
        root,
        num_frames,
        frame_time,
    })
}

/// Recursively parses one node given its already consumed first line
/// (`ROOT <name>`, `JOINT <name>` or `End Site`), then the node's block up
/// to and including the closing brace
fn read_node(
    lines: &mut Cursor<'_>,
    first_line: &str,
    options: &ImportOptions,
) -> Result<JointNode, ParseError> {
    let mut tokens = first_line.split_whitespace();
    let keyword = tokens.next().unwrap_or("");

    // `End Site` is the only two token node keyword
    let end_site = keyword.eq_ignore_ascii_case("END");
    if end_site
        && !tokens
            .next()
            .is_some_and(|t| t.eq_ignore_ascii_case("SITE"))
    {
        return Err(ParseError::UnexpectedKeyword(first_line.to_string()));
    }
    let root = keyword.eq_ignore_ascii_case("ROOT");
    if !end_site && !root && !keyword.eq_ignore_ascii_case("JOINT") {
        return Err(ParseError::UnexpectedKeyword(keyword.to_string()));
    }

    let brace = lines.next_content()?;
    if brace != "{" {
        return Err(ParseError::ExpectedOpeningBrace(brace.to_string()));
    }

    let offset = read_offset(lines, options)?;

    // End Sites have no channels and no children, so the closing brace
    // must come immediately
    if end_site {
        let close = lines.next_content()?;
        if close != "}" {
            return Err(ParseError::ExpectedClosingBrace(close.to_string()));
        }
        return Ok(JointNode::EndSite(EndSite { offset }));
    }

    let mut joint = Joint {
        name: tokens.next().unwrap_or("").to_string(),
        offset,
        channels: read_channels(lines)?,
        children: Vec::new(),
        frames: Vec::new(),
    };

    // A `}` closes this node; anything else begins a child node
    loop {
        let line = lines.next_content()?;
        if line == "}" {
            break;
        }
        joint.children.push(read_node(lines, line, options)?);
    }

    Ok(if root {
        JointNode::Root(joint)
    } else {
        JointNode::Joint(joint)
    })
}

/// Parses an `OFFSET` line into a scaled vector
fn read_offset(
    lines: &mut Cursor<'_>,
    options: &ImportOptions,
) -> Result<glm::Vec3, ParseError> {
    let line = lines.next_content()?;
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next().unwrap_or("");
    if !keyword.eq_ignore_ascii_case("OFFSET") {
        return Err(ParseError::ExpectedOffset(keyword.to_string()));
    }
    let values: Vec<&str> = tokens.collect();
    if values.len() != 3 {
        return Err(ParseError::OffsetTokenCount(values.len()));
    }
    let mut offset = glm::Vec3::zeros();
    for (axis, token) in values.iter().enumerate() {
        offset[axis] = token
            .parse::<f32>()
            .map_err(|_| ParseError::InvalidOffset((*token).to_string()))?;
    }
    Ok(offset * options.scale)
}

/// Parses a `CHANNELS` line
///
/// The declared count must match the number of channel name tokens. The
/// names themselves are accepted verbatim here; they are validated when
/// frame data is consumed.
fn read_channels(
    lines: &mut Cursor<'_>,
) -> Result<SmallVec<[String; 6]>, ParseError> {
    let line = lines.next_content()?;
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next().unwrap_or("");
    if !keyword.eq_ignore_ascii_case("CHANNELS") {
        return Err(ParseError::ExpectedChannels(keyword.to_string()));
    }
    let count = tokens.next().ok_or(ParseError::MissingChannelCount)?;
    let declared = count
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidChannelCount(count.to_string()))?;
    let channels: SmallVec<[String; 6]> =
        tokens.map(ToString::to_string).collect();
    if channels.len() != declared {
        return Err(ParseError::ChannelCountMismatch {
            declared,
            found: channels.len(),
        });
    }
    Ok(channels)
}
