pub mod bvh_file;
mod frame;
pub mod parser;
mod types;

// Re-exports
pub use {
    bvh_file::{from_str, load},
    parser::parse,
    types::{
        BvhDocument, EndSite, ImportOptions, Joint, JointNode, Keyframe,
        ParseError, END_SITE_NAME,
    },
};
