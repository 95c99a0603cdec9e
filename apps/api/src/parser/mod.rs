//! Heuristic resume parsing: plain text in, best-effort structure out.
//!
//! This module is pure and synchronous. It knows nothing about HTTP, file
//! formats, or storage; binary-to-text extraction happens upstream (or not
//! at all, in which case non-text uploads simply parse as empty).

pub mod models;
pub mod segmenter;
pub mod vocabulary;

pub use models::{
    EducationEntry, ParsedResume, PersonalInfo, ProjectEntry, WorkExperienceEntry,
};
pub use segmenter::parse;
