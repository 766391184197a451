//! labmark-core — Static rubric-grading engine for the songs REST-API lab.
//!
//! This crate turns a snapshot of a student submission (the server entry
//! file, the Mongoose model file, and a CI event payload) into a
//! deterministic, bounded [`model::GradeReport`]. Grading never fails:
//! missing files, unreadable payloads, and unparseable dates all resolve to
//! documented defaults at the point of I/O.

pub mod aggregate;
pub mod model;
pub mod signals;
pub mod sources;
pub mod submission;
pub mod tasks;
