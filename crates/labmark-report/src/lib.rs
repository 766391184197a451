//! labmark-report — Rendering of grade reports.
//!
//! Rendering is a pure projection of a [`labmark_core::model::GradeReport`]:
//! the same report always renders to byte-identical output, and nothing in
//! this crate alters scoring.

pub mod summary;
pub mod text;
