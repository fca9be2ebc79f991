// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render reports and matrices for people.
//!
//! Renderers are pure string builders over the model; writing files is the
//! caller's job.

mod html;
mod text;

pub use html::{render_html_matrix, render_report};
pub use text::render_text_matrix;
