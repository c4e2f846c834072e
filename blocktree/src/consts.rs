//! Shared constants for the tree renderer.

/// Pixels per depth level when rows use fixed-depth indentation.
pub const FIXED_INDENT_STEP_PX: u32 = 16;

/// Left margin applied by each nested children container.
pub const NESTED_INDENT_MARGIN_PX: u32 = 12;

/// Depth of the document root row.
pub const ROOT_DEPTH: usize = 0;
