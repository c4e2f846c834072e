//! Icon and label lookup for block types.
//!
//! The sidebar shows an icon next to every row and falls back to the type
//! label when a block has no name of its own.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::block::{Block, BlockKind};

/// Presentation metadata for one block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Icon name from the host's icon set.
    pub icon: &'static str,
    /// Human-readable type label.
    pub label: &'static str,
}

/// Look up the icon and label for a block type.
#[must_use]
pub fn entry(kind: &BlockKind) -> CatalogEntry {
    let (icon, label) = match kind {
        BlockKind::Page => ("file", "Page"),
        BlockKind::Section => ("layout", "Section"),
        BlockKind::Container => ("box", "Container"),
        BlockKind::Grid => ("grid", "Grid"),
        BlockKind::Header => ("panel-top", "Header"),
        BlockKind::Footer => ("panel-bottom", "Footer"),
        BlockKind::Form => ("clipboard-list", "Form"),
        BlockKind::Canvas => ("pen-tool", "Canvas"),
        BlockKind::Field => ("text-cursor-input", "Field"),
        BlockKind::Text => ("type", "Text"),
        BlockKind::Heading => ("heading", "Heading"),
        BlockKind::Image => ("image", "Image"),
        BlockKind::Button => ("mouse-pointer-click", "Button"),
        BlockKind::Video => ("video", "Video"),
        BlockKind::Divider => ("minus", "Divider"),
        BlockKind::Spacer => ("move-vertical", "Spacer"),
        BlockKind::Other(_) => ("square", "Block"),
    };
    CatalogEntry { icon, label }
}

/// Name to show for a block: its own name, or the type label when blank.
#[must_use]
pub fn display_name(block: &Block) -> String {
    let trimmed = block.name.trim();
    if trimmed.is_empty() {
        entry(&block.kind).label.to_owned()
    } else {
        trimmed.to_owned()
    }
}
