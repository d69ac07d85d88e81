// Layout primitives: static font metrics and the paginated document flow.
// Templates compose blocks; this module measures them and breaks the pages.

pub mod document;
pub mod font_metrics;

// Re-export the public API consumed by the templates and the export surface.
pub use document::{paginate, Block, Column, ColumnFlow, Page, Region, RenderedDocument};
pub use font_metrics::{default_page_config, get_metrics, FontFamily, PageConfig};
