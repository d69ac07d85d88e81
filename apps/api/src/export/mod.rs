// Preview/export surface: LaTeX typesetting plus the compile-service client.
// The preview is the RenderedDocument itself; export turns it into bytes.

pub mod render_client;
pub mod typeset;

pub use render_client::{PdfArtifact, RenderClient, RenderError};
pub use typeset::typeset;
