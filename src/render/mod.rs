//! Rendering gegen eine abstrakte Zeichenfläche (Paint- und Pick-Pass).

mod band_renderer;
mod recording;
mod selection;
mod surface;

pub use band_renderer::{BandRenderer, RenderStats};
pub use recording::{DrawCommand, RecordingSurface};
pub use selection::{IdSelection, SelectionHost, SelectionKind};
pub use surface::{DrawSurface, RenderPass};
