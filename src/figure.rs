use crate::foundation::error::AnimResult;

pub(crate) mod svg;

/// A renderable figure produced by a caller-supplied plotting function.
///
/// The function-driven source sets the figure resolution, serializes it to an in-memory PNG
/// buffer and drops the figure before rendering the next frame.
pub trait Figure {
    /// Set the rasterization resolution in dots per inch.
    fn set_dpi(&mut self, dpi: f32);

    /// Rasterize at the current resolution and encode as PNG.
    fn encode_png(&self) -> AnimResult<Vec<u8>>;
}

impl<F: Figure + ?Sized> Figure for Box<F> {
    fn set_dpi(&mut self, dpi: f32) {
        (**self).set_dpi(dpi);
    }

    fn encode_png(&self) -> AnimResult<Vec<u8>> {
        (**self).encode_png()
    }
}
