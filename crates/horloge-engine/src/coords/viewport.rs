/// Viewport size in logical pixels.
///
/// Renderers treat this as the basis for converting logical px positions to
/// NDC in shaders.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Uniform payload: size clamped to at least one pixel per axis.
    #[inline]
    pub fn ubo_size(self) -> [f32; 2] {
        [self.width.max(1.0), self.height.max(1.0)]
    }
}
