//! Rendering module
//!
//! The game draws nothing but filled axis-aligned rectangles, so a surface
//! only has to clear itself and fill a rect. The browser backend wraps a 2D
//! canvas context; [`HeadlessSurface`] records calls for native runs and tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::World;

/// A 2D drawing target of fixed pixel size
pub trait RenderSurface {
    /// Clear the whole surface
    fn clear(&mut self, size: Vec2);
    /// Fill the rectangle with top-left corner `origin` and extents `size`
    fn fill_rect(&mut self, origin: Vec2, size: Vec2);
}

/// Redraw the world, dropping bodies that left the vertical play bounds.
///
/// The surviving set is computed before anything is drawn, so removing a body
/// never causes its neighbour to be skipped. Returns how many bodies were
/// culled.
pub fn draw_world(world: &mut World, surface: &mut dyn RenderSurface) -> usize {
    let culled = world.cull_out_of_bounds();
    surface.clear(world.field_size());
    for body in world.bodies() {
        let (origin, size) = body.aabb().to_rect();
        surface.fill_rect(origin, size);
    }
    culled
}

/// Records the last frame's rectangles instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    /// Rectangles filled since the last clear, as (origin, size)
    pub rects: Vec<(Vec2, Vec2)>,
    /// Number of clears, i.e. frames drawn
    pub frames: u64,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for HeadlessSurface {
    fn clear(&mut self, _size: Vec2) {
        self.rects.clear();
        self.frames += 1;
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2) {
        self.rects.push((origin, size));
    }
}
