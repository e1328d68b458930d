/// Render queues — ordered sinks for drawables accepted by culling.
///
/// The cull visitor pushes `(camera, drawable, render order)` triples
/// into whatever implements `RenderQueue`; the renderer drains the
/// queue afterwards. `SortedRenderQueue` is the standard
/// implementation: it records entries during the walk and radix-sorts
/// them by render order in one pass at the end.

use glam::Mat4;
use rdst::{RadixKey, RadixSort};
use crate::camera::Camera;
use super::drawable::DrawableKey;

/// Which pass a queue collects for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPassType {
    /// Main color pass
    Color,
    /// Shadow-map pass; drawables that cast no shadow are skipped
    /// during culling
    Shadow,
}

/// Sink for drawables accepted by a cull pass.
pub trait RenderQueue {
    /// Pass this queue collects for.
    fn pass_type(&self) -> RenderPassType;

    /// Accept one drawable. Called once per accepted drawable per walk.
    fn push(&mut self, camera: &mut Camera, key: DrawableKey, render_order: i32);
}

/// One accepted drawable with its sort key.
#[derive(Debug, Clone, Copy)]
pub struct QueueEntry {
    pub key: DrawableKey,
    pub render_order: i32,
}

impl RadixKey for QueueEntry {
    const LEVELS: usize = 4;

    #[inline]
    fn get_level(&self, level: usize) -> u8 {
        self.render_order.get_level(level)
    }
}

/// Render queue that orders entries by ascending render order.
///
/// Entries accumulate unsorted during the cull walk; `sort()` runs a
/// radix sort over the collected slice. The view-projection of the
/// camera that filled the queue is snapshotted on the first push so
/// the renderer can bind it when draining.
pub struct SortedRenderQueue {
    pass_type: RenderPassType,
    entries: Vec<QueueEntry>,
    view_projection: Option<Mat4>,
}

impl SortedRenderQueue {
    pub fn new(pass_type: RenderPassType) -> Self {
        Self {
            pass_type,
            entries: Vec::new(),
            view_projection: None,
        }
    }

    /// Sort collected entries by ascending render order.
    pub fn sort(&mut self) {
        self.entries.radix_sort_unstable();
    }

    /// Collected entries, in push order until `sort()` is called.
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// View-projection of the camera that filled this queue.
    pub fn view_projection(&self) -> Option<&Mat4> {
        self.view_projection.as_ref()
    }

    /// Drop all entries and the camera snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.view_projection = None;
    }
}

impl RenderQueue for SortedRenderQueue {
    fn pass_type(&self) -> RenderPassType {
        self.pass_type
    }

    fn push(&mut self, camera: &mut Camera, key: DrawableKey, render_order: i32) {
        if self.view_projection.is_none() {
            self.view_projection = Some(camera.view_projection_matrix());
        }
        self.entries.push(QueueEntry { key, render_order });
    }
}

#[cfg(test)]
#[path = "render_queue_tests.rs"]
mod tests;
