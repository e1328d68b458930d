/// CullVisitor — frustum-culling walk that fills a render queue.
///
/// Walks the scene's octree (or every drawable linearly when no octree
/// exists), classifies bounds against the camera frustum, and pushes
/// accepted drawables into a `RenderQueue`.
///
/// The walk threads a `skip_clip_test` flag down the recursion: once a
/// node's loose bound classifies fully inside, the whole subtree —
/// nodes and drawables both — is accepted without further frustum
/// tests. On large scenes that flag elides most of the per-object
/// classification work.

use crate::camera::{Camera, ClipState};
use super::drawable::{Drawable, DrawableKey};
use super::octree::{Octree, ROOT};
use super::render_queue::{RenderPassType, RenderQueue};
use super::scene::Scene;

/// Counters accumulated over one cull walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    /// Octree nodes entered
    pub nodes_visited: usize,
    /// Frustum classifications actually performed (nodes + drawables)
    pub clip_tests: usize,
    /// Drawables pushed into the queue
    pub pushed: usize,
    /// Drawables rejected by the frustum or the post-cull hook
    pub culled: usize,
}

/// Filter invoked after the frustum accepts a drawable.
///
/// Return `false` to drop the drawable anyway.
pub type PostCullHook<'a> = Box<dyn FnMut(&Drawable) -> bool + 'a>;

/// Frustum-culling traversal over one scene.
///
/// Borrows the camera mutably because classification may lazily
/// recompute the frustum planes.
pub struct CullVisitor<'a, Q: RenderQueue> {
    camera: &'a mut Camera,
    queue: &'a mut Q,
    post_cull_hook: Option<PostCullHook<'a>>,
    stats: CullStats,
}

impl<'a, Q: RenderQueue> CullVisitor<'a, Q> {
    pub fn new(camera: &'a mut Camera, queue: &'a mut Q) -> Self {
        Self {
            camera,
            queue,
            post_cull_hook: None,
            stats: CullStats::default(),
        }
    }

    /// Install a filter called after the frustum accepts a drawable.
    pub fn set_post_cull_hook(&mut self, hook: PostCullHook<'a>) {
        self.post_cull_hook = Some(hook);
    }

    /// Counters of the last `visit` (or of pushes since construction).
    pub fn stats(&self) -> &CullStats {
        &self.stats
    }

    /// Walk the scene and fill the queue.
    ///
    /// Uses the octree when the scene carries one, otherwise tests
    /// every drawable individually.
    pub fn visit(&mut self, scene: &Scene) {
        self.stats = CullStats::default();

        if let Some(octree) = scene.octree() {
            self.visit_node(scene, octree, ROOT, false);
        } else {
            for (key, drawable) in scene.drawables() {
                self.push_with_skip(key, drawable, false);
            }
        }
    }

    /// Classify one drawable and queue it if accepted.
    ///
    /// Entry point for callers walking their own object hierarchy
    /// instead of a scene octree.
    pub fn push(&mut self, key: DrawableKey, drawable: &Drawable) {
        self.push_with_skip(key, drawable, false);
    }

    fn visit_node(
        &mut self,
        scene: &Scene,
        octree: &Octree,
        node_index: u32,
        skip_clip_test: bool,
    ) {
        self.stats.nodes_visited += 1;

        let node = octree.node(node_index);
        let state = if skip_clip_test {
            ClipState::Inside
        } else {
            self.stats.clip_tests += 1;
            self.camera.frustum_mut().classify_aabb(node.loose_bounds())
        };

        if state == ClipState::Outside {
            return;
        }

        // Fully inside: the whole subtree skips further clip tests
        let skip_below = state == ClipState::Inside;

        for &key in node.objects() {
            if let Some(drawable) = scene.drawable(key) {
                self.push_with_skip(key, drawable, skip_below);
            }
        }

        for octant in 0..8 {
            if let Some(child) = node.child(octant) {
                self.visit_node(scene, octree, child, skip_below);
            }
        }
    }

    fn push_with_skip(&mut self, key: DrawableKey, drawable: &Drawable, skip_clip_test: bool) {
        if !drawable.is_visible() {
            return;
        }
        if self.queue.pass_type() == RenderPassType::Shadow && !drawable.casts_shadow() {
            return;
        }

        let state = if skip_clip_test || drawable.clip_disabled() {
            ClipState::Inside
        } else {
            self.stats.clip_tests += 1;
            self.camera
                .frustum_mut()
                .classify_aabb(drawable.world_bounding_box())
        };
        if state == ClipState::Outside {
            self.stats.culled += 1;
            return;
        }

        if let Some(hook) = &mut self.post_cull_hook {
            if !hook(drawable) {
                self.stats.culled += 1;
                return;
            }
        }

        self.queue.push(self.camera, key, drawable.render_order());
        self.stats.pushed += 1;
    }
}

#[cfg(test)]
#[path = "cull_visitor_tests.rs"]
mod tests;
