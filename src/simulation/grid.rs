//! Spacetime grid deformation
//!
//! A flat lattice in the XZ plane sags under the same attractors the
//! particles feel. Each vertex has a target height from the summed softened
//! potential and eases toward it every tick instead of snapping.
//! Only heights live here; line indices and GPU buffers belong to the renderer.

use super::states::{GravitationalBody, NVec3};

#[derive(Debug, Clone)]
pub struct SpacetimeGrid {
    size: usize, // cells per side, (size + 1)² vertices
    scale: f64, // vertex spacing
    smoothing: f64, // fraction of the gap closed per tick, in (0, 1]
    visual_scale: f64, // potential -> height
    softening: f64,
    heights: Vec<f64>,
    targets: Vec<f64>,
}

impl SpacetimeGrid {
    pub fn new(size: usize, scale: f64, smoothing: f64, visual_scale: f64, softening: f64) -> Self {
        let n = (size + 1) * (size + 1);
        Self {
            size,
            scale,
            smoothing,
            visual_scale,
            softening,
            heights: vec![0.0; n],
            targets: vec![0.0; n],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn vertex_count(&self) -> usize {
        self.heights.len()
    }

    /// Lattice index of column `i`, row `j`
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        j * (self.size + 1) + i
    }

    /// Flat (x, z) of a vertex, lattice centred on the origin
    pub fn vertex_xz(&self, idx: usize) -> (f64, f64) {
        let row = self.size + 1;
        let i = (idx % row) as f64;
        let j = (idx / row) as f64;
        let half = self.size as f64 / 2.0;
        ((i - half) * self.scale, (j - half) * self.scale)
    }

    /// World position `(x, height, z)` of a vertex
    pub fn vertex(&self, idx: usize) -> NVec3 {
        let (x, z) = self.vertex_xz(idx);
        NVec3::new(x, self.heights[idx], z)
    }

    pub fn height(&self, idx: usize) -> f64 {
        self.heights[idx]
    }

    pub fn target(&self, idx: usize) -> f64 {
        self.targets[idx]
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Softened potential depth at (x, z); the bodies' Y is ignored.
    /// With zero softening, a body exactly above the vertex contributes nothing.
    pub fn potential_height(&self, x: f64, z: f64, bodies: &[GravitationalBody]) -> f64 {
        let soft2 = self.softening * self.softening;
        let potential: f64 = bodies
            .iter()
            .filter_map(|b| {
                let dx = x - b.x.x;
                let dz = z - b.x.z;
                let d2 = dx * dx + dz * dz + soft2;
                (d2 > 0.0).then(|| -b.mu / d2.sqrt())
            })
            .sum();
        potential * self.visual_scale
    }

    /// Recompute every target height from this tick's bodies
    pub fn compute_targets(&mut self, bodies: &[GravitationalBody]) {
        for idx in 0..self.targets.len() {
            let (x, z) = self.vertex_xz(idx);
            let target = self.potential_height(x, z, bodies);
            self.targets[idx] = target;
        }
    }

    /// Move every height a `smoothing` fraction of the way to its target
    pub fn relax(&mut self) {
        for (h, t) in self.heights.iter_mut().zip(self.targets.iter()) {
            *h += (t - *h) * self.smoothing;
        }
    }

    /// One tick of deformation: new targets, then relax toward them
    pub fn deform(&mut self, bodies: &[GravitationalBody]) {
        self.compute_targets(bodies);
        self.relax();
    }
}
