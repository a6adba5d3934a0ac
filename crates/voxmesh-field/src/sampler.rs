//! Procedural density sampling.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use voxmesh_core::{DensityRule, FieldConfig, Result};
use voxmesh_voxel::OccupancyGrid;

/// Pure occupancy function over lattice coordinates.
///
/// The same coordinates under the same configuration always yield the same
/// result. Any coordinate triple is accepted; keeping it inside a grid is the
/// caller's job.
pub struct FieldSampler {
    config: FieldConfig,
    fbm: Option<Fbm<Perlin>>,
}

impl FieldSampler {
    /// Create a sampler from a validated configuration.
    pub fn new(config: FieldConfig) -> Result<Self> {
        config.validate()?;

        let fbm = match config.rule {
            DensityRule::Sinusoid => None,
            DensityRule::Fbm { seed, octaves } => {
                Some(Fbm::<Perlin>::new(seed).set_octaves(octaves))
            }
        };

        Ok(Self { config, fbm })
    }

    /// Get the field configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Raw density at a lattice coordinate, before thresholding.
    pub fn density(&self, x: i32, y: i32, z: i32) -> f64 {
        let f = self.config.frequency;
        let (fx, fy, fz) = (f * f64::from(x), f * f64::from(y), f * f64::from(z));
        match &self.fbm {
            Some(fbm) => fbm.get([fx, fy, fz]),
            None => fx.sin() * fy.sin() * fz.sin(),
        }
    }

    /// Whether the cell at a lattice coordinate is solid.
    #[inline]
    pub fn sample(&self, x: i32, y: i32, z: i32) -> bool {
        self.density(x, y, z) > self.config.threshold
    }

    /// Allocate a `2^fieldBits` grid and fill it from this sampler.
    pub fn build_grid(&self) -> Result<OccupancyGrid> {
        let _span = tracing::trace_span!("field.build_grid", bits = self.config.field_bits).entered();

        let mut grid = OccupancyGrid::with_field_bits(self.config.field_bits)?;
        grid.fill_with(|x, y, z| self.sample(x, y, z));

        tracing::debug!(
            size = grid.size(),
            occupied = grid.count_occupied(),
            "built occupancy grid"
        );
        Ok(grid)
    }
}

/// Validate `config` and build its occupancy grid in one step.
pub fn build_occupancy(config: &FieldConfig) -> Result<OccupancyGrid> {
    FieldSampler::new(config.clone())?.build_grid()
}
