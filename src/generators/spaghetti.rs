//! Cave-like "spaghetti" layouts
//!
//! Random straight halls are thrown onto the map; after the first, a hall is
//! kept only if it touches what has been accepted so far, so the result is
//! always a single connected region.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::MapError;
use crate::geometry::clip::{self, Join};
use crate::geometry::{Point, Region, Segment};
use crate::random::RandomSource;

fn default_max_samples_per_corridor() -> usize {
    10_000
}

/// Parameters for [`generate_spaghetti`].
///
/// `width` and `height` only bound where hall endpoints are sampled; the
/// finished region is moved to the origin but not rescaled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaghettiParams {
    pub width: f64,
    pub height: f64,
    /// Number of halls to accept.
    pub corridor_count: usize,
    /// Smallest buffer distance around a hall's centre line.
    pub min_width: f64,
    /// Largest buffer distance around a hall's centre line.
    pub max_width: f64,
    /// Samples allowed while looking for one connectable hall.
    #[serde(default = "default_max_samples_per_corridor")]
    pub max_samples_per_corridor: usize,
}

impl SpaghettiParams {
    pub fn new(width: f64, height: f64, corridor_count: usize, min_width: f64, max_width: f64) -> Self {
        Self {
            width,
            height,
            corridor_count,
            min_width,
            max_width,
            max_samples_per_corridor: default_max_samples_per_corridor(),
        }
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(MapError::config(format!(
                "spaghetti size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.min_width > 0.0) {
            return Err(MapError::config(format!(
                "hall width must be positive, got {}",
                self.min_width
            )));
        }
        if self.min_width > self.max_width {
            return Err(MapError::config(format!(
                "minimum hall width {} exceeds maximum {}",
                self.min_width, self.max_width
            )));
        }
        if self.max_samples_per_corridor == 0 {
            return Err(MapError::config("hall sample budget must be non-zero"));
        }
        Ok(())
    }
}

impl Default for SpaghettiParams {
    fn default() -> Self {
        Self::new(800.0, 800.0, 15, 5.0, 20.0)
    }
}

/// One accepted hall.
#[derive(Clone, Debug)]
pub struct Hall {
    pub line: Segment,
    pub width: f64,
    /// The buffered hall shape.
    pub shape: Region,
}

/// Accepted halls (in acceptance order) and their union, in final coordinates.
#[derive(Clone, Debug)]
pub struct SpaghettiLayout {
    pub halls: Vec<Hall>,
    pub region: Region,
}

fn sample_hall<R: Rng + ?Sized>(params: &SpaghettiParams, rng: &mut R) -> Hall {
    let start_x = rng.uniform(0.0, params.width);
    let end_x = rng.uniform(0.0, params.width);
    let start_y = rng.uniform(0.0, params.height);
    let end_y = rng.uniform(0.0, params.height);
    let width = rng.uniform(params.min_width, params.max_width);

    let line = Segment::new(Point::new(start_x, start_y), Point::new(end_x, end_y));
    let shape = clip::buffer_polyline(&[line.start, line.end], width, Join::Square);
    Hall { line, width, shape }
}

/// Accumulate connected halls until `corridor_count` are accepted.
pub fn generate_spaghetti<R: Rng + ?Sized>(
    params: &SpaghettiParams,
    rng: &mut R,
) -> Result<SpaghettiLayout, MapError> {
    params.validate()?;

    let mut halls: Vec<Hall> = Vec::with_capacity(params.corridor_count);
    let mut accumulated = Region::empty();

    while halls.len() < params.corridor_count {
        let mut accepted = None;
        for attempt in 0..params.max_samples_per_corridor {
            let hall = sample_hall(params, rng);
            if hall.shape.is_empty() {
                continue;
            }
            if halls.is_empty() || hall.shape.intersects(&accumulated) {
                trace!(attempt, accepted = halls.len(), "hall accepted");
                accepted = Some(hall);
                break;
            }
        }
        let Some(hall) = accepted else {
            return Err(MapError::ProbabilisticTimeout {
                operation: "spaghetti hall sampling",
                attempts: params.max_samples_per_corridor,
            });
        };
        accumulated = accumulated.union(&hall.shape)?;
        halls.push(hall);
    }

    let (region, (dx, dy)) = accumulated.translate_to_origin();
    let halls = halls
        .into_iter()
        .map(|h| Hall {
            line: Segment::new(h.line.start.translate(dx, dy), h.line.end.translate(dx, dy)),
            width: h.width,
            shape: h.shape.translate(dx, dy),
        })
        .collect();

    debug!(
        halls = params.corridor_count,
        vertices = region.vertex_count(),
        area = region.area(),
        "generated spaghetti"
    );

    Ok(SpaghettiLayout { halls, region })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_each_hall_touches_earlier_halls() {
        for seed in 0..5 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let layout = generate_spaghetti(&SpaghettiParams::new(800.0, 800.0, 8, 5.0, 20.0), &mut rng).unwrap();
            assert_eq!(layout.halls.len(), 8);

            let mut before = Region::empty();
            for (i, hall) in layout.halls.iter().enumerate() {
                if i > 0 {
                    assert!(hall.shape.intersects(&before), "seed {seed} hall {i}");
                }
                before = before.union(&hall.shape).unwrap();
            }
        }
    }

    #[test]
    fn test_region_starts_at_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let layout = generate_spaghetti(&SpaghettiParams::default(), &mut rng).unwrap();
        let b = layout.region.bounds().unwrap();
        assert!(b.min_x.abs() < 1e-9 && b.min_y.abs() < 1e-9);
        assert!(layout.region.area() > 0.0);
    }

    #[test]
    fn test_zero_halls_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let layout = generate_spaghetti(&SpaghettiParams::new(800.0, 800.0, 0, 5.0, 20.0), &mut rng).unwrap();
        assert!(layout.region.is_empty());
    }

    #[test]
    fn test_tiny_budget_times_out() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        // Hair-thin halls on a huge map almost never meet.
        let params = SpaghettiParams {
            max_samples_per_corridor: 1,
            ..SpaghettiParams::new(1.0e6, 1.0e6, 50, 0.5, 0.5)
        };
        assert!(matches!(
            generate_spaghetti(&params, &mut rng),
            Err(MapError::ProbabilisticTimeout { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_widths() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let params = SpaghettiParams::new(800.0, 800.0, 5, 20.0, 5.0);
        assert!(matches!(generate_spaghetti(&params, &mut rng), Err(MapError::Configuration(_))));
    }
}
