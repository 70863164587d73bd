use crate::domain::{Coordinate, Track, ViewportBound};
use rand::Rng;

/// Source of the random per-axis perturbation applied to a coordinate to
/// simulate GPS noise. Injectable so tests can substitute a deterministic
/// source.
pub trait JitterSource: Send + Sync {
    /// Draws one offset uniformly from `[-half_span, +half_span]`.
    fn draw(&self, half_span: f64) -> f64;
}

/// Draws from the thread-local rand generator, which is safe under
/// concurrent requests: every call gets an independent draw without locking.
#[derive(Debug, Default)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn draw(&self, half_span: f64) -> f64 {
        if half_span == 0.0 {
            return 0.0;
        }
        rand::rng().random_range(-half_span..=half_span)
    }
}

/// Produces a jittered, bounds-clamped track from a fixed reference path.
///
/// Each reference coordinate gets an independent uniform offset of at most
/// `jitter_magnitude / 2` per axis and is then clamped into the bound, so the
/// bound is a hard post-condition regardless of the jitter magnitude. Output
/// order and length match the input exactly. With a jitter magnitude of zero
/// the output is the base path clamped to the bound, nothing else.
pub fn generate(base: &[Coordinate], jitter_magnitude: f64, bound: &ViewportBound, source: &dyn JitterSource) -> Track {
    let half_span = jitter_magnitude / 2.0;
    let coordinates = base
        .iter()
        .map(|coordinate| {
            bound.clamp(Coordinate {
                longitude: coordinate.longitude + source.draw(half_span),
                latitude: coordinate.latitude + source.draw(half_span),
            })
        })
        .collect();

    Track::new(coordinates)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Always draws the configured offset, clamped to the requested span.
    pub(crate) struct FixedJitter(pub(crate) f64);

    impl JitterSource for FixedJitter {
        fn draw(&self, half_span: f64) -> f64 {
            self.0.clamp(-half_span, half_span)
        }
    }

    pub(crate) fn san_francisco_base() -> Vec<Coordinate> {
        vec![
            Coordinate { longitude: -122.4194, latitude: 37.7749 },
            Coordinate { longitude: -122.414, latitude: 37.7785 },
            Coordinate { longitude: -122.409, latitude: 37.7810 },
            Coordinate { longitude: -122.404, latitude: 37.7835 },
            Coordinate { longitude: -122.399, latitude: 37.7860 },
        ]
    }

    pub(crate) fn san_francisco_bound() -> ViewportBound {
        ViewportBound {
            min_lon: -122.425,
            max_lon: -122.395,
            min_lat: 37.770,
            max_lat: 37.790,
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.004)]
    #[case(0.5)]
    #[case(100.0)]
    fn every_generated_coordinate_lies_within_the_bound(#[case] jitter_magnitude: f64) {
        let bound = san_francisco_bound();

        for _ in 0..100 {
            let track = generate(&san_francisco_base(), jitter_magnitude, &bound, &ThreadRngJitter);

            for coordinate in track.coordinates() {
                assert!(bound.contains(coordinate), "{:?} is out of bound", coordinate);
            }
        }
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(5)]
    fn output_length_matches_input_length(#[case] len: usize) {
        let base: Vec<Coordinate> = san_francisco_base().into_iter().cycle().take(len).collect();

        let track = generate(&base, 0.004, &san_francisco_bound(), &ThreadRngJitter);

        assert_eq!(track.len(), len);
    }

    #[test]
    fn zero_jitter_yields_the_base_path_exactly() {
        let base = san_francisco_base();

        let track = generate(&base, 0.0, &san_francisco_bound(), &ThreadRngJitter);

        assert_eq!(track.coordinates(), base.as_slice());
    }

    #[test]
    fn zero_jitter_still_clamps_out_of_bound_coordinates() {
        let base = vec![Coordinate { longitude: -130.0, latitude: 37.7749 }];

        let track = generate(&base, 0.0, &san_francisco_bound(), &ThreadRngJitter);

        assert_eq!(track.coordinates(), &[Coordinate { longitude: -122.425, latitude: 37.7749 }]);
    }

    #[test]
    fn jitter_offsets_each_axis_before_clamping() {
        let base = vec![Coordinate { longitude: -122.409, latitude: 37.781 }];

        let track = generate(&base, 0.004, &san_francisco_bound(), &FixedJitter(0.002));

        assert_eq!(track.coordinates(), &[Coordinate { longitude: -122.407, latitude: 37.783 }]);
    }

    #[test]
    fn a_large_jitter_is_clamped_to_the_viewport_edge() {
        let base = vec![Coordinate { longitude: -122.409, latitude: 37.781 }];

        let track = generate(&base, 10.0, &san_francisco_bound(), &FixedJitter(5.0));

        assert_eq!(track.coordinates(), &[Coordinate { longitude: -122.395, latitude: 37.790 }]);
    }
}
