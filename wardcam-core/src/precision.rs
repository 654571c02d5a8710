/// Base relative-move step before precision scaling, shared by all axes.
pub const BASE_STEP: f32 = 0.1;

const FACTORS: [u8; 5] = [1, 2, 4, 8, 16];

/// Power-of-two multiplier shrinking the step size of relative moves.
/// Session-local; never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precision(usize);

impl Precision {
    pub fn factor(self) -> u8 {
        FACTORS[self.0]
    }

    /// Advance to the next factor, wrapping after 16 back to 1.
    pub fn cycle(self) -> Self {
        Self((self.0 + 1) % FACTORS.len())
    }

    pub fn step(self) -> f32 {
        BASE_STEP / f32::from(self.factor())
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(0)
    }
}

#[cfg(test)]
mod tests {
    mod success {
        use crate::precision::{Precision, BASE_STEP};

        #[test]
        fn cycles_through_powers_of_two() {
            let mut precision = Precision::default();
            let mut seen = Vec::new();
            for _ in 0..6 {
                seen.push(precision.factor());
                precision = precision.cycle();
            }
            assert_eq!(seen, vec![1, 2, 4, 8, 16, 1]);
        }

        #[test]
        fn step_shrinks_with_factor() {
            let precision = Precision::default().cycle().cycle();
            assert_eq!(precision.factor(), 4);
            assert!((precision.step() - BASE_STEP / 4.0).abs() < f32::EPSILON);
        }
    }
}
