use std::fmt;

use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Advisories: non-fatal findings produced while preparing a run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// Configured thrust direction had (near) zero length; vertical was used instead.
    DegenerateDirection { configured: Vector3<f64> },
    /// Initial mass was below dry mass; the vehicle starts with no propellant.
    PropellantClamped { initial_mass: f64, dry_mass: f64 },
    /// Vertical thrust component cannot lift the initial weight.
    InsufficientThrust {
        weight: f64,          // N
        vertical_thrust: f64, // N
        twr: f64,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::DegenerateDirection { configured } => write!(
                f,
                "thrust direction [{:.3}, {:.3}, {:.3}] is zero or near-zero, using [0, 0, 1]",
                configured.x, configured.y, configured.z
            ),
            Advisory::PropellantClamped { initial_mass, dry_mass } => write!(
                f,
                "initial mass {initial_mass:.2} kg is below dry mass {dry_mass:.2} kg, propellant set to 0"
            ),
            Advisory::InsufficientThrust { weight, vertical_thrust, twr } => write!(
                f,
                "insufficient thrust for lift-off: vertical thrust {vertical_thrust:.2} N < weight {weight:.2} N (TWR {twr:.3}, must be > 1)"
            ),
        }
    }
}

/// A computed value together with any advisories raised while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub value: T,
    pub advisories: Vec<Advisory>,
}

impl<T> Checked<T> {
    pub fn clean(value: T) -> Self {
        Self { value, advisories: Vec::new() }
    }

    pub fn with(value: T, advisory: Option<Advisory>) -> Self {
        Self { value, advisories: advisory.into_iter().collect() }
    }

    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn into_parts(self) -> (T, Vec<Advisory>) {
        (self.value, self.advisories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_none_is_clean() {
        let c = Checked::with(3.0, None);
        assert!(c.is_clean());
        assert_eq!(c.value, 3.0);
    }

    #[test]
    fn display_mentions_twr() {
        let a = Advisory::InsufficientThrust { weight: 100.0, vertical_thrust: 50.0, twr: 0.5 };
        let msg = a.to_string();
        assert!(msg.contains("0.500"));
        assert!(msg.contains("lift-off"));
    }
}
