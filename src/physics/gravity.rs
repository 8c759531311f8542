use nalgebra::Vector3;

/// Uniform gravity force (ENU, Z up). No falloff with altitude.
pub fn gravity_force(mass: f64, g0: f64) -> Vector3<f64> {
    Vector3::new(0.0, 0.0, -mass * g0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::G0;

    #[test]
    fn points_straight_down() {
        let f = gravity_force(10.0, G0);
        assert_eq!(f.x, 0.0);
        assert_eq!(f.y, 0.0);
        assert!((f.z + 10.0 * G0).abs() < 1e-12);
    }

    #[test]
    fn scales_with_mass() {
        let f1 = gravity_force(1.0, G0);
        let f2 = gravity_force(2.0, G0);
        assert!((f2.z - 2.0 * f1.z).abs() < 1e-12);
    }
}
