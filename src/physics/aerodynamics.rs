use nalgebra::Vector3;

/// Below this speed the velocity direction is undefined and drag is zero.
pub const REST_SPEED: f64 = 1e-6;

/// Quadratic drag force opposing velocity (inertial frame).
///
/// F = 0.5 * rho * v^2 * Cd * A
pub fn drag_force(vel: &Vector3<f64>, density: f64, cd: f64, area: f64) -> Vector3<f64> {
    let speed = vel.norm();
    if speed > REST_SPEED {
        let q_dyn = 0.5 * density * speed * speed;
        let drag_mag = q_dyn * cd * area;
        -(*vel / speed) * drag_mag
    } else {
        Vector3::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn drag_opposes_velocity() {
        let vel = Vector3::new(0.0, 0.0, 300.0);
        let f = drag_force(&vel, 1.225, 0.3, 0.01);
        assert!(f.z < 0.0, "Drag should oppose upward velocity");
        assert_eq!(f.x, 0.0);
    }

    #[test]
    fn drag_magnitude_is_quadratic() {
        let vel = Vector3::new(30.0, 40.0, 0.0); // |v| = 50
        let f = drag_force(&vel, 1.0, 0.5, 2.0);
        assert_relative_eq!(f.norm(), 0.5 * 1.0 * 2500.0 * 0.5 * 2.0, epsilon = 1e-9);
        assert_relative_eq!(f.normalize(), -vel.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn no_drag_at_rest() {
        let f = drag_force(&Vector3::zeros(), 1.225, 0.3, 0.01);
        assert_eq!(f, Vector3::zeros());
    }

    #[test]
    fn no_drag_below_rest_threshold() {
        let vel = Vector3::new(0.0, 0.0, 1e-7);
        assert_eq!(drag_force(&vel, 1.225, 0.3, 0.01), Vector3::zeros());
    }

    #[test]
    fn zero_cd_means_zero_drag() {
        let vel = Vector3::new(0.0, 0.0, -250.0);
        assert_eq!(drag_force(&vel, 1.225, 0.0, 0.01).norm(), 0.0);
    }
}
