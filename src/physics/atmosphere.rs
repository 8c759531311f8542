// ---------------------------------------------------------------------------
// Exponential atmosphere (single scale height)
// ---------------------------------------------------------------------------

/// Air density at `altitude` for an isothermal exponential atmosphere.
///
/// rho(h) = rho0 * exp(-h / H)
///
/// Below sea level the density is held at `sea_level_density` rather than
/// extrapolated. `scale_height` must be positive; callers validate it once
/// through `SimConfig::validate`.
pub fn density(altitude: f64, sea_level_density: f64, scale_height: f64) -> f64 {
    if altitude < 0.0 {
        return sea_level_density;
    }
    sea_level_density * (-altitude / scale_height).exp()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
