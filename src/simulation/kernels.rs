//! SPH smoothing kernels.
//!
//! All kernels take precomputed coefficients from [`SphParameters`] so the
//! O(n²) passes do not redo `powi(9)` per pair.
//!
//! [`SphParameters`]: super::params::SphParameters

/// Poly6 kernel `k (h² - r²)³` for `r < h`, else 0.
/// Takes the squared distance.
#[inline]
pub fn poly6(r2: f64, h: f64, coeff: f64) -> f64 {
    let h2 = h * h;
    if r2 >= h2 {
        return 0.0;
    }
    let diff = h2 - r2;
    coeff * diff * diff * diff
}

/// Scalar part of the Spiky gradient, `coeff (h - r)²`.
/// Direction is applied by the caller.
#[inline]
pub fn spiky_gradient(r: f64, h: f64, coeff: f64) -> f64 {
    if r >= h {
        return 0.0;
    }
    let diff = h - r;
    coeff * diff * diff
}

/// Laplacian of the viscosity kernel, `coeff (h - r)`
#[inline]
pub fn viscosity_laplacian(r: f64, h: f64, coeff: f64) -> f64 {
    if r >= h {
        return 0.0;
    }
    coeff * (h - r)
}
