use std::f64::consts::PI;

use super::FilterError;

/// The largest radius accepted by [`gaussian_weights`].
pub const MAX_RADIUS: usize = 1000;

/// The normalized distance at which the outermost weight of a kernel is sampled.
pub const MAX_X: f64 = 1.33;

/// Create the one sided weights of a gaussian blur kernel.
///
/// The weight at offset `i` is `exp(-(i * MAX_X / radius)^2 * PI)`, so the
/// center weight is `1.0` and the weight at `radius` is the same for every radius.
///
/// # Arguments
///
/// * `radius` - The largest offset covered by the kernel.
///
/// # Returns
///
/// A vector of `radius + 1` weights, indexed by offset from the center.
///
/// # Errors
///
/// Returns [`FilterError::InvalidRadius`] if `radius` exceeds [`MAX_RADIUS`].
///
/// # Example
///
/// ```
/// use blurkit_imgproc::filter::kernels::gaussian_weights;
///
/// let weights = gaussian_weights(3).unwrap();
///
/// assert_eq!(weights.len(), 4);
/// assert_eq!(weights[0], 1.0);
/// ```
pub fn gaussian_weights(radius: usize) -> Result<Vec<f64>, FilterError> {
    if radius > MAX_RADIUS {
        return Err(FilterError::InvalidRadius(radius, MAX_RADIUS));
    }

    // the sampling step below is undefined for an empty window
    if radius == 0 {
        return Ok(vec![1.0]);
    }

    let weights = (0..=radius)
        .map(|i| {
            let x = i as f64 * MAX_X / radius as f64;
            (-x * x * PI).exp()
        })
        .collect();

    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_weights_radius_zero() -> Result<(), FilterError> {
        assert_eq!(gaussian_weights(0)?, vec![1.0]);
        Ok(())
    }

    #[test]
    fn test_gaussian_weights_radius_one() -> Result<(), FilterError> {
        let weights = gaussian_weights(1)?;
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0], 1.0);
        assert_relative_eq!(weights[1], 0.0038597, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_gaussian_weights_values() -> Result<(), FilterError> {
        let weights = gaussian_weights(4)?;

        let expected = [1.0, 0.7065773, 0.2492520, 0.0438972, 0.0038597];

        for (&w, &e) in weights.iter().zip(expected.iter()) {
            assert_relative_eq!(w, e, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_weights_monotonic() -> Result<(), FilterError> {
        for radius in [1, 2, 7, 50, MAX_RADIUS] {
            let weights = gaussian_weights(radius)?;
            assert_eq!(weights.len(), radius + 1);
            assert!(weights.iter().all(|&w| w > 0.0 && w <= 1.0));
            assert!(weights.windows(2).all(|w| w[1] <= w[0]));
            assert_relative_eq!(weights[radius], (-MAX_X * MAX_X * PI).exp(), epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_weights_invalid_radius() {
        assert_eq!(
            gaussian_weights(MAX_RADIUS + 1),
            Err(FilterError::InvalidRadius(MAX_RADIUS + 1, MAX_RADIUS))
        );
    }
}
