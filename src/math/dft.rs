use std::f64::consts::PI;

use crate::cs::error::{Error, Result};

/// Computes the forward discrete Fourier transform of a complex signal given
/// as separate real and imaginary slices, returning the (real, imaginary)
/// spectrum.
///
/// This is the naive O(n^2) definition: output element k is the sum over t
/// of `in[t] * e^(-2*pi*i * t*k / n)`. It trades speed for being an obvious
/// transcription of the math, which makes it a useful reference against
/// faster FFTs.
pub fn dft(inreal: &[f64], inimag: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if inreal.len() != inimag.len() {
        return Err(Error::DimensionMismatch(format!(
            "real has {} samples, imaginary has {}",
            inreal.len(),
            inimag.len()
        )));
    }

    let n = inreal.len();
    let mut outreal = vec![0.0; n];
    let mut outimag = vec![0.0; n];

    for k in 0..n {
        let mut sumreal = 0.0;
        let mut sumimag = 0.0;
        for t in 0..n {
            let angle = 2.0 * PI * (t as f64) * (k as f64) / (n as f64);
            sumreal += inreal[t] * angle.cos() + inimag[t] * angle.sin();
            sumimag += -inreal[t] * angle.sin() + inimag[t] * angle.cos();
        }
        outreal[k] = sumreal;
        outimag[k] = sumimag;
    }

    Ok((outreal, outimag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dft_empty() {
        let (re, im) = dft(&[], &[]).unwrap();
        assert!(re.is_empty());
        assert!(im.is_empty());
    }

    #[test]
    fn test_dft_impulse_is_flat() {
        // A unit impulse transforms to an all-ones spectrum.
        let inreal = [1.0, 0.0, 0.0, 0.0];
        let inimag = [0.0; 4];
        let (re, im) = dft(&inreal, &inimag).unwrap();
        for k in 0..4 {
            assert_relative_eq!(re[k], 1.0, epsilon = 1e-12);
            assert_relative_eq!(im[k], 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_dft_constant_is_impulse() {
        // A constant signal concentrates all energy in bin 0.
        let inreal = [1.0; 8];
        let inimag = [0.0; 8];
        let (re, im) = dft(&inreal, &inimag).unwrap();
        assert_relative_eq!(re[0], 8.0, epsilon = 1e-9);
        for k in 1..8 {
            assert_relative_eq!(re[k], 0.0, epsilon = 1e-9);
        }
        for k in 0..8 {
            assert_relative_eq!(im[k], 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_dft_two_point() {
        // DFT of [a, b] is [a + b, a - b].
        let (re, im) = dft(&[3.0, 5.0], &[0.0, 0.0]).unwrap();
        assert_relative_eq!(re[0], 8.0, epsilon = 1e-12);
        assert_relative_eq!(re[1], -2.0, epsilon = 1e-12);
        assert_relative_eq!(im[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(im[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dft_single_tone() {
        // cos(2*pi*t/4) over 4 samples puts half the energy in bins 1 and 3.
        let inreal = [1.0, 0.0, -1.0, 0.0];
        let inimag = [0.0; 4];
        let (re, im) = dft(&inreal, &inimag).unwrap();
        assert_relative_eq!(re[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(re[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(re[2], 0.0, epsilon = 1e-9);
        assert_relative_eq!(re[3], 2.0, epsilon = 1e-9);
        for k in 0..4 {
            assert_relative_eq!(im[k], 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_dft_length_mismatch() {
        let err = dft(&[1.0, 2.0], &[0.0]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch(_)));
    }
}
