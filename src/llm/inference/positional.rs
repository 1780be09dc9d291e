use crate::llm::tensor::Matrix;

/// Base of the geometric progression of wavelengths
const WAVELENGTH_BASE: f32 = 10000.0;

/// Generates the fixed sinusoidal positional encoding table.
///
/// Even dimension `i` holds `sin(p / 10000^(2k/dim))` and odd dimension `i`
/// holds `cos(p / 10000^(2k/dim))`, where `k = i / 2`, so each (sin, cos)
/// pair shares one frequency.
///
/// # Arguments
/// * `seq_len` - Number of positions (rows)
/// * `dim` - Embedding dimension (columns)
pub fn sinusoidal_encoding(seq_len: usize, dim: usize) -> Matrix {
    let mut enc = Matrix::zeros(seq_len, dim);
    if dim == 0 {
        return enc;
    }
    for (idx, value) in enc.data_mut().iter_mut().enumerate() {
        let (pos, i) = (idx / dim, idx % dim);
        let exponent = (2 * (i / 2)) as f32 / dim as f32;
        let angle = pos as f32 / WAVELENGTH_BASE.powf(exponent);
        *value = if i % 2 == 0 { angle.sin() } else { angle.cos() };
    }
    enc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_position_alternates_zero_one() {
        let pe = sinusoidal_encoding(4, 8);
        assert_eq!(pe.row(0).unwrap(), &[0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_lowest_pair_uses_unit_frequency() {
        let pe = sinusoidal_encoding(10, 6);
        for p in 0..10 {
            let row = pe.row(p).unwrap();
            assert!((row[0] - (p as f32).sin()).abs() < 1e-6);
            assert!((row[1] - (p as f32).cos()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_second_pair_frequency_at_position_one() {
        // 10000^(2/8) = 10, so dimensions 2 and 3 advance by 0.1 per position
        let pe = sinusoidal_encoding(2, 8);
        assert!((pe.get(1, 2).unwrap() - 0.1f32.sin()).abs() < 1e-6);
        assert!((pe.get(1, 3).unwrap() - 0.1f32.cos()).abs() < 1e-6);
        // 10000^(6/8) = 1000 for the last pair
        assert!((pe.get(1, 6).unwrap() - 0.001f32.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_pairs_share_frequency() {
        let pe = sinusoidal_encoding(32, 16);
        // sin^2 + cos^2 = 1 for each pair
        for row in pe.iter_rows() {
            for pair in row.chunks(2) {
                assert!((pair[0] * pair[0] + pair[1] * pair[1] - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_values_are_bounded() {
        let pe = sinusoidal_encoding(200, 12);
        assert_eq!(pe.shape(), (200, 12));
        assert!(pe.data().iter().all(|v| (-1.0..=1.0).contains(v)));
    }
}
