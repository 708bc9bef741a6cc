/// Mean of the squared differences over the overlapping part of both slices.
/// Returns 0 when there is nothing to compare.
pub fn mean_square_error(lhs: &[f64], rhs: &[f64]) -> f64 {
    let item_count = std::cmp::min(lhs.len(), rhs.len());
    if item_count == 0 {
        return 0.0;
    }

    lhs.iter()
        .zip(rhs.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>() / (item_count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_square_error() {
        let v1 = &[7.0f64, 12.0f64, 25.0f64, -2.0f64];
        let v2 = &[3.0f64, 9.0f64, 24.0f64, -1.0f64];

        let actual = mean_square_error(v1, v2);
        let expected = 6.75f64;

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_mean_square_error_uneven_and_empty() {
        assert_eq!(mean_square_error(&[1.0, 2.0, 100.0], &[1.0, 4.0]), 2.0);
        assert_eq!(mean_square_error(&[], &[1.0]), 0.0);
    }
}
