pub fn ratio(part: usize, whole: usize) -> Option<f64> {
    match whole {
        positive if positive > 0 => Some(part as f64 / whole as f64),
        _ => None,
    }
}

/// `round(100 * part / whole)` with halves rounded up, computed in integers
pub fn rounded_percentage(part: usize, whole: usize) -> Option<u32> {
    match whole {
        positive if positive > 0 => {
            let pct = (200 * part + whole) / (2 * whole);
            Some(pct as u32)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(1, 4), Some(0.25));
        assert_eq!(ratio(3, 3), Some(1.0));
    }

    #[test]
    fn test_ratio_empty_whole() {
        assert_eq!(ratio(0, 0), None);
    }

    #[test]
    fn test_rounded_percentage_exact() {
        assert_eq!(rounded_percentage(1, 2), Some(50));
        assert_eq!(rounded_percentage(0, 5), Some(0));
        assert_eq!(rounded_percentage(10, 10), Some(100));
    }

    #[test]
    fn test_rounded_percentage_rounds() {
        assert_eq!(rounded_percentage(1, 3), Some(33));
        assert_eq!(rounded_percentage(2, 3), Some(67));
        assert_eq!(rounded_percentage(5, 6), Some(83));
    }

    #[test]
    fn test_rounded_percentage_half_rounds_up() {
        // 1/8 = 12.5%
        assert_eq!(rounded_percentage(1, 8), Some(13));
        // 7/8 = 87.5%
        assert_eq!(rounded_percentage(7, 8), Some(88));
    }

    #[test]
    fn test_rounded_percentage_empty_whole() {
        assert_eq!(rounded_percentage(0, 0), None);
    }
}
