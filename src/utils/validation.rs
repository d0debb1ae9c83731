use crate::core::Shape;
use crate::error::{ConversionError, Result};

/// Require `shape` to be exactly `(rows, cols)`.
pub fn validate_matrix_shape(shape: &Shape, rows: usize, cols: usize) -> Result<()> {
    if shape.dims() != [rows, cols] {
        return Err(ConversionError::shape_mismatch(
            format!("({}, {})", rows, cols),
            shape,
        ));
    }
    Ok(())
}

// any rank-2 shape, returned as (rows, cols)
pub fn validate_2d(shape: &Shape) -> Result<(usize, usize)> {
    shape
        .as_2d()
        .ok_or_else(|| ConversionError::shape_mismatch("(rows, cols)", shape))
}

// point lists are (N, 3) for any N, including 0
pub fn validate_points_shape(shape: &Shape) -> Result<usize> {
    match shape.as_2d() {
        Some((n, 3)) => Ok(n),
        _ => Err(ConversionError::shape_mismatch("(N, 3)", shape)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_shape() {
        assert!(validate_matrix_shape(&Shape::from([4, 4]), 4, 4).is_ok());
        let err = validate_matrix_shape(&Shape::from([3, 3]), 4, 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "shape mismatch: expected (4, 4), got (3, 3)"
        );
    }

    #[test]
    fn test_points_shape() {
        assert_eq!(validate_points_shape(&Shape::from([0, 3])).unwrap(), 0);
        assert_eq!(validate_points_shape(&Shape::from([7, 3])).unwrap(), 7);
        assert!(validate_points_shape(&Shape::from([3, 7])).is_err());
        assert!(validate_points_shape(&Shape::from([3])).is_err());
        assert!(validate_points_shape(&Shape::from([2, 3, 1])).is_err());
    }

    #[test]
    fn test_2d() {
        assert_eq!(validate_2d(&Shape::from([2, 5])).unwrap(), (2, 5));
        assert!(validate_2d(&Shape::from([10])).is_err());
    }
}
