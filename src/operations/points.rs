//! Conversions between `(N, 3)` tensors and lists of 3-D vectors.

use nalgebra::{Scalar, Vector3};

use crate::core::{try_vec, DType, Device, Element, Shape, Tensor};
use crate::error::Result;
use crate::utils::validate_points_shape;

/// Read an `(N, 3)` tensor as `N` vectors of `T`. Row `i` becomes element `i`.
pub fn tensor_to_vector3_list<T>(tensor: &Tensor) -> Result<Vec<Vector3<T>>>
where
    T: Element + Scalar,
{
    let n = validate_points_shape(tensor.shape())?;
    let data = tensor.to_vec_as::<T>()?;
    log::debug!("tensor {} {} -> {} points", tensor.shape(), tensor.dtype(), n);
    Ok(data
        .chunks_exact(3)
        .map(|p| Vector3::new(p[0], p[1], p[2]))
        .collect())
}

/// `(N, 3)` tensor of any dtype to `f64` points.
pub fn tensor_to_vector3d_list(tensor: &Tensor) -> Result<Vec<Vector3<f64>>> {
    tensor_to_vector3_list(tensor)
}

/// `(N, 3)` tensor of any dtype to `i32` points.
///
/// Values are read as `f64` and then narrowed, so fractional inputs truncate
/// toward zero and out-of-range inputs saturate at the `i32` bounds. `i64`
/// values beyond 2^53 lose precision on the way through.
pub fn tensor_to_vector3i_list(tensor: &Tensor) -> Result<Vec<Vector3<i32>>> {
    Ok(tensor_to_vector3d_list(tensor)?
        .into_iter()
        .map(|p| p.map(|v| v as i32))
        .collect())
}

fn vector3_list_to_tensor<T>(values: &[Vector3<T>], dtype: DType, device: Device) -> Result<Tensor>
where
    T: Element + Scalar,
{
    let mut flat = try_vec(values.len().saturating_mul(3))?;
    flat.extend(values.iter().flat_map(|p| [p.x, p.y, p.z]));
    let tensor = Tensor::from_slice(&flat, Shape::new(vec![values.len(), 3]))?;

    log::debug!("{} points -> tensor {} on {}", values.len(), dtype, device);
    tensor.to_dtype(dtype)?.to_device(device)
}

/// Pack `f64` points into an `(N, 3)` tensor of `dtype` on `device`.
pub fn vector3d_list_to_tensor(
    values: &[Vector3<f64>],
    dtype: DType,
    device: Device,
) -> Result<Tensor> {
    vector3_list_to_tensor(values, dtype, device)
}

/// Pack `i32` points into an `(N, 3)` tensor of `dtype` on `device`.
pub fn vector3i_list_to_tensor(
    values: &[Vector3<i32>],
    dtype: DType,
    device: Device,
) -> Result<Tensor> {
    vector3_list_to_tensor(values, dtype, device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;

    fn points() -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(0.0, 1.0, 2.0),
            Vector3::new(-3.5, 4.25, 5.0),
            Vector3::new(6.0, -7.75, 8.5),
        ]
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        let t = vector3d_list_to_tensor(&points(), DType::F64, Device::CPU).unwrap();
        assert_eq!(t.shape().dims(), &[3, 3]);
        assert_eq!(t.dtype(), DType::F64);
        assert_eq!(t.get_as::<f64>(&[1, 0]).unwrap(), -3.5);

        assert_eq!(tensor_to_vector3d_list(&t).unwrap(), points());
    }

    #[test]
    fn test_dtype_cast_on_pack() {
        let t = vector3d_list_to_tensor(&points(), DType::F32, Device::CPU).unwrap();
        assert_eq!(t.dtype(), DType::F32);
        // all values are exact in f32
        assert_eq!(tensor_to_vector3d_list(&t).unwrap(), points());

        let i = vector3d_list_to_tensor(&points(), DType::I64, Device::CPU).unwrap();
        assert_eq!(i.get_as::<i64>(&[2, 1]).unwrap(), -7);
    }

    #[test]
    fn test_integer_path_truncates_through_f64() {
        let t = Tensor::from_slice(
            &[1.9f64, -1.9, 2.5, 0.999, -0.5, 1e10],
            Shape::from([2, 3]),
        )
        .unwrap();
        let pts = tensor_to_vector3i_list(&t).unwrap();
        assert_eq!(
            pts,
            vec![Vector3::new(1, -1, 2), Vector3::new(0, 0, i32::MAX)]
        );
    }

    #[test]
    fn test_vector3i_roundtrip() {
        let pts = vec![Vector3::new(1, 2, 3), Vector3::new(-4, 5, -6)];
        let t = vector3i_list_to_tensor(&pts, DType::I32, Device::CPU).unwrap();
        assert_eq!(t.dtype(), DType::I32);
        assert_eq!(tensor_to_vector3i_list(&t).unwrap(), pts);

        let f = vector3i_list_to_tensor(&pts, DType::F64, Device::CPU).unwrap();
        assert_eq!(
            tensor_to_vector3d_list(&f).unwrap()[1],
            Vector3::new(-4.0, 5.0, -6.0)
        );
    }

    #[test]
    fn test_empty_list() {
        let t = vector3d_list_to_tensor(&[], DType::F32, Device::CPU).unwrap();
        assert_eq!(t.shape().dims(), &[0, 3]);
        assert!(tensor_to_vector3d_list(&t).unwrap().is_empty());
        assert!(tensor_to_vector3i_list(&t).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_point_shapes() {
        let t = Tensor::from_slice(&[0.0f64; 6], Shape::from([3, 2])).unwrap();
        assert!(matches!(
            tensor_to_vector3d_list(&t),
            Err(ConversionError::ShapeMismatch { .. })
        ));
        let flat = Tensor::from_slice(&[0i32; 3], Shape::from([3])).unwrap();
        assert!(tensor_to_vector3i_list(&flat).is_err());
    }

    #[test]
    fn test_device_placement() {
        let t = vector3d_list_to_tensor(&points(), DType::F32, Device::CUDA(0)).unwrap();
        assert_eq!(t.device(), Device::CUDA(0));
        assert_eq!(t.dtype(), DType::F32);
        assert_eq!(tensor_to_vector3d_list(&t).unwrap(), points());
    }

    #[test]
    fn test_generic_list_reads_directly() {
        let t = Tensor::from_slice(&[i64::MAX, 0, -1], Shape::from([1, 3])).unwrap();
        let pts = tensor_to_vector3_list::<i64>(&t).unwrap();
        assert_eq!(pts[0], Vector3::new(i64::MAX, 0, -1));
    }
}
