use bytemuck::Pod;
use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::core::{try_vec, DType, Element, Shape, Tensor};
use crate::error::{ConversionError, Result};
use crate::utils::validate_2d;

// copy a 2-D array in any memory order into a row-major host tensor
pub fn array_to_tensor<S>(arr: &ArrayBase<S, Ix2>) -> Result<Tensor>
where
    S: Data,
    S::Elem: Pod,
{
    let dtype = DType::from_type::<S::Elem>()?;
    let (rows, cols) = arr.dim();
    let shape = Shape::new(vec![rows, cols]);

    if let Some(data) = arr.as_slice() {
        return Tensor::from_pod_slice(data, shape, dtype);
    }
    // fortran order or strided view
    let mut data = try_vec(arr.len())?;
    data.extend(arr.iter().copied());
    Tensor::from_pod_slice(&data, shape, dtype)
}

// read a 2-D tensor back as a standard-layout array of T
pub fn tensor_to_array<T: Element>(tensor: &Tensor) -> Result<Array2<T>> {
    let (rows, cols) = validate_2d(tensor.shape())?;
    let data = tensor.to_vec_as::<T>()?;
    Array2::from_shape_vec((rows, cols), data)
        .map_err(|e| ConversionError::shape_mismatch(tensor.shape(), e))
}
