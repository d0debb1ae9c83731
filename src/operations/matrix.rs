//! Conversions between tensors and `nalgebra` matrices.
//!
//! Tensors are always read and written in row-major order, whatever the
//! storage of the matrix on the other side.

use bytemuck::Pod;
use nalgebra::{DMatrix, Dim, Matrix, Matrix4, Matrix6, RawStorage, SMatrix, Scalar};

use crate::core::{try_vec, DType, Element, Shape, Tensor};
use crate::error::Result;
use crate::utils::{validate_2d, validate_matrix_shape};

/// Copy a matrix of any size and storage into a new `(rows, cols)` host tensor.
///
/// The matrix is first materialized in row-major order, so strided views and
/// column-major storage both produce the same tensor. Fails with
/// `UnsupportedType` when `T` has no [`DType`].
pub fn matrix_to_tensor<T, R, C, S>(matrix: &Matrix<T, R, C, S>) -> Result<Tensor>
where
    T: Scalar + Pod,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    let dtype = DType::from_type::<T>()?;
    let (rows, cols) = matrix.shape();

    let mut row_major = try_vec(rows * cols)?;
    for i in 0..rows {
        for j in 0..cols {
            row_major.push(matrix[(i, j)]);
        }
    }

    log::debug!("matrix ({}, {}) {} -> tensor", rows, cols, dtype);
    Tensor::from_pod_slice(&row_major, Shape::new(vec![rows, cols]), dtype)
}

/// Read an `(R, C)` tensor into a statically sized matrix, casting every
/// element to `T`.
pub fn tensor_to_smatrix<T, const R: usize, const C: usize>(
    tensor: &Tensor,
) -> Result<SMatrix<T, R, C>>
where
    T: Element + Scalar,
{
    validate_matrix_shape(tensor.shape(), R, C)?;
    let data = tensor.to_vec_as::<T>()?;
    Ok(SMatrix::<T, R, C>::from_row_slice(&data))
}

/// Read any 2-D tensor into a dynamically sized matrix, casting every
/// element to `T`.
pub fn tensor_to_matrix<T>(tensor: &Tensor) -> Result<DMatrix<T>>
where
    T: Element + Scalar,
{
    let (rows, cols) = validate_2d(tensor.shape())?;
    let data = tensor.to_vec_as::<T>()?;
    log::debug!("tensor {} {} -> matrix ({}, {})", tensor.shape(), tensor.dtype(), rows, cols);
    Ok(DMatrix::from_row_slice(rows, cols, &data))
}

pub fn tensor_to_matrix4d(tensor: &Tensor) -> Result<Matrix4<f64>> {
    tensor_to_smatrix(tensor)
}

pub fn tensor_to_matrix4f(tensor: &Tensor) -> Result<Matrix4<f32>> {
    tensor_to_smatrix(tensor)
}

pub fn tensor_to_matrix4i(tensor: &Tensor) -> Result<Matrix4<i32>> {
    tensor_to_smatrix(tensor)
}

pub fn tensor_to_matrix6d(tensor: &Tensor) -> Result<Matrix6<f64>> {
    tensor_to_smatrix(tensor)
}

pub fn tensor_to_matrix6f(tensor: &Tensor) -> Result<Matrix6<f32>> {
    tensor_to_smatrix(tensor)
}

pub fn tensor_to_matrix6i(tensor: &Tensor) -> Result<Matrix6<i32>> {
    tensor_to_smatrix(tensor)
}
