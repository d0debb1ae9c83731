//! Conversions between [`Tensor`] and `nalgebra` matrices, `ndarray` arrays
//! and lists of 3-D points.
//!
//! ```
//! use nalgebra::{Matrix4, Vector3};
//! use tensor_convert::{operations, DType, Device};
//!
//! let pose = Matrix4::<f64>::identity();
//! let t = operations::matrix_to_tensor(&pose).unwrap();
//! assert_eq!(operations::tensor_to_matrix4d(&t).unwrap(), pose);
//!
//! let points = vec![Vector3::new(1.0, 2.0, 3.0)];
//! let t = operations::vector3d_list_to_tensor(&points, DType::F32, Device::CPU).unwrap();
//! assert_eq!(t.shape().dims(), &[1, 3]);
//! ```

pub mod core;
pub mod error;
pub mod operations;
mod utils;

#[cfg(feature = "python")]
mod python;

pub use crate::core::{DType, Device, Element, Shape, Tensor};
pub use crate::error::{ConversionError, Result};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn tensor_convert(_py: Python, m: &PyModule) -> PyResult<()> {
    python::register(m)
}
