use bytemuck::Pod;
use ndarray::Array2;
use numpy::{PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;

use crate::core::{DType, Device, Shape, Tensor as CoreTensor};
use crate::error::{ConversionError, Result};
use crate::operations;

#[pyclass]
#[derive(Clone)]
pub struct Tensor {
    inner: CoreTensor,
}

fn parse_device(device: Option<&str>) -> Result<Device> {
    device.map_or(Ok(Device::CPU), str::parse)
}

fn readonly_to_tensor<T: numpy::Element + Pod>(arr: PyReadonlyArray2<T>) -> Result<CoreTensor> {
    operations::array_to_tensor(&arr.as_array())
}

fn to_pyarray<'py, T: crate::core::Element + numpy::Element>(
    py: Python<'py>,
    tensor: &CoreTensor,
) -> PyResult<&'py PyAny> {
    let arr = operations::tensor_to_array::<T>(tensor)?;
    Ok(PyArray2::from_owned_array(py, arr).into())
}

#[pymethods]
impl Tensor {
    #[new]
    #[pyo3(signature = (shape, dtype, device=None))]
    fn new(shape: Vec<usize>, dtype: &str, device: Option<&str>) -> PyResult<Self> {
        let dtype: DType = dtype.parse()?;
        let device = parse_device(device)?;

        Ok(Self {
            inner: CoreTensor::zeros(Shape::new(shape), dtype, device)?,
        })
    }

    #[staticmethod]
    fn from_array(arr: &PyAny) -> PyResult<Self> {
        let inner = if let Ok(a) = arr.extract::<PyReadonlyArray2<f64>>() {
            readonly_to_tensor(a)?
        } else if let Ok(a) = arr.extract::<PyReadonlyArray2<f32>>() {
            readonly_to_tensor(a)?
        } else if let Ok(a) = arr.extract::<PyReadonlyArray2<i64>>() {
            readonly_to_tensor(a)?
        } else if let Ok(a) = arr.extract::<PyReadonlyArray2<i32>>() {
            readonly_to_tensor(a)?
        } else if let Ok(a) = arr.extract::<PyReadonlyArray2<u8>>() {
            readonly_to_tensor(a)?
        } else {
            return Err(ConversionError::UnsupportedType(arr.get_type().name()?.to_string()).into());
        };
        Ok(Self { inner })
    }

    #[pyo3(signature = (dtype, device=None))]
    fn to(&self, dtype: &str, device: Option<&str>) -> PyResult<Self> {
        let dtype: DType = dtype.parse()?;
        let device = parse_device(device)?;
        Ok(Self {
            inner: self.inner.to_dtype(dtype)?.to_device(device)?,
        })
    }

    fn shape(&self) -> Vec<usize> {
        self.inner.shape().dims().to_vec()
    }

    fn dtype(&self) -> &str {
        self.inner.dtype().name()
    }

    fn device(&self) -> String {
        self.inner.device().to_string()
    }

    fn numel(&self) -> usize {
        self.inner.numel()
    }

    fn __repr__(&self) -> String {
        format!(
            "Tensor(shape={:?}, dtype={}, device={})",
            self.inner.shape().dims(),
            self.inner.dtype(),
            self.inner.device()
        )
    }

    fn __len__(&self) -> usize {
        self.inner.shape().dims().first().copied().unwrap_or(0)
    }

    /// 2-D tensors only. f16 data comes back as float32.
    fn numpy<'py>(&self, py: Python<'py>) -> PyResult<&'py PyAny> {
        match self.inner.dtype() {
            DType::F64 => to_pyarray::<f64>(py, &self.inner),
            DType::F32 | DType::F16 => to_pyarray::<f32>(py, &self.inner),
            DType::I64 => to_pyarray::<i64>(py, &self.inner),
            DType::I32 => to_pyarray::<i32>(py, &self.inner),
            DType::U8 => to_pyarray::<u8>(py, &self.inner),
        }
    }
}

#[pyfunction]
pub fn tensor_to_matrix4d<'py>(py: Python<'py>, tensor: PyRef<'_, Tensor>) -> PyResult<&'py PyArray2<f64>> {
    let m = operations::tensor_to_matrix4d(&tensor.inner)?;
    let arr = Array2::from_shape_fn((4, 4), |(i, j)| m[(i, j)]);
    Ok(PyArray2::from_owned_array(py, arr))
}

#[pyfunction]
#[pyo3(signature = (values, dtype="f64", device=None))]
pub fn vector3d_list_to_tensor(values: Vec<[f64; 3]>, dtype: &str, device: Option<&str>) -> PyResult<Tensor> {
    let points: Vec<nalgebra::Vector3<f64>> = values.into_iter().map(nalgebra::Vector3::from).collect();
    let inner = operations::vector3d_list_to_tensor(&points, dtype.parse()?, parse_device(device)?)?;
    Ok(Tensor { inner })
}

#[pyfunction]
pub fn tensor_to_vector3d_list(tensor: PyRef<'_, Tensor>) -> PyResult<Vec<[f64; 3]>> {
    let points = operations::tensor_to_vector3d_list(&tensor.inner)?;
    Ok(points.into_iter().map(|p| [p.x, p.y, p.z]).collect())
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_class::<Tensor>()?;
    m.add_function(wrap_pyfunction!(tensor_to_matrix4d, m)?)?;
    m.add_function(wrap_pyfunction!(vector3d_list_to_tensor, m)?)?;
    m.add_function(wrap_pyfunction!(tensor_to_vector3d_list, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;
    use ndarray::array;
    use numpy::IntoPyArray;
    use pyo3::exceptions::{PyIndexError, PyMemoryError, PyTypeError, PyValueError};

    #[test]
    fn test_error_maps_to_python_exception() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let err: PyErr = ConversionError::shape_mismatch("(4, 4)", "(3, 3)").into();
            assert!(err.is_instance_of::<PyValueError>(py));

            let err: PyErr = ConversionError::InvalidDevice("TPU".into()).into();
            assert!(err.is_instance_of::<PyValueError>(py));

            let err: PyErr = ConversionError::UnsupportedType("u16".into()).into();
            assert!(err.is_instance_of::<PyTypeError>(py));

            let err: PyErr = ConversionError::Allocation { bytes: usize::MAX }.into();
            assert!(err.is_instance_of::<PyMemoryError>(py));

            let err: PyErr = ConversionError::IndexOutOfBounds {
                index: vec![4, 0],
                shape: "(4, 4)".into(),
            }
            .into();
            assert!(err.is_instance_of::<PyIndexError>(py));
        });
    }

    #[test]
    fn test_numpy_widens_f16_to_f32() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let inner = CoreTensor::from_slice(
                &[f16::from_f32(0.5), f16::from_f32(1.5)],
                Shape::from([1, 2]),
            )
            .unwrap();
            let t = Tensor { inner };

            let obj = t.numpy(py).unwrap();
            let arr: &PyArray2<f32> = obj.downcast().unwrap();
            let ro = arr.readonly();
            assert_eq!(ro.as_array(), array![[0.5f32, 1.5]]);
        });
    }

    #[test]
    fn test_numpy_keeps_native_dtype() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let inner = CoreTensor::from_slice(&[1i64, -2, 3, -4], Shape::from([2, 2])).unwrap();
            let obj = Tensor { inner }.numpy(py).unwrap();
            assert!(obj.downcast::<PyArray2<i64>>().is_ok());
            assert!(obj.downcast::<PyArray2<f64>>().is_err());
        });
    }

    #[test]
    fn test_from_array_dispatch() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let a = array![[1i32, 2, 3], [4, 5, 6]].into_pyarray(py);
            let t = Tensor::from_array(a.as_ref()).unwrap();
            assert_eq!(t.dtype(), "i32");
            assert_eq!(t.shape(), vec![2, 3]);

            let u = ndarray::Array2::<u16>::zeros((2, 2)).into_pyarray(py);
            let err = Tensor::from_array(u.as_ref()).unwrap_err();
            assert!(err.is_instance_of::<PyTypeError>(py));
        });
    }

    #[test]
    fn test_bad_device_is_value_error() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let err = Tensor::new(vec![2, 2], "f32", Some("tpu")).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));

            let t = Tensor::new(vec![2, 2], "f32", Some("cuda:1")).unwrap();
            assert_eq!(t.device(), "CUDA:1");
        });
    }
}
