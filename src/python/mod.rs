pub mod tensor;

use pyo3::prelude::*;

pub fn register(m: &PyModule) -> PyResult<()> {
    tensor::register(m)
}
