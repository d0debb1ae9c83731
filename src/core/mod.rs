pub mod device;
pub mod dtype;
pub mod element;
pub mod shape;
pub mod tensor;

pub use device::Device;
pub use dtype::DType;
pub use element::{Element, Value};
pub use shape::{Shape, Stride};
pub use tensor::{Storage, Tensor};
pub(crate) use tensor::try_vec;
