pub mod array;
pub mod matrix;
pub mod points;

pub use array::{array_to_tensor, tensor_to_array};
pub use matrix::{
    matrix_to_tensor, tensor_to_matrix, tensor_to_matrix4d, tensor_to_matrix4f,
    tensor_to_matrix4i, tensor_to_matrix6d, tensor_to_matrix6f, tensor_to_matrix6i,
    tensor_to_smatrix,
};
pub use points::{
    tensor_to_vector3_list, tensor_to_vector3d_list, tensor_to_vector3i_list,
    vector3d_list_to_tensor, vector3i_list_to_tensor,
};
