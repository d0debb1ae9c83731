mod validation;

pub use validation::validate_2d;
pub use validation::validate_matrix_shape;
pub use validation::validate_points_shape;
