pub type Float = f64;
pub type Label = usize;
pub type Matrix = nalgebra::DMatrix<Float>;
pub type Vector = nalgebra::DVector<Float>;
pub type Predictions = Vec<Label>;
