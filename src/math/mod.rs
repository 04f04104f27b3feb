pub mod vector;
pub mod polar;
pub mod quaternion;
pub mod field;
