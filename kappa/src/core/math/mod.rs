pub mod ad;
pub mod linalg;

pub use ad::{Derivative, Dual, Dual2};
pub use linalg::{Matrix3, Matrix4};
