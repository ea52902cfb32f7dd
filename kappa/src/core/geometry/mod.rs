pub mod curvature;
pub mod manifold;
pub mod space;

pub use curvature::{Curvature, CurvatureState};
pub use manifold::Manifold;
pub use space::ORIGIN;
