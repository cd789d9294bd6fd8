pub mod ballistics;
pub mod gradient;
pub mod palette;
