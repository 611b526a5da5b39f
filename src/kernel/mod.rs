//! Kernel functions

pub mod custom;
pub mod gaussian;
pub mod laplacian;
pub mod linear;
pub mod polynomial;
pub mod spec;
pub mod traits;

pub use self::custom::*;
pub use self::gaussian::*;
pub use self::laplacian::*;
pub use self::linear::*;
pub use self::polynomial::*;
pub use self::spec::*;
pub use self::traits::*;
