//! CAD Kernel Abstraction
//!
//! Geometry kernels turn closed profiles into solids. The extrusion command
//! only talks to the [`CadKernel`] trait; with the `truck` feature enabled
//! the default backend is a B-Rep kernel built on the Truck library.

mod traits;
#[cfg(feature = "truck")]
mod truck;
#[cfg(feature = "truck")]
mod validate;

pub use traits::{CadError, CadKernel, CadResult, NullKernel, Solid, SolidFace, default_kernel};
#[cfg(feature = "truck")]
pub use truck::TruckKernel;
