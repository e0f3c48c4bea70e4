//! The host modelling application, seen from the curve builder.
//!
//! The builder needs only two capabilities from the host: create a named
//! container and fit a spline through an ordered point list inside it.
//! [`SketchHost`] captures those, and [`SketchStore`] is an in-memory host.

mod store;

pub use store::{ComponentData, ComponentId, SketchData, SketchId, SketchStore, SplineData, SplineId};

use crate::error::HostError;
use crate::math::Point3;

/// Capabilities the host application exposes to the curve builder.
pub trait SketchHost {
    /// Handle to a created component.
    type Component: Copy;
    /// Handle to a fitted spline.
    type Spline: Copy;

    /// Creates a new, empty component named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::ComponentCreation`] if the host refuses.
    fn create_component(&mut self, name: &str) -> Result<Self::Component, HostError>;

    /// Adds a sketch named `sketch_name` to `component` and fits a spline
    /// through `points`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::SplineFit`] if the points cannot be fitted, or
    /// [`HostError::ComponentNotFound`] for a stale handle.
    fn add_fitted_spline(
        &mut self,
        component: Self::Component,
        sketch_name: &str,
        points: &[Point3],
    ) -> Result<Self::Spline, HostError>;

    /// Removes `component` and everything inside it.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::ComponentNotFound`] for a stale handle.
    fn remove_component(&mut self, component: Self::Component) -> Result<(), HostError>;
}
