use slotmap::SlotMap;

use crate::error::HostError;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::SketchHost;

slotmap::new_key_type! {
    /// Unique identifier for a component in the sketch store.
    pub struct ComponentId;
    /// Unique identifier for a sketch in the sketch store.
    pub struct SketchId;
    /// Unique identifier for a fitted spline in the sketch store.
    pub struct SplineId;
}

/// A named container of sketches.
#[derive(Debug, Clone)]
pub struct ComponentData {
    pub name: String,
    pub sketches: Vec<SketchId>,
}

/// A planar sketch owned by a component.
#[derive(Debug, Clone)]
pub struct SketchData {
    pub name: String,
    pub component: ComponentId,
    /// Normal of the sketch plane. Sketches are placed on the XY plane.
    pub normal: Vector3,
    pub splines: Vec<SplineId>,
}

/// A spline fitted through an ordered list of points.
#[derive(Debug, Clone)]
pub struct SplineData {
    pub sketch: SketchId,
    pub fit_points: Vec<Point3>,
}

/// In-memory [`SketchHost`].
///
/// Entities reference each other via typed IDs (generational indices), so a
/// removed component leaves no dangling sketches or splines behind.
#[derive(Debug, Default)]
pub struct SketchStore {
    components: SlotMap<ComponentId, ComponentData>,
    sketches: SlotMap<SketchId, SketchData>,
    splines: SlotMap<SplineId, SplineData>,
}

impl SketchStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the component data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the component is not in the store.
    pub fn component(&self, id: ComponentId) -> Result<&ComponentData, HostError> {
        self.components.get(id).ok_or(HostError::ComponentNotFound)
    }

    /// Returns the sketch data, if present.
    #[must_use]
    pub fn sketch(&self, id: SketchId) -> Option<&SketchData> {
        self.sketches.get(id)
    }

    /// Returns the spline data, if present.
    #[must_use]
    pub fn spline(&self, id: SplineId) -> Option<&SplineData> {
        self.splines.get(id)
    }

    /// Number of components in the store.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of splines in the store.
    #[must_use]
    pub fn spline_count(&self) -> usize {
        self.splines.len()
    }
}

impl SketchHost for SketchStore {
    type Component = ComponentId;
    type Spline = SplineId;

    fn create_component(&mut self, name: &str) -> Result<ComponentId, HostError> {
        if name.trim().is_empty() {
            return Err(HostError::ComponentCreation(
                "component name must not be empty".into(),
            ));
        }
        Ok(self.components.insert(ComponentData {
            name: name.to_owned(),
            sketches: Vec::new(),
        }))
    }

    fn add_fitted_spline(
        &mut self,
        component: ComponentId,
        sketch_name: &str,
        points: &[Point3],
    ) -> Result<SplineId, HostError> {
        if !self.components.contains_key(component) {
            return Err(HostError::ComponentNotFound);
        }
        validate_fit_points(points)?;

        let sketch = self.sketches.insert(SketchData {
            name: sketch_name.to_owned(),
            component,
            normal: Vector3::z(),
            splines: Vec::new(),
        });
        let spline = self.splines.insert(SplineData {
            sketch,
            fit_points: points.to_vec(),
        });
        if let Some(data) = self.sketches.get_mut(sketch) {
            data.splines.push(spline);
        }
        if let Some(data) = self.components.get_mut(component) {
            data.sketches.push(sketch);
        }
        Ok(spline)
    }

    fn remove_component(&mut self, component: ComponentId) -> Result<(), HostError> {
        let data = self
            .components
            .remove(component)
            .ok_or(HostError::ComponentNotFound)?;
        for sketch_id in data.sketches {
            if let Some(sketch) = self.sketches.remove(sketch_id) {
                for spline_id in sketch.splines {
                    self.splines.remove(spline_id);
                }
            }
        }
        Ok(())
    }
}

/// A fitted spline needs at least two points that are not all coincident.
fn validate_fit_points(points: &[Point3]) -> Result<(), HostError> {
    let Some(first) = points.first() else {
        return Err(HostError::SplineFit("no fit points".into()));
    };
    if points.len() < 2 {
        return Err(HostError::SplineFit(
            "at least two fit points are required".into(),
        ));
    }
    if points.iter().all(|p| (p - first).norm() < TOLERANCE) {
        return Err(HostError::SplineFit("all fit points coincide".into()));
    }
    Ok(())
}
