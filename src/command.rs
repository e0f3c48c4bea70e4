use crate::curve::CurveDefinition;
use crate::error::Result;
use crate::sampling::{generate_samples, SamplerOptions};
use crate::sketch::SketchHost;
use crate::units::{scale_points, LengthUnit};

/// Settings for [`BuildCurve`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub sampler: SamplerOptions,
    /// Unit the coordinate expressions are written in.
    pub display_unit: LengthUnit,
}

/// Result of a successful [`BuildCurve`].
#[derive(Debug, Clone, Copy)]
pub struct BuiltCurve<C, S> {
    pub component: C,
    pub spline: S,
    pub point_count: usize,
}

/// Builds a fitted spline from a parametric curve definition.
///
/// The whole curve is sampled before the host is touched, so an invalid
/// expression never leaves an empty component behind. If the host then
/// fails to fit the spline, the component created for it is removed again.
///
/// Each execution is independent; a live preview simply executes again.
pub struct BuildCurve {
    definition: CurveDefinition,
    options: BuildOptions,
}

impl BuildCurve {
    /// Creates a new `BuildCurve` operation.
    #[must_use]
    pub fn new(definition: CurveDefinition, options: BuildOptions) -> Self {
        Self {
            definition,
            options,
        }
    }

    /// Executes the operation against `host`.
    ///
    /// # Errors
    ///
    /// Returns a configuration or sampling error before any host call, or a
    /// host error if the component or spline cannot be created.
    pub fn execute<H: SketchHost>(
        &self,
        host: &mut H,
    ) -> Result<BuiltCurve<H::Component, H::Spline>> {
        let mut points = generate_samples(&self.definition, &self.options.sampler)?;
        scale_points(&mut points, self.options.display_unit.to_internal());

        let component = host.create_component(&self.definition.name)?;
        let spline = match host.add_fitted_spline(component, &self.definition.name, &points) {
            Ok(spline) => spline,
            Err(err) => {
                tracing::warn!(
                    curve = %self.definition.name,
                    error = %err,
                    "spline fit failed, removing component"
                );
                if let Err(cleanup) = host.remove_component(component) {
                    tracing::warn!(error = %cleanup, "failed to remove component");
                }
                return Err(err.into());
            }
        };

        tracing::info!(
            curve = %self.definition.name,
            points = points.len(),
            unit = %self.options.display_unit,
            "built curve"
        );
        Ok(BuiltCurve {
            component,
            spline,
            point_count: points.len(),
        })
    }
}
