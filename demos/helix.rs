//! Builds a curve from dialog-style inputs into an in-memory sketch store.
//!
//! Usage:
//! ```text
//! cargo run --example helix                                   # default helix
//! cargo run --example helix -- curveFunctionZ=t/4 tEnd=6*pi   # override inputs
//! cargo run --example helix -- --unit mm curveName=Spring
//! ```

use eqcurve::{BuildCurve, BuildOptions, CurveDefinition, EqcurveError, LengthUnit, SketchStore};

fn main() -> Result<(), EqcurveError> {
    // Default: WARN for everything, INFO for eqcurve.
    // Override with RUST_LOG env var (e.g. RUST_LOG=eqcurve=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("helix=info".parse().unwrap_or_default())
        .add_directive("eqcurve=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut options = BuildOptions::default();
    let mut inputs = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--unit" {
            let symbol = iter.next().map_or("", String::as_str);
            options.display_unit = symbol.parse::<LengthUnit>()?;
        } else if let Some((id, value)) = arg.split_once('=') {
            inputs.push((id, value));
        } else {
            tracing::warn!(arg = %arg, "ignoring argument, expected id=value");
        }
    }

    let definition = CurveDefinition::from_inputs(inputs);
    let mut store = SketchStore::new();
    let built = BuildCurve::new(definition, options).execute(&mut store)?;

    if let Some(spline) = store.spline(built.spline) {
        if let (Some(first), Some(last)) = (spline.fit_points.first(), spline.fit_points.last()) {
            tracing::info!(
                points = built.point_count,
                first = %first,
                last = %last,
                "fitted spline"
            );
        }
    }
    Ok(())
}
