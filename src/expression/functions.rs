use std::cell::RefCell;
use std::rc::Rc;

use meval::Context;

use crate::error::EvaluationError;

/// The whitelisted math functions an expression may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Cbrt,
    Exp,
    Ln,
    Log10,
    Log2,
    Abs,
    Floor,
    Ceil,
    Round,
    Sign,
    Deg,
    Rad,
    Atan2,
    Pow,
    Hypot,
    Min,
    Max,
    Mod,
    Clamp,
    Lerp,
}

/// Every callable name, aliases included.
pub const FUNCTION_NAMES: &[(&str, Function)] = &[
    ("sin", Function::Sin),
    ("cos", Function::Cos),
    ("tan", Function::Tan),
    ("asin", Function::Asin),
    ("arcsin", Function::Asin),
    ("acos", Function::Acos),
    ("arccos", Function::Acos),
    ("atan", Function::Atan),
    ("arctan", Function::Atan),
    ("sinh", Function::Sinh),
    ("cosh", Function::Cosh),
    ("tanh", Function::Tanh),
    ("sqrt", Function::Sqrt),
    ("cbrt", Function::Cbrt),
    ("exp", Function::Exp),
    ("ln", Function::Ln),
    ("log", Function::Ln),
    ("log10", Function::Log10),
    ("log2", Function::Log2),
    ("abs", Function::Abs),
    ("fabs", Function::Abs),
    ("floor", Function::Floor),
    ("ceil", Function::Ceil),
    ("round", Function::Round),
    ("sign", Function::Sign),
    ("sgn", Function::Sign),
    ("deg", Function::Deg),
    ("degrees", Function::Deg),
    ("rad", Function::Rad),
    ("radians", Function::Rad),
    ("atan2", Function::Atan2),
    ("pow", Function::Pow),
    ("hypot", Function::Hypot),
    ("min", Function::Min),
    ("max", Function::Max),
    ("mod", Function::Mod),
    ("modulo", Function::Mod),
    ("clamp", Function::Clamp),
    ("lerp", Function::Lerp),
];

/// First failure raised inside a function call during one evaluation.
pub(crate) type FailureSlot = Rc<RefCell<Option<EvaluationError>>>;

impl Function {
    /// Resolves a function by name, including the accepted aliases.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        FUNCTION_NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, function)| *function)
    }

    /// Canonical name, used in domain errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Sign => "sign",
            Self::Deg => "deg",
            Self::Rad => "rad",
            Self::Atan2 => "atan2",
            Self::Pow => "pow",
            Self::Hypot => "hypot",
            Self::Min => "min",
            Self::Max => "max",
            Self::Mod => "mod",
            Self::Clamp => "clamp",
            Self::Lerp => "lerp",
        }
    }

    /// Number of arguments the function takes.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Atan2 | Self::Pow | Self::Hypot | Self::Min | Self::Max | Self::Mod => 2,
            Self::Clamp | Self::Lerp => 3,
            _ => 1,
        }
    }

    /// Applies the function to already evaluated arguments.
    pub(crate) fn apply(self, args: &[f64]) -> Result<f64, EvaluationError> {
        if args.len() != self.arity() {
            return Err(EvaluationError::ArityMismatch {
                name: self.name().to_owned(),
                expected: self.arity(),
            });
        }
        let domain = |value: f64| EvaluationError::Domain {
            function: self.name(),
            value,
        };
        let x = args[0];
        let value = match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin | Self::Acos if !(-1.0..=1.0).contains(&x) => return Err(domain(x)),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
            Self::Sqrt if x < 0.0 => return Err(domain(x)),
            Self::Sqrt => x.sqrt(),
            Self::Cbrt => x.cbrt(),
            Self::Exp => x.exp(),
            Self::Ln | Self::Log10 | Self::Log2 if x <= 0.0 => return Err(domain(x)),
            Self::Ln => x.ln(),
            Self::Log10 => x.log10(),
            Self::Log2 => x.log2(),
            Self::Abs => x.abs(),
            Self::Floor => x.floor(),
            Self::Ceil => x.ceil(),
            Self::Round => x.round(),
            Self::Sign => sign(x),
            Self::Deg => x.to_degrees(),
            Self::Rad => x.to_radians(),
            Self::Atan2 => x.atan2(args[1]),
            Self::Pow => power(x, args[1])?,
            Self::Hypot => x.hypot(args[1]),
            Self::Min => x.min(args[1]),
            Self::Max => x.max(args[1]),
            Self::Mod => modulo(x, args[1])?,
            Self::Clamp => clamp(x, args[1], args[2]),
            Self::Lerp => x + (args[1] - x) * args[2],
        };
        Ok(value)
    }
}

/// Builds a context holding only the whitelisted functions.
///
/// A failing call yields `NaN` to the evaluator and records its error in
/// `failure`; the first recorded error wins.
pub(crate) fn build_context(failure: &FailureSlot) -> Context<'static> {
    let mut context = Context::empty();
    for &(name, function) in FUNCTION_NAMES {
        let slot = Rc::clone(failure);
        context.funcn(
            name,
            move |args: &[f64]| match function.apply(args) {
                Ok(value) => value,
                Err(err) => {
                    let mut recorded = slot.borrow_mut();
                    if recorded.is_none() {
                        *recorded = Some(err);
                    }
                    f64::NAN
                }
            },
            function.arity(),
        );
    }
    context
}

/// `sign(0) == 0`, unlike [`f64::signum`].
fn sign(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.signum()
    }
}

/// Power with the real-valued domain: a negative base needs an integer
/// exponent, and zero cannot be raised to a negative power.
fn power(base: f64, exponent: f64) -> Result<f64, EvaluationError> {
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvaluationError::Domain {
            function: "pow",
            value: base,
        });
    }
    if base == 0.0 && exponent < 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }
    Ok(base.powf(exponent))
}

/// Floored modulo: the result takes the sign of the divisor.
fn modulo(dividend: f64, divisor: f64) -> Result<f64, EvaluationError> {
    if divisor == 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }
    let remainder = dividend % divisor;
    if remainder != 0.0 && (remainder < 0.0) != (divisor < 0.0) {
        Ok(remainder + divisor)
    } else {
        Ok(remainder)
    }
}

/// Clamps `value` into the interval spanned by `a` and `b`, in either order.
fn clamp(value: f64, a: f64, b: f64) -> f64 {
    if value.is_nan() || a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    value.clamp(a.min(b), a.max(b))
}
