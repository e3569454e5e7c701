use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum GeopotError {
    #[error("Degree/order ({degree}, {order}) is outside the bounds of the table")]
    DegreeOrderOutOfRange { degree: usize, order: usize },

    #[error("Order {order} exceeds degree {degree}")]
    OrderExceedsDegree { degree: usize, order: usize },

    #[error("Degenerate position ({x}, {y}, {z}): radius must be finite and non-zero")]
    DegeneratePosition { x: f64, y: f64, z: f64 },

    #[error("Degree {degree} exceeds the supported maximum degree {max}")]
    UnsupportedDegree { degree: usize, max: usize },

    #[error("Invalid gravity model parameter: {0}")]
    InvalidModelParameter(String),

    #[error("Coefficient table has maximum degree {found}, expected {expected}")]
    CoefficientShape { expected: usize, found: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl PartialEq for GeopotError {
    fn eq(&self, other: &Self) -> bool {
        use GeopotError::*;
        match (self, other) {
            (
                DegreeOrderOutOfRange {
                    degree: d1,
                    order: o1,
                },
                DegreeOrderOutOfRange {
                    degree: d2,
                    order: o2,
                },
            ) => d1 == d2 && o1 == o2,
            (
                OrderExceedsDegree {
                    degree: d1,
                    order: o1,
                },
                OrderExceedsDegree {
                    degree: d2,
                    order: o2,
                },
            ) => d1 == d2 && o1 == o2,

            // NaN components never compare equal: same variant is enough
            (DegeneratePosition { .. }, DegeneratePosition { .. }) => true,

            (
                UnsupportedDegree {
                    degree: d1,
                    max: m1,
                },
                UnsupportedDegree {
                    degree: d2,
                    max: m2,
                },
            ) => d1 == d2 && m1 == m2,
            (InvalidModelParameter(a), InvalidModelParameter(b)) => a == b,
            (
                CoefficientShape {
                    expected: e1,
                    found: f1,
                },
                CoefficientShape {
                    expected: e2,
                    found: f2,
                },
            ) => e1 == e2 && f1 == f2,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,

            _ => false,
        }
    }
}
