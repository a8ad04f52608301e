use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign};

/// A length in PDF points (1/72 of an inch). This is the native unit of all
/// coordinates in the crate; other units convert into it.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    From,
    Into,
    Display,
)]
#[display("{_0}")]
pub struct Pt(pub f32);

impl std::ops::Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
pub struct In(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
pub struct Mm(pub f32);

/// A length in centimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
pub struct Cm(pub f32);

impl From<In> for Pt {
    fn from(v: In) -> Pt {
        Pt(v.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(v: Mm) -> Pt {
        Pt(v.0 * 72.0 / 25.4)
    }
}

impl From<Cm> for Pt {
    fn from(v: Cm) -> Pt {
        Pt(v.0 * 72.0 / 2.54)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_common_units() {
        assert_eq!(Pt::from(In(1.0)), Pt(72.0));
        assert!((Pt::from(Cm(2.54)).0 - 72.0).abs() < 1e-4);
        assert!((Pt::from(Mm(25.4)).0 - 72.0).abs() < 1e-4);
    }

    #[test]
    fn arithmetic_behaves_like_f32() {
        let a = Pt(10.0) + Pt(5.0) - Pt(3.0);
        assert_eq!(a, Pt(12.0));
        assert_eq!(a * 2.0, Pt(24.0));
        assert_eq!(a / 4.0, Pt(3.0));
    }
}
