//! Letter grades for the two dashboard views.
//!
//! The admin table and the employee self-view grade the same total on different scales. Each
//! scale is its own function so that adjusting one cannot move the other's boundaries.

use serde::Serialize;

/// Grade shown in the admin evaluation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AdminGrade {
    A,
    B,
    C,
}

impl AdminGrade {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

/// Grade shown to the employee on their own dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SelfViewGrade {
    A,
    B,
    C,
    D,
    F,
}

impl SelfViewGrade {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

/// Admin scale: 91 and above is A, 81 up to 91 is B, everything else C.
/// Totals above 100 stay A.
pub fn admin_grade(total: f64) -> AdminGrade {
    if total >= 91.0 {
        AdminGrade::A
    } else if total >= 81.0 {
        AdminGrade::B
    } else {
        AdminGrade::C
    }
}

/// Self-view scale: above 90 is A, then B from 85, C from 80, D from 70, F below.
pub fn self_view_grade(total: f64) -> SelfViewGrade {
    match total {
        t if t > 90.0 => SelfViewGrade::A,
        t if t >= 85.0 => SelfViewGrade::B,
        t if t >= 80.0 => SelfViewGrade::C,
        t if t >= 70.0 => SelfViewGrade::D,
        _ => SelfViewGrade::F,
    }
}
