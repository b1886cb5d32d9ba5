#![allow(missing_docs)]

//! This module defines the quantity types used in the cost model and the arithmetic between them.
//!
//! Money is in nominal currency units (CHF in the bundled data), distance in kilometres and
//! amounts of energy in litres of fuel or kWh of electricity, depending on the energy carrier.
use float_cmp::{ApproxEq, F64Margin};
use serde::{Deserialize, Serialize};

/// Represents a dimensionless quantity (rates, fractions, multipliers).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
)]
pub struct Dimensionless(pub f64);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 / rhs.0)
    }
}

impl Dimensionless {
    pub fn new(val: f64) -> Self {
        Self(val)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    pub fn powi(self, rhs: i32) -> Self {
        Dimensionless(self.0.powi(rhs))
    }

    pub fn powf(self, rhs: f64) -> Self {
        Dimensionless(self.0.powf(rhs))
    }

    /// Restrict the value to the interval [0, 1]
    pub fn clamp_proportion(self) -> Self {
        Dimensionless(self.0.clamp(0.0, 1.0))
    }
}

impl From<f64> for Dimensionless {
    fn from(val: f64) -> Self {
        Self(val)
    }
}

impl From<Dimensionless> for f64 {
    fn from(val: Dimensionless) -> Self {
        val.0
    }
}

impl ApproxEq for Dimensionless {
    type Margin = F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        self.0.approx_eq(other.0, margin)
    }
}

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            Default,
            Serialize,
            Deserialize,
            derive_more::Add,
            derive_more::Sub,
        )]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Whether the underlying value is neither infinite nor NaN
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// The absolute value of the quantity
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }
        }

        impl std::ops::Neg for $name {
            type Output = $name;
            fn neg(self) -> $name {
                $name(-self.0)
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) {
                self.0 += rhs.0;
            }
        }

        impl std::ops::SubAssign for $name {
            fn sub_assign(&mut self, rhs: $name) {
                self.0 -= rhs.0;
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = $name>>(iter: I) -> $name {
                iter.fold($name(0.0), |acc, x| acc + x)
            }
        }

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul<$name> for Dimensionless {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name(self.0 / rhs.0)
            }
        }

        impl std::ops::Div for $name {
            type Output = Dimensionless;
            fn div(self, rhs: $name) -> Dimensionless {
                Dimensionless(self.0 / rhs.0)
            }
        }

        impl ApproxEq for $name {
            type Margin = F64Margin;

            fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
                self.0.approx_eq(other.0, margin)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::new(self.0 * lhs.0)
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 / rhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Money);
unit_struct!(Distance);
unit_struct!(EnergyAmount);

// Derived quantities
unit_struct!(EnergyPrice);
unit_struct!(MoneyPerDistance);
unit_struct!(Consumption);

// Division rules
impl_div!(Money, Distance, MoneyPerDistance);
impl_div!(Money, EnergyAmount, EnergyPrice);

// Multiplication rules
impl_mul!(EnergyAmount, EnergyPrice, Money);
impl_mul!(MoneyPerDistance, Distance, Money);

/// Consumption is expressed per 100 units of distance (L/100 km, kWh/100 km)
impl std::ops::Mul<Distance> for Consumption {
    type Output = EnergyAmount;
    fn mul(self, rhs: Distance) -> EnergyAmount {
        EnergyAmount((self.0 / 100.0) * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_consumption_times_distance() {
        // 6.5 L/100 km over 15'000 km
        let fuel = Consumption(6.5) * Distance(15_000.0);
        assert_approx_eq!(EnergyAmount, fuel, EnergyAmount(975.0), epsilon = 1e-9);
    }

    #[test]
    fn test_energy_cost() {
        // 1500 kWh at 0.20 CHF/kWh
        let cost = EnergyAmount(1500.0) * EnergyPrice(0.20);
        assert_approx_eq!(Money, cost, Money(300.0), epsilon = 1e-9);
    }

    #[test]
    fn test_money_sum_and_neg() {
        let total: Money = [Money(1.0), Money(2.5), Money(-0.5)].into_iter().sum();
        assert_eq!(total, Money(3.0));
        assert_eq!(-total, Money(-3.0));
    }

    #[test]
    fn test_money_per_distance() {
        let per_km = Money(9933.0) / Distance(20_000.0);
        assert_approx_eq!(
            MoneyPerDistance,
            per_km,
            MoneyPerDistance(0.49665),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_clamp_proportion() {
        assert_eq!(Dimensionless(-0.5).clamp_proportion(), Dimensionless(0.0));
        assert_eq!(Dimensionless(0.3).clamp_proportion(), Dimensionless(0.3));
        assert_eq!(Dimensionless(1.5).clamp_proportion(), Dimensionless(1.0));
    }
}
