//! Known area of British Columbia in several units.

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// Which part of the province to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Total,
    Land,
    Freshwater,
}

impl Region {
    pub fn to_str(&self) -> &'static str {
        match self {
            Region::Total => "total",
            Region::Land => "land",
            Region::Freshwater => "freshwater",
        }
    }

    /// Area in square kilometres.
    #[inline]
    pub fn km2(&self) -> f64 {
        match self {
            Region::Total => 944_735.0,
            Region::Land => 925_186.0,
            Region::Freshwater => 19_549.0,
        }
    }

    pub fn all() -> [Region; 3] {
        [Region::Total, Region::Land, Region::Freshwater]
    }
}

/// Unit of area for [`bc_area`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaUnit {
    Km2,
    M2,
    Ha,
    Acres,
    SqMi,
}

impl AreaUnit {
    pub fn to_str(&self) -> &'static str {
        match self {
            AreaUnit::Km2 => "km2",
            AreaUnit::M2 => "m2",
            AreaUnit::Ha => "ha",
            AreaUnit::Acres => "acres",
            AreaUnit::SqMi => "sq_mi",
        }
    }

    /// Multiplier converting square kilometres into this unit.
    #[inline]
    pub fn factor(&self) -> f64 {
        match self {
            AreaUnit::Km2 => 1.0,
            AreaUnit::M2 => 1e6,
            AreaUnit::Ha => 100.0,
            AreaUnit::Acres => 247.105,
            AreaUnit::SqMi => 0.386102,
        }
    }

    pub fn all() -> [AreaUnit; 5] {
        [AreaUnit::Km2, AreaUnit::M2, AreaUnit::Ha, AreaUnit::Acres, AreaUnit::SqMi]
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Region::all().into_iter()
            .find(|region| region.to_str() == s)
            .ok_or_else(|| Error::InvalidArgument(format!(
                "unknown region `{s}`, expected one of: total, land, freshwater"
            )))
    }
}

impl FromStr for AreaUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "km2" => Ok(AreaUnit::Km2),
            "m2" => Ok(AreaUnit::M2),
            "ha" => Ok(AreaUnit::Ha),
            "acres" => Ok(AreaUnit::Acres),
            "sq_mi" | "sq mi" | "mi2" => Ok(AreaUnit::SqMi),
            _ => Err(Error::InvalidArgument(format!(
                "unknown unit `{s}`, expected one of: km2, m2, ha, acres, sq_mi"
            ))),
        }
    }
}

/// A labeled area, e.g. `land_ha = 92518600`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaValue {
    pub label: String,
    pub value: u64,
}

impl fmt::Display for AreaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.label, self.value)
    }
}

/// Area of British Columbia for `region`, converted to `unit` and rounded to
/// the nearest integer.
pub fn bc_area(region: Region, unit: AreaUnit) -> AreaValue {
    AreaValue {
        label: format!("{}_{}", region.to_str(), unit.to_str()),
        value: (region.km2() * unit.factor()).round() as u64,
    }
}

/// String-selector form of [`bc_area`], e.g. `bc_area_str("land", "ha")`.
pub fn bc_area_str(region: &str, unit: &str) -> Result<AreaValue> {
    Ok(bc_area(region.parse()?, unit.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn total_km2() {
        let area = bc_area(Region::Total, AreaUnit::Km2);
        assert_eq!(area.value, 944_735);
        assert_eq!(area.label, "total_km2");
    }

    #[test]
    fn land_ha() {
        let area = bc_area(Region::Land, AreaUnit::Ha);
        assert_eq!(area.value, 92_518_600);
        assert_eq!(area.label, "land_ha");
    }

    #[test]
    fn freshwater_m2() {
        assert_eq!(bc_area(Region::Freshwater, AreaUnit::M2).value, 19_549_000_000);
    }

    #[test]
    fn total_sq_mi_rounds() {
        // 944735 * 0.386102 = 364764.07...
        assert_eq!(bc_area(Region::Total, AreaUnit::SqMi).value, 364_764);
    }

    #[test]
    fn string_selectors() {
        let area = bc_area_str("freshwater", "acres").unwrap();
        assert_eq!(area.label, "freshwater_acres");
        assert_eq!(area.value, (19_549.0_f64 * 247.105).round() as u64);
    }

    #[test]
    fn unknown_selectors_are_invalid_arguments() {
        assert!(matches!(bc_area_str("ocean", "km2"), Err(Error::InvalidArgument(_))));
        assert!(matches!(bc_area_str("land", "furlongs"), Err(Error::InvalidArgument(_))));
    }

    proptest! {
        #[test]
        fn every_pair_is_constant_times_factor(r in 0usize..3, u in 0usize..5) {
            let region = Region::all()[r];
            let unit = AreaUnit::all()[u];
            let area = bc_area(region, unit);
            prop_assert_eq!(area.value, (region.km2() * unit.factor()).round() as u64);
            prop_assert_eq!(area.label, format!("{}_{}", region.to_str(), unit.to_str()));
        }
    }
}
