//! Demographic categories and the two run selectors
//!
//! [`ComparisonMode`] picks the pair of groups being contrasted and
//! [`SizeThreshold`] picks the minimum district enrollment. Both are closed
//! sets; parsing anything else is an [`SegregationError::InvalidSelector`].

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::SegregationError;

/// Demographic count columns carried by every school row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DemographicCategory {
    Hispanic,
    White,
    Asian,
    Black,
    TotalEnrollment,
}

impl DemographicCategory {
    /// All categories in storage order
    pub const ALL: [Self; 5] = [
        Self::Hispanic,
        Self::White,
        Self::Asian,
        Self::Black,
        Self::TotalEnrollment,
    ];

    /// Position of the category in per-school count storage
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Hispanic => 0,
            Self::White => 1,
            Self::Asian => 2,
            Self::Black => 3,
            Self::TotalEnrollment => 4,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hispanic => "Hispanic",
            Self::White => "White",
            Self::Asian => "Asian",
            Self::Black => "Black",
            Self::TotalEnrollment => "Total",
        }
    }
}

impl fmt::Display for DemographicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A closed set of options that can be chosen by identifier
pub trait Selector: Copy + Sized + 'static {
    /// Name of the selector used in messages
    const KIND: &'static str;

    /// Every variant, in menu order
    fn all() -> &'static [Self];

    /// Canonical identifier
    fn id(self) -> &'static str;

    /// Menu description
    fn description(self) -> &'static str;

    /// Comma separated list of accepted identifiers
    fn expected() -> String {
        Self::all().iter().map(|s| s.id()).join(", ")
    }

    /// Look up a variant by identifier
    ///
    /// Case-insensitive; `-` and `_` are interchangeable.
    fn parse_id(value: &str) -> Result<Self, SegregationError> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|s| s.id() == normalized)
            .ok_or_else(|| SegregationError::InvalidSelector {
                kind: Self::KIND,
                value: value.to_string(),
                expected: Self::expected(),
            })
    }
}

/// How the two compared groups are formed from the category counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSplit {
    /// Group A is the sum of the listed categories, group B is Total - A
    VersusRest(&'static [DemographicCategory]),
    /// Group A and group B are independent raw counts and may overlap
    Direct {
        group_a: DemographicCategory,
        group_b: DemographicCategory,
    },
}

/// Which pair of demographic groups is contrasted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonMode {
    #[serde(rename = "hispanic_v_non")]
    HispanicVsRest,
    #[serde(rename = "white_v_non")]
    WhiteVsRest,
    #[serde(rename = "asian_v_non")]
    AsianVsRest,
    #[serde(rename = "brown_v_non")]
    BlackHispanicVsRest,
    #[serde(rename = "asian_v_hispanic")]
    AsianVsHispanic,
    #[serde(rename = "white_v_hispanic")]
    WhiteVsHispanic,
}

impl ComparisonMode {
    const VARIANTS: [Self; 6] = [
        Self::HispanicVsRest,
        Self::WhiteVsRest,
        Self::AsianVsRest,
        Self::BlackHispanicVsRest,
        Self::AsianVsHispanic,
        Self::WhiteVsHispanic,
    ];

    /// Group composition for this mode
    #[must_use]
    pub fn split(self) -> GroupSplit {
        use DemographicCategory::{Asian, Black, Hispanic, White};
        match self {
            Self::HispanicVsRest => GroupSplit::VersusRest(&[Hispanic]),
            Self::WhiteVsRest => GroupSplit::VersusRest(&[White]),
            Self::AsianVsRest => GroupSplit::VersusRest(&[Asian]),
            Self::BlackHispanicVsRest => GroupSplit::VersusRest(&[Black, Hispanic]),
            Self::AsianVsHispanic => GroupSplit::Direct {
                group_a: Asian,
                group_b: Hispanic,
            },
            Self::WhiteVsHispanic => GroupSplit::Direct {
                group_a: White,
                group_b: Hispanic,
            },
        }
    }

    /// Categories that must hold valid counts for a school to be used
    ///
    /// Total enrollment is always required.
    #[must_use]
    pub fn required_categories(self) -> Vec<DemographicCategory> {
        let mut required = match self.split() {
            GroupSplit::VersusRest(group) => group.to_vec(),
            GroupSplit::Direct { group_a, group_b } => vec![group_a, group_b],
        };
        required.push(DemographicCategory::TotalEnrollment);
        required
    }

    /// Whether group B is derived as the remainder of the total
    #[must_use]
    pub fn is_partition(self) -> bool {
        matches!(self.split(), GroupSplit::VersusRest(_))
    }
}

impl Selector for ComparisonMode {
    const KIND: &'static str = "comparison mode";

    fn all() -> &'static [Self] {
        &Self::VARIANTS
    }

    fn id(self) -> &'static str {
        match self {
            Self::HispanicVsRest => "hispanic_v_non",
            Self::WhiteVsRest => "white_v_non",
            Self::AsianVsRest => "asian_v_non",
            Self::BlackHispanicVsRest => "brown_v_non",
            Self::AsianVsHispanic => "asian_v_hispanic",
            Self::WhiteVsHispanic => "white_v_hispanic",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::HispanicVsRest => "Hispanic vs. all other students",
            Self::WhiteVsRest => "White vs. all other students",
            Self::AsianVsRest => "Asian vs. all other students",
            Self::BlackHispanicVsRest => "Black and Hispanic vs. all other students",
            Self::AsianVsHispanic => "Asian vs. Hispanic students",
            Self::WhiteVsHispanic => "White vs. Hispanic students",
        }
    }
}

impl FromStr for ComparisonMode {
    type Err = SegregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_id(s)
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Minimum total enrollment for a district to be ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeThreshold {
    Small,
    Medium,
    Large,
}

impl SizeThreshold {
    const VARIANTS: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Enrollment cutoff (inclusive)
    #[must_use]
    pub const fn min_enrollment(self) -> u64 {
        match self {
            Self::Small => 2_000,
            Self::Medium => 5_000,
            Self::Large => 10_000,
        }
    }
}

impl Selector for SizeThreshold {
    const KIND: &'static str = "size threshold";

    fn all() -> &'static [Self] {
        &Self::VARIANTS
    }

    fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Small => "districts with at least 2,000 students",
            Self::Medium => "districts with at least 5,000 students",
            Self::Large => "districts with at least 10,000 students",
        }
    }
}

impl FromStr for SizeThreshold {
    type Err = SegregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_id(s)
    }
}

impl fmt::Display for SizeThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
