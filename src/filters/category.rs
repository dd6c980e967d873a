use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Facet a dashboard filter narrows on.
///
/// Declaration order doubles as rule precedence: when single-category rules
/// from several families match the same record, the family declared first
/// wins. Facility-level adjustments therefore outrank demographic ones,
/// which outrank temporal ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    Facility,
    Ward,
    SpecimenSource,
    AgeBand,
    Sex,
    Region,
    Pathogen,
    Antibiotic,
    AntibioticClass,
    Year,
    Quarter,
}

impl FilterCategory {
    /// All categories in precedence order.
    pub const ALL: [FilterCategory; 11] = [
        FilterCategory::Facility,
        FilterCategory::Ward,
        FilterCategory::SpecimenSource,
        FilterCategory::AgeBand,
        FilterCategory::Sex,
        FilterCategory::Region,
        FilterCategory::Pathogen,
        FilterCategory::Antibiotic,
        FilterCategory::AntibioticClass,
        FilterCategory::Year,
        FilterCategory::Quarter,
    ];

    /// Stable snake_case key, as used in catalogs and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            FilterCategory::Facility => "facility",
            FilterCategory::Ward => "ward",
            FilterCategory::SpecimenSource => "specimen_source",
            FilterCategory::AgeBand => "age_band",
            FilterCategory::Sex => "sex",
            FilterCategory::Region => "region",
            FilterCategory::Pathogen => "pathogen",
            FilterCategory::Antibiotic => "antibiotic",
            FilterCategory::AntibioticClass => "antibiotic_class",
            FilterCategory::Year => "year",
            FilterCategory::Quarter => "quarter",
        }
    }

    /// Default human-readable label, used when a catalog does not supply one.
    pub fn default_label(&self) -> &'static str {
        match self {
            FilterCategory::Facility => "Facility",
            FilterCategory::Ward => "Ward",
            FilterCategory::SpecimenSource => "Specimen Source",
            FilterCategory::AgeBand => "Age Group",
            FilterCategory::Sex => "Sex",
            FilterCategory::Region => "Region",
            FilterCategory::Pathogen => "Pathogen",
            FilterCategory::Antibiotic => "Antibiotic",
            FilterCategory::AntibioticClass => "Antibiotic Class",
            FilterCategory::Year => "Year",
            FilterCategory::Quarter => "Quarter",
        }
    }

    /// Position in the precedence order (0 = highest).
    pub fn precedence(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a selector names no known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filter category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for FilterCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "facility" | "hospital" => Ok(FilterCategory::Facility),
            "ward" => Ok(FilterCategory::Ward),
            "specimen_source" | "specimen" | "specimen_type" => Ok(FilterCategory::SpecimenSource),
            "age_band" | "age" | "age_group" => Ok(FilterCategory::AgeBand),
            "sex" | "gender" => Ok(FilterCategory::Sex),
            "region" => Ok(FilterCategory::Region),
            "pathogen" | "organism" => Ok(FilterCategory::Pathogen),
            "antibiotic" | "antimicrobial" => Ok(FilterCategory::Antibiotic),
            "antibiotic_class" | "class" => Ok(FilterCategory::AntibioticClass),
            "year" => Ok(FilterCategory::Year),
            "quarter" => Ok(FilterCategory::Quarter),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
