use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A bookable spa service. Immutable once fetched from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ServiceCategory,
    pub duration_minutes: u32,
    pub price: f64,
    pub image_url: String,
    pub rating: f32,
    pub review_count: u32,
    pub is_featured: bool,
}

/// Closed category set. Unknown wire values fall back to `Massage` at the
/// mapping layer rather than failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceCategory {
    #[default]
    Massage,
    Facial,
    Nails,
    Hair,
    BodyTreatment,
}

impl ServiceCategory {
    /// Human-readable label for UI surfaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceCategory::Massage => "Massage",
            ServiceCategory::Facial => "Facial",
            ServiceCategory::Nails => "Nails",
            ServiceCategory::Hair => "Hair",
            ServiceCategory::BodyTreatment => "Body Treatment",
        }
    }

    /// The value the backend uses in the `category` query parameter and in
    /// service records.
    pub fn as_query(&self) -> &'static str {
        match self {
            ServiceCategory::Massage => "MASSAGE",
            ServiceCategory::Facial => "FACIAL",
            ServiceCategory::Nails => "NAILS",
            ServiceCategory::Hair => "HAIR",
            ServiceCategory::BodyTreatment => "BODY",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MASSAGE" => Ok(ServiceCategory::Massage),
            "FACIAL" => Ok(ServiceCategory::Facial),
            "NAILS" => Ok(ServiceCategory::Nails),
            "HAIR" => Ok(ServiceCategory::Hair),
            "BODY" => Ok(ServiceCategory::BodyTreatment),
            _ => Err(format!("Unknown service category: {s}")),
        }
    }
}
