use serde::{Deserialize, Serialize};

/// A spa specialist/therapist. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialist {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub image_url: String,
    pub rating: f32,
    pub experience_years: u32,
}
