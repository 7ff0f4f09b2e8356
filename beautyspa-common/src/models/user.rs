use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub fav_specialty: String,
    pub receive_promotions: bool,
    pub preferred_language: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            fav_specialty: String::new(),
            receive_promotions: true,
            preferred_language: "en".to_string(),
        }
    }
}

/// The signed-in user's profile record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub membership_level: String,
    pub loyalty_points: u32,
    pub preferences: UserPreferences,
    pub profile_image_url: String,
}

impl User {
    /// First and last name joined, skipping whichever is blank.
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
