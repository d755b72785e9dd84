use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Sumiyya Kareem".to_string(),
            email: "sumiyya.kareem@email.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            address: "Koramangala, Bangalore".to_string(),
        }
    }
}
