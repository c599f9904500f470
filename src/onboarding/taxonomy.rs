// src/onboarding/taxonomy.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Industry {
    pub id: String,
    pub name: String,
    pub sub_industries: Vec<String>,
}

impl Industry {
    fn new(id: &str, name: &str, sub_industries: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            sub_industries: sub_industries.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn has_specialization(&self, name: &str) -> bool {
        self.sub_industries.iter().any(|s| s == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryCatalog {
    industries: Vec<Industry>,
}

impl IndustryCatalog {
    pub fn new(industries: Vec<Industry>) -> Self {
        Self { industries }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            Industry::new(
                "tech",
                "Technology",
                &[
                    "Software Development",
                    "Data Science",
                    "Cybersecurity",
                    "Cloud Computing",
                    "IT Infrastructure",
                ],
            ),
            Industry::new(
                "finance",
                "Finance",
                &["Banking", "Investment", "Insurance", "Accounting", "FinTech"],
            ),
            Industry::new(
                "healthcare",
                "Healthcare",
                &["Medicine", "Nursing", "Pharmacy", "Healthcare IT", "Biotech"],
            ),
            Industry::new(
                "marketing",
                "Marketing",
                &[
                    "Digital Marketing",
                    "Content Marketing",
                    "Brand Management",
                    "Market Research",
                    "Social Media",
                ],
            ),
        ])
    }

    /// Load a catalogue served as a JSON array of industries
    pub fn from_json(content: &str) -> Result<Self> {
        let industries: Vec<Industry> =
            serde_json::from_str(content).context("Failed to parse industry catalogue")?;
        Ok(Self::new(industries))
    }

    pub fn find(&self, id: &str) -> Option<&Industry> {
        self.industries.iter().find(|i| i.id == id)
    }

    pub fn industries(&self) -> &[Industry] {
        &self.industries
    }
}

impl Default for IndustryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
