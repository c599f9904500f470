// src/onboarding/profile.rs
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::taxonomy::IndustryCatalog;
use crate::utils::slugify_label;

pub const MAX_EXPERIENCE_YEARS: u32 = 50;
pub const MAX_BIO_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileFormError {
    #[error("Please select both industry and specialization")]
    MissingIndustry,
    #[error("Unknown industry: {0}")]
    UnknownIndustry(String),
    #[error("{specialization} is not a specialization of {industry}")]
    UnknownSpecialization {
        industry: String,
        specialization: String,
    },
    #[error("Experience must be a whole number of years between 0 and {}", MAX_EXPERIENCE_YEARS)]
    InvalidExperience,
    #[error("Please enter at least one skill")]
    NoSkills,
    #[error("Bio cannot exceed {} characters", MAX_BIO_CHARS)]
    BioTooLong,
}

/// Profile as kept by the profile service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub main_industry: String,
    pub sub_industry: String,
    pub experience: u32,
    pub skills: Vec<String>,
    #[serde(default)]
    pub bio: String,
}

/// Payload sent to the profile service on save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// `{industry}-{specialization-slug}`
    pub industry: String,
    pub sub_industry: String,
    pub experience: u32,
    pub skills: Vec<String>,
    pub bio: String,
    pub return_to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub is_onboarded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub redirect_to: Option<String>,
}

/// User-profile collaborator. Storage lives behind this trait.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn onboarding_status(&self) -> Result<OnboardingStatus>;
    async fn profile_for_edit(&self) -> Result<ProfileRecord>;
    async fn update_profile(&self, update: ProfileUpdate) -> Result<UpdateOutcome>;
}

/// Form fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub industry: String,
    pub sub_industry: String,
    pub experience: String,
    pub skills: String,
    pub bio: String,
}

impl ProfileForm {
    /// Prefill from a stored profile
    pub fn from_record(record: &ProfileRecord) -> Self {
        Self {
            industry: record.main_industry.clone(),
            sub_industry: record.sub_industry.clone(),
            experience: record.experience.to_string(),
            skills: record.skills.join(", "),
            bio: record.bio.clone(),
        }
    }

    /// Changing the industry clears the specialization
    pub fn select_industry(&mut self, industry: &str) {
        self.industry = industry.to_string();
        self.sub_industry.clear();
    }

    pub fn validate(
        &self,
        catalog: &IndustryCatalog,
        return_to: &str,
    ) -> Result<ProfileUpdate, ProfileFormError> {
        let industry_id = self.industry.trim();
        let specialization = self.sub_industry.trim();
        if industry_id.is_empty() || specialization.is_empty() {
            return Err(ProfileFormError::MissingIndustry);
        }

        let industry = catalog
            .find(industry_id)
            .ok_or_else(|| ProfileFormError::UnknownIndustry(industry_id.to_string()))?;
        if !industry.has_specialization(specialization) {
            return Err(ProfileFormError::UnknownSpecialization {
                industry: industry.name.clone(),
                specialization: specialization.to_string(),
            });
        }

        let experience = self
            .experience
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|years| *years <= MAX_EXPERIENCE_YEARS)
            .ok_or(ProfileFormError::InvalidExperience)?;

        let skills = parse_skills(&self.skills);
        if skills.is_empty() {
            return Err(ProfileFormError::NoSkills);
        }

        let bio = self.bio.trim();
        if bio.chars().count() > MAX_BIO_CHARS {
            return Err(ProfileFormError::BioTooLong);
        }

        Ok(ProfileUpdate {
            industry: industry_key(industry_id, specialization),
            sub_industry: specialization.to_string(),
            experience,
            skills,
            bio: bio.to_string(),
            return_to: return_to.to_string(),
        })
    }
}

pub fn industry_key(industry_id: &str, specialization: &str) -> String {
    format!("{}-{}", industry_id, slugify_label(specialization))
}

/// Comma-separated skills, trimmed, empties dropped
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
