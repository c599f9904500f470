// src/onboarding/mod.rs
//! Profile onboarding and editing against an external profile service

pub mod flow;
pub mod profile;
pub mod taxonomy;

pub use flow::{EntryDecision, FormMode, OnboardingError, OnboardingFlow, DASHBOARD_PATH};
pub use profile::{
    OnboardingStatus, ProfileForm, ProfileFormError, ProfileRecord, ProfileService, ProfileUpdate,
    UpdateOutcome,
};
pub use taxonomy::{Industry, IndustryCatalog};
