// src/onboarding/flow.rs
use std::sync::Arc;
use tracing::{error, info, warn};

use super::profile::{ProfileForm, ProfileFormError, ProfileService};
use super::taxonomy::IndustryCatalog;
use crate::notify::Notifier;

pub const DASHBOARD_PATH: &str = "/dashboard";

const LOAD_FAILED_NOTICE: &str = "Failed to load your profile data";
const UPDATE_FAILED_NOTICE: &str = "Failed to update profile. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    /// `?mode=edit` selects edit mode, anything else is first-time onboarding
    pub fn from_query(mode: Option<&str>) -> Self {
        match mode {
            Some("edit") => Self::Edit,
            _ => Self::Create,
        }
    }

    fn saved_notice(&self) -> &'static str {
        match self {
            Self::Create => "Profile completed successfully!",
            Self::Edit => "Profile updated successfully!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryDecision {
    ShowForm,
    Redirect(String),
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error(transparent)]
    Form(#[from] ProfileFormError),
    #[error("profile service failed: {0}")]
    Service(#[source] anyhow::Error),
}

pub struct OnboardingFlow<S> {
    service: S,
    catalog: IndustryCatalog,
    notifier: Arc<dyn Notifier>,
}

impl<S: ProfileService> OnboardingFlow<S> {
    pub fn new(service: S, catalog: IndustryCatalog, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            catalog,
            notifier,
        }
    }

    /// Already onboarded users skip the form unless they came to edit it.
    /// A failed status lookup shows the form.
    pub async fn entry(&self, mode: FormMode) -> EntryDecision {
        if mode == FormMode::Edit {
            return EntryDecision::ShowForm;
        }

        match self.service.onboarding_status().await {
            Ok(status) if status.is_onboarded => {
                info!("User already onboarded, redirecting to {}", DASHBOARD_PATH);
                EntryDecision::Redirect(DASHBOARD_PATH.to_string())
            }
            Ok(_) => EntryDecision::ShowForm,
            Err(e) => {
                error!("Error checking onboarding status: {:#}", e);
                EntryDecision::ShowForm
            }
        }
    }

    /// Current profile as a prefilled form, or `None` after notifying the user
    pub async fn load_for_edit(&self) -> Option<ProfileForm> {
        match self.service.profile_for_edit().await {
            Ok(record) => Some(ProfileForm::from_record(&record)),
            Err(e) => {
                error!("Error loading user data: {:#}", e);
                self.notifier.error(LOAD_FAILED_NOTICE);
                None
            }
        }
    }

    /// Validate and save. Returns the path to navigate to.
    pub async fn submit(
        &self,
        form: &ProfileForm,
        mode: FormMode,
        return_to: Option<&str>,
    ) -> Result<String, OnboardingError> {
        let return_to = resolve_return_to(return_to);

        let update = form.validate(&self.catalog, &return_to).map_err(|e| {
            warn!("Profile form rejected: {}", e);
            if e == ProfileFormError::MissingIndustry {
                self.notifier.error(&e.to_string());
            }
            e
        })?;

        let outcome = self.service.update_profile(update).await.map_err(|e| {
            error!("Onboarding error: {:#}", e);
            self.notifier.error(UPDATE_FAILED_NOTICE);
            OnboardingError::Service(e)
        })?;

        self.notifier.success(mode.saved_notice());

        let redirect = outcome
            .redirect_to
            .filter(|path| !path.is_empty())
            .unwrap_or(return_to);
        info!("Redirecting to: {}", redirect);
        Ok(redirect)
    }

    pub fn cancel(&self, return_to: Option<&str>) -> String {
        resolve_return_to(return_to)
    }
}

fn resolve_return_to(return_to: Option<&str>) -> String {
    return_to
        .filter(|path| !path.is_empty())
        .unwrap_or(DASHBOARD_PATH)
        .to_string()
}
