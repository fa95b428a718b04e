use std::sync::Arc;

use validator::Validate;

use crate::core::error::{flatten_validation_errors, AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::directory::UserProfileStore;
use crate::features::users::dtos::UpdateProfileDto;
use crate::features::users::models::{ProfileFields, UserProfile};

/// Service for reading and editing the caller's profile
pub struct UserProfileService {
    store: Arc<dyn UserProfileStore>,
}

impl UserProfileService {
    pub fn new(store: Arc<dyn UserProfileStore>) -> Self {
        Self { store }
    }

    pub async fn get_profile(&self, user: &AuthenticatedUser) -> Result<UserProfile> {
        self.store
            .find_profile(user.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Merge the present fields onto the stored profile and write it back
    pub async fn update_profile(
        &self,
        user: &AuthenticatedUser,
        dto: UpdateProfileDto,
    ) -> Result<UserProfile> {
        let dto = dto.normalized();
        dto.validate()
            .map_err(|e| AppError::InvalidFields(flatten_validation_errors(&e)))?;

        let current = self.get_profile(user).await?;
        let mut fields = ProfileFields::from(&current);
        dto.apply_to(&mut fields);

        let updated = self
            .store
            .update_profile(user.user_id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(user_id = %user.user_id, "Profile updated");
        Ok(updated)
    }
}
