use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidateUrl, ValidationError};

use crate::features::users::models::ProfileFields;

fn validate_avatar(avatar: &str) -> Result<(), ValidationError> {
    // Empty clears the avatar
    if avatar.is_empty() || avatar.validate_url() {
        return Ok(());
    }
    Err(ValidationError::new("avatar").with_message("Avatar must be a valid URL".into()))
}

/// Request DTO for `PUT /api/users/profile`. Absent fields keep their value;
/// an empty phone, location or avatar clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
    #[validate(custom(function = "validate_avatar"))]
    pub avatar: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn cleared_if_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

impl UpdateProfileDto {
    pub fn normalized(self) -> Self {
        Self {
            name: trimmed(self.name),
            phone: trimmed(self.phone),
            location: trimmed(self.location),
            avatar: trimmed(self.avatar),
        }
    }

    pub fn apply_to(self, fields: &mut ProfileFields) {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(phone) = self.phone {
            fields.phone = cleared_if_empty(phone);
        }
        if let Some(location) = self.location {
            fields.location = cleared_if_empty(location);
        }
        if let Some(avatar) = self.avatar {
            fields.avatar = cleared_if_empty(avatar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::flatten_validation_errors;
    use serde_json::json;

    fn dto(value: serde_json::Value) -> UpdateProfileDto {
        serde_json::from_value::<UpdateProfileDto>(value)
            .unwrap()
            .normalized()
    }

    #[test]
    fn test_blank_name_and_bad_avatar_are_rejected() {
        let errors = flatten_validation_errors(
            &dto(json!({ "name": "   ", "avatar": "not a url" }))
                .validate()
                .unwrap_err(),
        );
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["avatar", "name"]);
    }

    #[test]
    fn test_patch_keeps_absent_and_clears_empty() {
        let mut fields = ProfileFields {
            name: "Dana".to_string(),
            phone: Some("555-0100".to_string()),
            location: Some("Austin, TX".to_string()),
            avatar: Some("https://cdn.example.com/a.png".to_string()),
        };
        let patch = dto(json!({ "name": " Dana R ", "phone": "", "avatar": "" }));
        assert!(patch.validate().is_ok());

        patch.apply_to(&mut fields);
        assert_eq!(fields.name, "Dana R");
        assert_eq!(fields.phone, None);
        assert_eq!(fields.location.as_deref(), Some("Austin, TX"));
        assert_eq!(fields.avatar, None);
    }
}
