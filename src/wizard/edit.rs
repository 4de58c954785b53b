use super::schema::{self, FieldKind, FieldSpec};
use crate::api::ApiClient;
use crate::error::{ApiError, AppError};
use crate::models::Role;
use serde_json::{Map, Value};
use tracing::{info, warn};

pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update profile";

/// Editable copy of the caller's own profile.
///
/// Holds the profile as last served and a draft. Only top-level schema
/// fields are editable and sent back; nested sections are read-only here.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    role: Role,
    user_id: i64,
    fields: &'static [FieldSpec],
    loaded: Map<String, Value>,
    draft: Map<String, Value>,
}

fn fields_for(role: Role) -> &'static [FieldSpec] {
    match role {
        Role::Startup => super::startup::PROFILE_FIELDS,
        Role::Investor => super::investor::PROFILE_FIELDS,
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::Decode(format!("expected a profile object, got {}", other))),
    }
}

fn to_object<T: serde::Serialize>(profile: &T) -> Result<Map<String, Value>, ApiError> {
    serde_json::to_value(profile)
        .map_err(|e| ApiError::Decode(e.to_string()))
        .and_then(into_object)
}

impl ProfileEditor {
    /// Fetches the profile owned by `user_id` for `role`.
    pub async fn load(client: &ApiClient, role: Role, user_id: i64) -> Result<Self, ApiError> {
        let profile = match role {
            Role::Startup => to_object(&client.startup_profile_for_user(user_id).await?)?,
            Role::Investor => to_object(&client.investor_profile_for_user(user_id).await?)?,
        };
        Ok(Self::from_profile(role, user_id, profile))
    }

    pub fn from_profile(role: Role, user_id: i64, profile: Map<String, Value>) -> Self {
        Self {
            role,
            user_id,
            fields: fields_for(role),
            draft: profile.clone(),
            loaded: profile,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.draft.get(name)
    }

    /// Human-readable current value of a field.
    pub fn display(&self, name: &str) -> String {
        match self.draft.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            Some(other) => other.to_string(),
        }
    }

    /// Replaces a field in the draft, coerced by its schema kind.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), AppError> {
        let spec = schema::find(self.fields, name)
            .ok_or_else(|| AppError::UnknownField(name.to_string()))?;
        self.draft.insert(spec.name.to_string(), schema::coerce(spec.kind, raw));
        Ok(())
    }

    pub fn toggle(&mut self, name: &str, option: &str, checked: bool) -> Result<(), AppError> {
        let spec = schema::find(self.fields, name)
            .filter(|spec| spec.kind == FieldKind::MultiSelect)
            .ok_or_else(|| AppError::UnknownField(name.to_string()))?;

        let mut selected: Vec<Value> = match self.draft.get(spec.name) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        if checked {
            selected.push(Value::String(option.to_string()));
        } else {
            selected.retain(|item| item.as_str() != Some(option));
        }
        self.draft.insert(spec.name.to_string(), Value::Array(selected));
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.loaded
    }

    /// Drops every draft edit.
    pub fn cancel(&mut self) {
        self.draft = self.loaded.clone();
    }

    /// Body for the update call: editable fields only, blank dates as `null`.
    pub fn changes(&self) -> Value {
        let body: Map<String, Value> = self
            .fields
            .iter()
            .filter_map(|spec| {
                let value = self.draft.get(spec.name)?;
                let value = match (spec.kind, value) {
                    (FieldKind::Date, Value::String(s)) if s.trim().is_empty() => Value::Null,
                    _ => value.clone(),
                };
                Some((spec.name.to_string(), value))
            })
            .collect();
        Value::Object(body)
    }

    /// Sends the draft. On success the server copy becomes the new baseline.
    pub async fn save(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        let changes = self.changes();
        let result = match self.role {
            Role::Startup => client
                .update_startup_profile(self.user_id, &changes)
                .await
                .and_then(|p| to_object(&p)),
            Role::Investor => client
                .update_investor_profile(self.user_id, &changes)
                .await
                .and_then(|p| to_object(&p)),
        };

        match result {
            Ok(updated) => {
                info!(user_id = self.user_id, role = %self.role, "Profile updated");
                self.draft = updated.clone();
                self.loaded = updated;
                Ok(())
            }
            Err(e) => {
                warn!(user_id = self.user_id, "Profile update failed: {}", e);
                Err(e)
            }
        }
    }
}
