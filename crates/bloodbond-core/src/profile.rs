//! Profile page state: the displayed record and the edit form.

use thiserror::Error;

use crate::api::UserDirectory;
use crate::auth::{AuthError, AuthSession, IdentityProvider};
use crate::error::Error;
use crate::location::LocationSelector;
use crate::media::{ImageFile, ImageHost};
use crate::models::{BloodGroup, UserPatch, UserRecord};
use crate::util::normalize_text_option;

const GENERIC_FAILURE: &str = "Failed to update profile. Please try again.";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Name is required")]
    NameRequired,
    #[error("Division is required")]
    DivisionRequired,
    #[error("District is required")]
    DistrictRequired,
    #[error("Identity update failed: {0}")]
    Identity(#[from] AuthError),
    #[error("Profile update failed: {0}")]
    Backend(#[from] Error),
}

impl ProfileError {
    /// Validation problems are specific; remote failures stay generic
    /// because one half of the update may already have applied.
    pub fn user_message(&self) -> String {
        match self {
            Self::NameRequired | Self::DivisionRequired | Self::DistrictRequired => {
                self.to_string()
            }
            Self::Identity(_) | Self::Backend(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Fields compared by the dirty check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub name: String,
    pub photo_url: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub division: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

impl ProfileFields {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            name: record.name.trim().to_string(),
            photo_url: normalize_text_option(record.photo_url.clone()),
            blood_group: record.blood_group,
            division: normalize_text_option(record.division.clone()),
            district: normalize_text_option(record.district.clone()),
            upazila: normalize_text_option(record.upazila.clone()),
        }
    }
}

/// Editable copy of the profile opened by "Edit".
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    snapshot: ProfileFields,
    pub name: String,
    pub photo_url: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub location: LocationSelector,
}

impl ProfileEditor {
    pub fn open(record: &UserRecord) -> Self {
        let snapshot = ProfileFields::from_record(record);
        Self {
            name: snapshot.name.clone(),
            photo_url: snapshot.photo_url.clone(),
            blood_group: snapshot.blood_group,
            location: LocationSelector::from_names(
                snapshot.division.clone(),
                snapshot.district.clone(),
                snapshot.upazila.clone(),
            ),
            snapshot,
        }
    }

    pub const fn snapshot(&self) -> &ProfileFields {
        &self.snapshot
    }

    /// Current form values. A blank photo URL keeps the stored photo.
    pub fn current_fields(&self) -> ProfileFields {
        ProfileFields {
            name: self.name.trim().to_string(),
            photo_url: normalize_text_option(self.photo_url.clone())
                .or_else(|| self.snapshot.photo_url.clone()),
            blood_group: self.blood_group,
            division: self.location.division_name(),
            district: self.location.district_name(),
            upazila: self.location.upazila_name(),
        }
    }

    /// Save is enabled only while this returns `true`.
    pub fn is_dirty(&self) -> bool {
        self.current_fields() != self.snapshot
    }

    /// Validate and translate the form into the backend patch.
    ///
    /// A stored location can be changed but not removed, and a division
    /// always travels with a district. Whenever a district is sent the
    /// upazila is sent too, as `null` when none is picked, so a stale
    /// upazila never outlives its district.
    pub fn build_patch(&self) -> Result<UserPatch, ProfileError> {
        let fields = self.current_fields();
        if fields.name.is_empty() {
            return Err(ProfileError::NameRequired);
        }
        if fields.division.is_none() && self.snapshot.division.is_some() {
            return Err(ProfileError::DivisionRequired);
        }
        if fields.division.is_some() && fields.district.is_none() {
            return Err(ProfileError::DistrictRequired);
        }
        let upazila = fields.district.as_ref().map(|_| fields.upazila.clone());
        Ok(UserPatch {
            name: Some(fields.name),
            photo_url: fields.photo_url,
            blood_group: fields.blood_group,
            division: fields.division,
            division_id: self.location.division_id().cloned(),
            district: fields.district,
            district_id: self.location.district_id().cloned(),
            upazila,
        })
    }
}

/// State behind the profile page.
#[derive(Debug, Clone)]
pub struct ProfileState {
    record: UserRecord,
    editor: Option<ProfileEditor>,
}

impl ProfileState {
    pub const fn new(record: UserRecord) -> Self {
        Self {
            record,
            editor: None,
        }
    }

    pub const fn record(&self) -> &UserRecord {
        &self.record
    }

    pub const fn editor(&self) -> Option<&ProfileEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut ProfileEditor> {
        self.editor.as_mut()
    }

    pub fn open_editor(&mut self) -> &mut ProfileEditor {
        self.editor.insert(ProfileEditor::open(&self.record))
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Settle a save attempt.
    ///
    /// On success the record takes the saved values and the editor closes,
    /// so the next "Edit" snapshots the saved record. On failure nothing
    /// changes and the message to show is returned.
    pub fn finish_save(
        &mut self,
        patch: &UserPatch,
        outcome: &Result<AuthSession, ProfileError>,
    ) -> Result<(), String> {
        match outcome {
            Ok(_) => {
                self.record.apply(patch);
                self.editor = None;
                Ok(())
            }
            Err(error) => {
                tracing::error!("Profile save failed: {}", error);
                Err(error.user_message())
            }
        }
    }

    /// Record a new photo from the photo-only path; the editor is untouched.
    pub fn apply_photo(&mut self, url: &str) {
        self.record.apply(&UserPatch::photo(url));
    }
}

/// Push a profile edit: identity provider first, then the user record.
///
/// Steps run in order and stop at the first failure; nothing is rolled
/// back.
pub async fn save_profile<I, U>(
    identity: &I,
    users: &U,
    session: &AuthSession,
    email: &str,
    patch: &UserPatch,
) -> Result<AuthSession, ProfileError>
where
    I: IdentityProvider,
    U: UserDirectory,
{
    let name = patch.name.as_deref().unwrap_or_default();
    let photo = patch.photo_url.as_deref().unwrap_or_default();
    let updated = identity.update_profile(session, name, photo).await?;
    users.update_user(email, patch).await?;
    tracing::info!("Saved profile for {}", email);
    Ok(updated)
}

/// Photo-only update: upload, then patch identity and the record's photo.
pub async fn update_photo<H, I, U>(
    host: &H,
    identity: &I,
    users: &U,
    session: &AuthSession,
    record: &UserRecord,
    image: &ImageFile,
) -> Result<(String, AuthSession), ProfileError>
where
    H: ImageHost,
    I: IdentityProvider,
    U: UserDirectory,
{
    let url = host.upload(image).await?;
    let updated = identity.update_profile(session, &record.name, &url).await?;
    users
        .update_user(&record.email, &UserPatch::photo(url.clone()))
        .await?;
    tracing::info!("Updated profile photo for {}", record.email);
    Ok((url, updated))
}
