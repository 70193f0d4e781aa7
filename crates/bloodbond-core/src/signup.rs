//! One-shot account creation.

use thiserror::Error;

use crate::api::UserDirectory;
use crate::auth::{AuthError, AuthSession, IdentityProvider, MIN_PASSWORD_LENGTH};
use crate::error::Error;
use crate::location::LocationSelector;
use crate::media::{ImageFile, ImageHost};
use crate::models::{BloodGroup, NewUser, Role};

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Profile image is required")]
    ImageRequired,
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
    #[error("Blood group is required")]
    BloodGroupRequired,
    #[error("Division is required")]
    DivisionRequired,
    #[error("District is required")]
    DistrictRequired,
    #[error("Image upload failed: {0}")]
    Upload(Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Could not save your donor record: {0}")]
    Backend(Error),
}

impl SignupError {
    /// Whether this failure was caught before any remote call.
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::Upload(_) | Self::Auth(_) | Self::Backend(_))
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(error) => error.user_message(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub blood_group: Option<BloodGroup>,
    pub image: Option<ImageFile>,
    pub location: LocationSelector,
}

/// A signup that passed local validation.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub blood_group: BloodGroup,
    pub image: ImageFile,
    pub division: String,
    pub district: String,
    pub upazila: Option<String>,
}

impl SignupForm {
    /// Check required fields; the image comes first since nothing remote
    /// may run without it.
    pub fn validate(&self) -> Result<SignupRequest, SignupError> {
        let image = self
            .image
            .clone()
            .filter(|image| !image.is_empty())
            .ok_or(SignupError::ImageRequired)?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SignupError::NameRequired);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(SignupError::EmailRequired);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SignupError::PasswordTooShort);
        }
        let blood_group = self.blood_group.ok_or(SignupError::BloodGroupRequired)?;
        let division = self
            .location
            .division_id()
            .and(self.location.division_name())
            .ok_or(SignupError::DivisionRequired)?;
        let district = self
            .location
            .district_id()
            .and(self.location.district_name())
            .ok_or(SignupError::DistrictRequired)?;

        Ok(SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            blood_group,
            image,
            division,
            district,
            upazila: self.location.upazila_name(),
        })
    }
}

/// Upload the photo, create the account, set its profile, then create
/// the donor record.
///
/// The first failing step aborts the rest. Completed steps are not undone:
/// if the record write fails the account still exists.
pub async fn submit_signup<H, I, U>(
    host: &H,
    identity: &I,
    users: &U,
    request: &SignupRequest,
) -> Result<AuthSession, SignupError>
where
    H: ImageHost,
    I: IdentityProvider,
    U: UserDirectory,
{
    let photo_url = host
        .upload(&request.image)
        .await
        .map_err(SignupError::Upload)?;
    let session = identity
        .create_account(&request.email, &request.password)
        .await?;
    let session = identity
        .update_profile(&session, &request.name, &photo_url)
        .await?;

    let record = NewUser {
        name: request.name.clone(),
        email: request.email.clone(),
        photo_url,
        blood_group: request.blood_group,
        division: request.division.clone(),
        district: request.district.clone(),
        upazila: request.upazila.clone(),
        role: Role::Donor,
        status: true,
    };
    users
        .create_user(&record)
        .await
        .map_err(SignupError::Backend)?;

    tracing::info!("Created donor account for {}", request.email);
    Ok(session)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::location::fetch_districts;
    use crate::models::RegionId;
    use crate::test_support::{FakeDirectory, FakeIdentity, FakeImageHost, FakeUsers};

    async fn filled_form() -> SignupForm {
        use crate::api::RegionDirectory;

        let directory = FakeDirectory::bangladesh();
        let mut form = SignupForm {
            name: "Karim".to_string(),
            email: "karim@example.com".to_string(),
            password: "secret1".to_string(),
            blood_group: Some(BloodGroup::BPositive),
            image: Some(ImageFile::new(
                "karim.jpg",
                Some("image/jpeg".to_string()),
                vec![255, 216, 255],
            )),
            ..SignupForm::default()
        };
        form.location.receive_divisions(directory.divisions().await);
        let ticket = form
            .location
            .select_division(Some(RegionId::from("6")))
            .unwrap();
        form.location
            .receive_districts(fetch_districts(&directory, ticket).await);
        form.location.select_district(Some(RegionId::from("61")));
        form
    }

    #[tokio::test]
    async fn missing_image_blocks_every_remote_call() {
        let host = FakeImageHost::returning("https://i.ibb.co/k.png");
        let identity = FakeIdentity::default();
        let users = FakeUsers::default();
        let mut form = filled_form().await;
        form.image = None;

        let error = form.validate().unwrap_err();
        assert!(matches!(error, SignupError::ImageRequired));
        assert!(error.is_validation());

        form.image = Some(ImageFile::new("empty.png", None, Vec::new()));
        assert!(matches!(form.validate(), Err(SignupError::ImageRequired)));

        assert_eq!(host.uploads(), 0);
        assert!(identity.created_accounts().is_empty());
        assert!(users.created().is_empty());
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let mut form = filled_form().await;
        form.password = "12345".to_string();
        assert!(matches!(form.validate(), Err(SignupError::PasswordTooShort)));
    }

    #[tokio::test]
    async fn district_is_required() {
        let mut form = filled_form().await;
        form.location.select_district(None);
        assert!(matches!(form.validate(), Err(SignupError::DistrictRequired)));
    }

    #[tokio::test]
    async fn successful_signup_creates_donor_record_with_division_name() {
        let host = FakeImageHost::returning("https://i.ibb.co/k.png");
        let identity = FakeIdentity::default();
        let users = FakeUsers::default();
        let request = filled_form().await.validate().unwrap();

        let session = submit_signup(&host, &identity, &users, &request)
            .await
            .unwrap();

        assert_eq!(session.user.email.as_deref(), Some("karim@example.com"));
        assert_eq!(identity.created_accounts(), vec!["karim@example.com".to_string()]);
        assert_eq!(
            identity.profile_updates(),
            vec![("Karim".to_string(), "https://i.ibb.co/k.png".to_string())]
        );
        let created = users.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].division, "Rajshahi");
        assert_eq!(created[0].district, "Bogura");
        assert_eq!(created[0].role, Role::Donor);
        assert!(created[0].status);
    }

    #[tokio::test]
    async fn upload_failure_stops_before_account_creation() {
        let host = FakeImageHost::failing();
        let identity = FakeIdentity::default();
        let users = FakeUsers::default();
        let request = filled_form().await.validate().unwrap();

        let error = submit_signup(&host, &identity, &users, &request)
            .await
            .unwrap_err();

        assert!(matches!(error, SignupError::Upload(_)));
        assert!(identity.created_accounts().is_empty());
        assert!(users.created().is_empty());
    }

    #[tokio::test]
    async fn account_error_code_is_surfaced() {
        let host = FakeImageHost::returning("https://i.ibb.co/k.png");
        let identity = FakeIdentity::rejecting_signup("EMAIL_EXISTS");
        let users = FakeUsers::default();
        let request = filled_form().await.validate().unwrap();

        let error = submit_signup(&host, &identity, &users, &request)
            .await
            .unwrap_err();

        assert_eq!(error.user_message(), "auth/email-already-in-use");
        assert!(users.created().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_leaves_account_in_place() {
        let host = FakeImageHost::returning("https://i.ibb.co/k.png");
        let identity = FakeIdentity::default();
        let users = FakeUsers::failing();
        let request = filled_form().await.validate().unwrap();

        let error = submit_signup(&host, &identity, &users, &request)
            .await
            .unwrap_err();

        assert!(matches!(error, SignupError::Backend(_)));
        assert_eq!(identity.created_accounts().len(), 1);
    }
}
