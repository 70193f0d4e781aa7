//! In-memory stand-ins for the remote services, shared by unit tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::api::{RegionDirectory, UserDirectory};
use crate::auth::{AuthError, AuthResult, AuthSession, AuthUser, IdentityProvider};
use crate::error::{Error, Result};
use crate::media::{ImageFile, ImageHost};
use crate::models::{
    BloodGroup, District, Division, NewUser, RegionId, Role, Upazila, UserPatch, UserRecord,
};

pub fn session_for(email: &str) -> AuthSession {
    AuthSession {
        id_token: format!("id-{email}"),
        refresh_token: format!("refresh-{email}"),
        expires_at: i64::MAX,
        user: AuthUser {
            uid: format!("uid-{email}"),
            email: Some(email.to_string()),
            display_name: None,
            photo_url: None,
        },
    }
}

pub fn sample_record() -> UserRecord {
    UserRecord {
        email: "rahim@example.com".to_string(),
        name: "Rahim".to_string(),
        photo_url: Some("https://i.ibb.co/x/rahim.png".to_string()),
        blood_group: Some(BloodGroup::OPositive),
        division: Some("Dhaka".to_string()),
        division_id: None,
        district: Some("Gazipur".to_string()),
        district_id: None,
        upazila: None,
        role: Role::Donor,
        status: true,
    }
}

fn remote_failure() -> Error {
    Error::Api {
        status: 500,
        message: "backend unavailable".to_string(),
    }
}

/// Region lists keyed by parent id.
#[derive(Debug, Clone, Default)]
pub struct FakeDirectory {
    divisions: Vec<Division>,
    districts: BTreeMap<String, Vec<District>>,
    upazilas: BTreeMap<String, Vec<Upazila>>,
}

impl FakeDirectory {
    pub fn bangladesh() -> Self {
        let mut directory = Self::default();
        directory.add_division("3", "Dhaka", &[
            ("41", "Gazipur", &["Kaliakair", "Kapasia"]),
            ("42", "Narayanganj", &["Rupganj", "Sonargaon"]),
        ]);
        directory.add_division("6", "Rajshahi", &[
            ("61", "Bogura", &["Sherpur"]),
            ("62", "Pabna", &["Ishwardi"]),
        ]);
        directory
    }

    pub fn division_list(&self) -> Vec<Division> {
        self.divisions.clone()
    }

    fn add_division(&mut self, id: &str, name: &str, districts: &[(&str, &str, &[&str])]) {
        self.divisions.push(Division {
            id: RegionId::from(id),
            name: name.to_string(),
        });
        let mut children = Vec::new();
        for (district_id, district_name, upazilas) in districts {
            children.push(District {
                id: RegionId::from(*district_id),
                name: (*district_name).to_string(),
                division_id: Some(RegionId::from(id)),
            });
            self.upazilas.insert(
                (*district_id).to_string(),
                upazilas
                    .iter()
                    .map(|upazila| Upazila {
                        id: None,
                        name: (*upazila).to_string(),
                    })
                    .collect(),
            );
        }
        self.districts.insert(id.to_string(), children);
    }
}

impl RegionDirectory for FakeDirectory {
    async fn divisions(&self) -> Result<Vec<Division>> {
        Ok(self.divisions.clone())
    }

    async fn districts(&self, division_id: &RegionId) -> Result<Vec<District>> {
        Ok(self
            .districts
            .get(division_id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn upazilas(&self, district_id: &RegionId) -> Result<Vec<Upazila>> {
        Ok(self
            .upazilas
            .get(district_id.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeUsers {
    fail: bool,
    patches: Arc<Mutex<Vec<(String, UserPatch)>>>,
    created: Arc<Mutex<Vec<NewUser>>>,
}

impl FakeUsers {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn patches(&self) -> Vec<(String, UserPatch)> {
        self.patches.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<NewUser> {
        self.created.lock().unwrap().clone()
    }
}

impl UserDirectory for FakeUsers {
    async fn fetch_user(&self, email: &str) -> Result<UserRecord> {
        if self.fail {
            return Err(remote_failure());
        }
        let mut record = sample_record();
        record.email = email.to_string();
        Ok(record)
    }

    async fn update_user(&self, email: &str, patch: &UserPatch) -> Result<()> {
        if self.fail {
            return Err(remote_failure());
        }
        self.patches
            .lock()
            .unwrap()
            .push((email.to_string(), patch.clone()));
        Ok(())
    }

    async fn create_user(&self, user: &NewUser) -> Result<()> {
        if self.fail {
            return Err(remote_failure());
        }
        self.created.lock().unwrap().push(user.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeIdentity {
    fail_all: bool,
    signup_error: Option<String>,
    created_accounts: Arc<Mutex<Vec<String>>>,
    profile_updates: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeIdentity {
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn rejecting_signup(code: &str) -> Self {
        Self {
            signup_error: Some(code.to_string()),
            ..Self::default()
        }
    }

    pub fn created_accounts(&self) -> Vec<String> {
        self.created_accounts.lock().unwrap().clone()
    }

    pub fn profile_updates(&self) -> Vec<(String, String)> {
        self.profile_updates.lock().unwrap().clone()
    }

    fn check(&self) -> AuthResult<()> {
        if self.fail_all {
            return Err(AuthError::Api("INTERNAL_ERROR".to_string()));
        }
        Ok(())
    }
}

impl IdentityProvider for FakeIdentity {
    async fn create_account(&self, email: &str, _password: &str) -> AuthResult<AuthSession> {
        self.check()?;
        if let Some(code) = &self.signup_error {
            return Err(AuthError::Api(code.clone()));
        }
        self.created_accounts.lock().unwrap().push(email.to_string());
        Ok(session_for(email))
    }

    async fn sign_in(&self, email: &str, _password: &str) -> AuthResult<AuthSession> {
        self.check()?;
        Ok(session_for(email))
    }

    async fn update_profile(
        &self,
        session: &AuthSession,
        display_name: &str,
        photo_url: &str,
    ) -> AuthResult<AuthSession> {
        self.check()?;
        self.profile_updates
            .lock()
            .unwrap()
            .push((display_name.to_string(), photo_url.to_string()));
        let mut updated = session.clone();
        updated.user.display_name = Some(display_name.to_string());
        updated.user.photo_url = Some(photo_url.to_string());
        Ok(updated)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeImageHost {
    url: Option<String>,
    uploads: Arc<Mutex<usize>>,
}

impl FakeImageHost {
    pub fn returning(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> usize {
        *self.uploads.lock().unwrap()
    }
}

impl ImageHost for FakeImageHost {
    async fn upload(&self, _image: &ImageFile) -> Result<String> {
        *self.uploads.lock().unwrap() += 1;
        self.url
            .clone()
            .ok_or_else(|| Error::Upload("image host reported failure".to_string()))
    }
}
