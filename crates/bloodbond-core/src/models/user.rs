//! Donor user record model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::RegionId;
use crate::util::title_case;

/// ABO/Rh blood group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
}

impl BloodGroup {
    /// All groups in display order
    pub const ALL: [Self; 8] = [
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::OPositive,
        Self::ONegative,
        Self::AbPositive,
        Self::AbNegative,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BloodGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|group| group.label() == wanted)
            .ok_or_else(|| format!("unknown blood group '{}'", s.trim()))
    }
}

/// Account role assigned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Every new signup starts as a donor
    #[default]
    Donor,
    Volunteer,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Volunteer => "volunteer",
            Self::Admin => "admin",
        }
    }

    /// Title-cased role for display, e.g. `Donor`
    #[must_use]
    pub fn label(self) -> String {
        title_case(self.as_str())
    }
}

/// User record owned by the remote user service, keyed by email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    #[serde(default)]
    pub name: String,
    /// Older signups stored the photo under `image`
    #[serde(default, rename = "photoURL", alias = "image")]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_blood_group")]
    pub blood_group: Option<BloodGroup>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub division_id: Option<RegionId>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub district_id: Option<RegionId>,
    #[serde(default)]
    pub upazila: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_status")]
    pub status: bool,
}

impl UserRecord {
    /// Apply the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if patch.photo_url.is_some() {
            self.photo_url.clone_from(&patch.photo_url);
        }
        if patch.blood_group.is_some() {
            self.blood_group = patch.blood_group;
        }
        if patch.division.is_some() {
            self.division.clone_from(&patch.division);
        }
        if patch.division_id.is_some() {
            self.division_id.clone_from(&patch.division_id);
        }
        if patch.district.is_some() {
            self.district.clone_from(&patch.district);
        }
        if patch.district_id.is_some() {
            self.district_id.clone_from(&patch.district_id);
        }
        if let Some(upazila) = &patch.upazila {
            self.upazila.clone_from(upazila);
        }
    }
}

/// Partial update sent with `PATCH /user/{email}`; absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division_id: Option<RegionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_id: Option<RegionId>,
    /// `Some(None)` clears the stored upazila and is sent as `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upazila: Option<Option<String>>,
}

impl UserPatch {
    /// Patch touching only the photo field
    #[must_use]
    pub fn photo(url: impl Into<String>) -> Self {
        Self {
            photo_url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// Full record created with `POST /users` at signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
    pub blood_group: BloodGroup,
    pub division: String,
    pub district: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upazila: Option<String>,
    pub role: Role,
    pub status: bool,
}

const fn default_status() -> bool {
    true
}

fn lenient_blood_group<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<BloodGroup>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}
