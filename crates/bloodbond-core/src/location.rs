//! Cascading division → district → upazila selection.
//!
//! [`LocationSelector`] is a plain state machine. Setters return a
//! [`RegionTicket`] when a dependent list must be fetched; the caller runs
//! the fetch (see [`fetch_districts`] / [`fetch_upazilas`]) and hands the
//! [`RegionResponse`] back. Responses whose ticket is no longer the latest
//! one for their level are dropped, so a slow reply for a previous parent
//! can never overwrite the current lists.
//!
//! Records store regions by name while the cascade queries by id. A
//! selector seeded with [`LocationSelector::from_names`] keeps those names
//! pending and resolves them to ids as each list arrives.

use crate::api::RegionDirectory;
use crate::error::Result;
use crate::models::{District, Division, RegionId, Upazila};
use crate::util::normalize_text_option;

/// Identifies one dependent fetch: the parent it was issued for and its
/// position in the issue order for that level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTicket {
    sequence: u64,
    parent: RegionId,
}

impl RegionTicket {
    pub const fn parent(&self) -> &RegionId {
        &self.parent
    }
}

/// Completed fetch for a ticket.
#[derive(Debug)]
pub struct RegionResponse<T> {
    pub ticket: RegionTicket,
    pub result: Result<Vec<T>>,
}

pub async fn fetch_districts<D: RegionDirectory>(
    directory: &D,
    ticket: RegionTicket,
) -> RegionResponse<District> {
    let result = directory.districts(ticket.parent()).await;
    RegionResponse { ticket, result }
}

pub async fn fetch_upazilas<D: RegionDirectory>(
    directory: &D,
    ticket: RegionTicket,
) -> RegionResponse<Upazila> {
    let result = directory.upazilas(ticket.parent()).await;
    RegionResponse { ticket, result }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PendingNames {
    division: Option<String>,
    district: Option<String>,
    upazila: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LocationSelector {
    divisions: Vec<Division>,
    districts: Vec<District>,
    upazilas: Vec<Upazila>,
    division_id: Option<RegionId>,
    district_id: Option<RegionId>,
    upazila: Option<String>,
    pending: PendingNames,
    issued: u64,
    district_ticket: Option<RegionTicket>,
    upazila_ticket: Option<RegionTicket>,
    last_error: Option<String>,
}

impl LocationSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from names stored on a user record.
    #[must_use]
    pub fn from_names(
        division: Option<String>,
        district: Option<String>,
        upazila: Option<String>,
    ) -> Self {
        Self {
            pending: PendingNames {
                division: normalize_text_option(division),
                district: normalize_text_option(district),
                upazila: normalize_text_option(upazila),
            },
            ..Self::default()
        }
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    pub fn upazilas(&self) -> &[Upazila] {
        &self.upazilas
    }

    pub const fn division_id(&self) -> Option<&RegionId> {
        self.division_id.as_ref()
    }

    pub const fn district_id(&self) -> Option<&RegionId> {
        self.district_id.as_ref()
    }

    pub fn upazila(&self) -> Option<&str> {
        self.upazila.as_deref()
    }

    /// The district control is usable only once its list has loaded.
    pub fn district_enabled(&self) -> bool {
        !self.districts.is_empty()
    }

    pub fn upazila_enabled(&self) -> bool {
        !self.upazilas.is_empty()
    }

    /// Whether a district or upazila fetch is still outstanding.
    pub const fn is_loading(&self) -> bool {
        self.district_ticket.is_some() || self.upazila_ticket.is_some()
    }

    /// Name of the selected division, or the not-yet-resolved stored name.
    pub fn division_name(&self) -> Option<String> {
        match &self.division_id {
            Some(id) => self
                .divisions
                .iter()
                .find(|division| &division.id == id)
                .map(|division| division.name.clone()),
            None => self.pending.division.clone(),
        }
    }

    pub fn district_name(&self) -> Option<String> {
        match &self.district_id {
            Some(id) => self
                .districts
                .iter()
                .find(|district| &district.id == id)
                .map(|district| district.name.clone()),
            None => self.pending.district.clone(),
        }
    }

    pub fn upazila_name(&self) -> Option<String> {
        self.upazila
            .clone()
            .or_else(|| self.pending.upazila.clone())
    }

    /// Most recent fetch failure, cleared when read.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Store the division list; resolves a pending division name.
    pub fn receive_divisions(&mut self, result: Result<Vec<Division>>) -> Option<RegionTicket> {
        self.divisions = self.accept(result, "divisions");

        let wanted = self.pending.division.clone()?;
        let Some(id) = find_id(&self.divisions, &wanted, |division| {
            (&division.id, &division.name)
        }) else {
            tracing::debug!("Stored division {:?} not found in division list", wanted);
            return None;
        };
        self.pending.division = None;
        self.division_id = Some(id.clone());
        Some(self.issue_district_ticket(id))
    }

    /// Select a division (or clear it with `None`).
    ///
    /// Clears district and upazila selections and lists. Returns the ticket
    /// for the district fetch when a division was chosen.
    pub fn select_division(&mut self, id: Option<RegionId>) -> Option<RegionTicket> {
        self.pending = PendingNames::default();
        self.division_id = id.clone();
        self.district_id = None;
        self.upazila = None;
        self.districts.clear();
        self.upazilas.clear();
        self.upazila_ticket = None;
        self.district_ticket = None;

        id.map(|id| self.issue_district_ticket(id))
    }

    /// Apply a district response; stale tickets are ignored.
    ///
    /// Returns the upazila ticket when a pending district name resolved.
    pub fn receive_districts(&mut self, response: RegionResponse<District>) -> Option<RegionTicket> {
        if self.district_ticket.as_ref() != Some(&response.ticket) {
            tracing::debug!(
                "Ignoring stale district list for division {}",
                response.ticket.parent
            );
            return None;
        }
        self.district_ticket = None;
        self.districts = self.accept(response.result, "districts");

        let wanted = self.pending.district.clone()?;
        let Some(id) = find_id(&self.districts, &wanted, |district| {
            (&district.id, &district.name)
        }) else {
            tracing::debug!("Stored district {:?} not found in district list", wanted);
            return None;
        };
        self.pending.district = None;
        self.district_id = Some(id.clone());
        Some(self.issue_upazila_ticket(id))
    }

    /// Select a district (or clear it with `None`); clears the upazila.
    pub fn select_district(&mut self, id: Option<RegionId>) -> Option<RegionTicket> {
        self.pending.district = None;
        self.pending.upazila = None;
        self.district_id = id.clone();
        self.upazila = None;
        self.upazilas.clear();
        self.upazila_ticket = None;

        id.map(|id| self.issue_upazila_ticket(id))
    }

    /// Apply an upazila response; returns `false` for stale tickets.
    pub fn receive_upazilas(&mut self, response: RegionResponse<Upazila>) -> bool {
        if self.upazila_ticket.as_ref() != Some(&response.ticket) {
            tracing::debug!(
                "Ignoring stale upazila list for district {}",
                response.ticket.parent
            );
            return false;
        }
        self.upazila_ticket = None;
        self.upazilas = self.accept(response.result, "upazilas");

        if let Some(wanted) = self.pending.upazila.clone() {
            if let Some(upazila) = self
                .upazilas
                .iter()
                .find(|upazila| upazila.name.trim() == wanted)
            {
                self.upazila = Some(upazila.name.clone());
                self.pending.upazila = None;
            }
        }
        true
    }

    pub fn select_upazila(&mut self, name: Option<String>) {
        self.pending.upazila = None;
        self.upazila = normalize_text_option(name);
    }

    fn issue_district_ticket(&mut self, parent: RegionId) -> RegionTicket {
        self.issued += 1;
        let ticket = RegionTicket {
            sequence: self.issued,
            parent,
        };
        self.district_ticket = Some(ticket.clone());
        ticket
    }

    fn issue_upazila_ticket(&mut self, parent: RegionId) -> RegionTicket {
        self.issued += 1;
        let ticket = RegionTicket {
            sequence: self.issued,
            parent,
        };
        self.upazila_ticket = Some(ticket.clone());
        ticket
    }

    fn accept<T>(&mut self, result: Result<Vec<T>>, what: &str) -> Vec<T> {
        match result {
            Ok(items) => items,
            Err(error) => {
                tracing::error!("Failed to load {}: {}", what, error);
                self.last_error = Some(format!("Could not load {what}. Please try again."));
                Vec::new()
            }
        }
    }
}

fn find_id<T>(
    items: &[T],
    wanted: &str,
    fields: impl Fn(&T) -> (&RegionId, &String),
) -> Option<RegionId> {
    items.iter().find_map(|item| {
        let (id, name) = fields(item);
        (name.trim() == wanted).then(|| id.clone())
    })
}
