//! Court entity and its typed construction parameters

use thiserror::Error;

use super::constants::site::SCHEDULE_WIDTH;
use super::court_type::CourtFamily;
use crate::utils::{normalize_whitespace, truncate_chars};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CourtError {
    #[error("Court type {type_id} is not declared by the {family} family")]
    UnknownCourtType { family: CourtFamily, type_id: u8 },

    #[error("Required field '{field}' is empty for {family} court")]
    EmptyIdentity {
        family: CourtFamily,
        field: &'static str,
    },
}

/// Parameters for a court scoped to a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionalCourtParams {
    pub type_id: u8,
    pub region_id: String,
    pub region_name: String,
}

/// Parameters for a court scoped to a district of a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictCourtParams {
    pub type_id: u8,
    pub region_id: String,
    pub region_name: String,
    pub district_id: String,
    pub district_name: String,
}

/// Parameters for a court scoped to a district of a city.
///
/// The region id is only used while enumerating to look up the region name,
/// it is not part of the court identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityDistrictCourtParams {
    pub type_id: u8,
    pub region_name: String,
    pub district_id: String,
    pub district_name: String,
    pub city_name: String,
}

/// One enumerated parameter set, tagged by family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourtParams {
    Regional(RegionalCourtParams),
    District(DistrictCourtParams),
    CityDistrict(CityDistrictCourtParams),
}

impl CourtParams {
    pub fn family(&self) -> CourtFamily {
        match self {
            CourtParams::Regional(_) => CourtFamily::Regional,
            CourtParams::District(_) => CourtFamily::District,
            CourtParams::CityDistrict(_) => CourtFamily::CityDistrict,
        }
    }

    pub fn type_id(&self) -> u8 {
        match self {
            CourtParams::Regional(p) => p.type_id,
            CourtParams::District(p) => p.type_id,
            CourtParams::CityDistrict(p) => p.type_id,
        }
    }

    pub fn region_id(&self) -> Option<&str> {
        match self {
            CourtParams::Regional(p) => Some(&p.region_id),
            CourtParams::District(p) => Some(&p.region_id),
            CourtParams::CityDistrict(_) => None,
        }
    }

    pub fn district_id(&self) -> Option<&str> {
        match self {
            CourtParams::Regional(_) => None,
            CourtParams::District(p) => Some(&p.district_id),
            CourtParams::CityDistrict(p) => Some(&p.district_id),
        }
    }
}

/// Descriptive fields scraped from a court detail page.
///
/// Every field is optional: a page may stop matching the expected layout
/// half way through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourtDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub site: Option<String>,
    pub schedule: Option<String>,
    pub phones: Option<String>,
}

/// A single court instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Court {
    family: CourtFamily,
    type_id: u8,
    type_name: &'static str,
    region_id: Option<String>,
    region_name: String,
    district_id: Option<String>,
    district_name: Option<String>,
    city_name: Option<String>,

    url: Option<String>,
    name: Option<String>,
    address: Option<String>,
    schedule: Option<String>,
    phones: Option<String>,
    email: Option<String>,
    site: Option<String>,
}

impl Court {
    /// CSV column names, in output order
    pub const CSV_HEADERS: [&'static str; 11] = [
        "Назва суду",
        "Тип суду",
        "Адреса",
        "Область",
        "Розклад",
        "Телефони",
        "email",
        "Сторінка суду",
        "Сайт суду",
        "Район",
        "Місто",
    ];

    /// Build a court from any tagged parameter set
    pub fn new(params: CourtParams) -> Result<Self, CourtError> {
        match params {
            CourtParams::Regional(p) => Self::regional(p),
            CourtParams::District(p) => Self::district(p),
            CourtParams::CityDistrict(p) => Self::city_district(p),
        }
    }

    pub fn regional(params: RegionalCourtParams) -> Result<Self, CourtError> {
        let family = CourtFamily::Regional;
        let type_name = Self::checked_type(family, params.type_id)?;
        Self::require(family, "region_id", &params.region_id)?;
        Ok(Self::blank(
            family,
            params.type_id,
            type_name,
            Some(params.region_id),
            params.region_name,
            None,
            None,
            None,
        ))
    }

    pub fn district(params: DistrictCourtParams) -> Result<Self, CourtError> {
        let family = CourtFamily::District;
        let type_name = Self::checked_type(family, params.type_id)?;
        Self::require(family, "district_id", &params.district_id)?;
        Ok(Self::blank(
            family,
            params.type_id,
            type_name,
            Some(params.region_id),
            params.region_name,
            Some(params.district_id),
            Some(params.district_name),
            None,
        ))
    }

    pub fn city_district(params: CityDistrictCourtParams) -> Result<Self, CourtError> {
        let family = CourtFamily::CityDistrict;
        let type_name = Self::checked_type(family, params.type_id)?;
        Self::require(family, "district_id", &params.district_id)?;
        Ok(Self::blank(
            family,
            params.type_id,
            type_name,
            None,
            params.region_name,
            Some(params.district_id),
            Some(params.district_name),
            Some(params.city_name),
        ))
    }

    fn checked_type(family: CourtFamily, type_id: u8) -> Result<&'static str, CourtError> {
        family
            .type_label(type_id)
            .ok_or(CourtError::UnknownCourtType { family, type_id })
    }

    fn require(family: CourtFamily, field: &'static str, value: &str) -> Result<(), CourtError> {
        if value.trim().is_empty() {
            return Err(CourtError::EmptyIdentity { family, field });
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn blank(
        family: CourtFamily,
        type_id: u8,
        type_name: &'static str,
        region_id: Option<String>,
        region_name: String,
        district_id: Option<String>,
        district_name: Option<String>,
        city_name: Option<String>,
    ) -> Self {
        Self {
            family,
            type_id,
            type_name,
            region_id,
            region_name,
            district_id,
            district_name,
            city_name,
            url: None,
            name: None,
            address: None,
            schedule: None,
            phones: None,
            email: None,
            site: None,
        }
    }

    pub fn family(&self) -> CourtFamily {
        self.family
    }

    pub fn type_id(&self) -> u8 {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn region_id(&self) -> Option<&str> {
        self.region_id.as_deref()
    }

    pub fn region_name(&self) -> &str {
        &self.region_name
    }

    pub fn district_id(&self) -> Option<&str> {
        self.district_id.as_deref()
    }

    pub fn district_name(&self) -> Option<&str> {
        self.district_name.as_deref()
    }

    pub fn city_name(&self) -> Option<&str> {
        self.city_name.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn schedule(&self) -> Option<&str> {
        self.schedule.as_deref()
    }

    pub fn phones(&self) -> Option<&str> {
        self.phones.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    /// Identifier sent as `reg_id` to the URL lookup endpoint.
    ///
    /// Regional courts are looked up by region, the district families by
    /// district. `None` means the court cannot be resolved.
    pub fn lookup_id(&self) -> Option<&str> {
        match self.family {
            CourtFamily::Regional => self.region_id(),
            CourtFamily::District | CourtFamily::CityDistrict => self.district_id(),
        }
        .filter(|id| !id.trim().is_empty())
    }

    pub fn set_url(&mut self, url: String) {
        self.url = Some(url);
    }

    /// Merge scraped fields. Fields missing from `details` keep their value.
    pub fn apply_details(&mut self, details: CourtDetails) {
        let CourtDetails {
            name,
            address,
            email,
            site,
            schedule,
            phones,
        } = details;

        if name.is_some() {
            self.name = name;
        }
        if address.is_some() {
            self.address = address;
        }
        if email.is_some() {
            self.email = email;
        }
        if site.is_some() {
            self.site = site;
        }
        if let Some(schedule) = schedule {
            self.schedule = Some(truncate_chars(schedule.trim(), SCHEDULE_WIDTH));
        }
        if phones.is_some() {
            self.phones = phones;
        }
    }

    /// Human-readable label for logs
    pub fn display_label(&self) -> String {
        match (self.name(), self.district_name(), self.city_name()) {
            (Some(name), _, _) => name.to_string(),
            (None, Some(district), Some(city)) => {
                format!("{} ({}, {})", self.type_name, city, district)
            }
            (None, Some(district), None) => {
                format!("{} ({}, {})", self.type_name, self.region_name, district)
            }
            (None, None, _) => format!("{} ({})", self.type_name, self.region_name),
        }
    }

    /// One normalized CSV record, aligned with [`Court::CSV_HEADERS`]
    pub fn csv_row(&self) -> [String; 11] {
        let cell = |value: Option<&str>| value.map(normalize_whitespace).unwrap_or_default();

        [
            cell(self.name()),
            cell(Some(self.type_name)),
            cell(self.address()),
            cell(Some(self.region_name())),
            cell(self.schedule()),
            cell(self.phones()),
            cell(self.email()),
            cell(self.url()),
            cell(self.site()),
            cell(self.district_name()),
            cell(self.city_name()),
        ]
    }
}
