//! Court families and their type catalogs
//!
//! Every court on the site belongs to exactly one family. The family decides
//! which type codes are legal, how the catalog page is enumerated and which
//! identifier is used for URL lookup.

use std::fmt;
use std::str::FromStr;

/// Closed set of court families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourtFamily {
    /// Appellate and commercial/administrative courts scoped to a region
    Regional,
    /// Local courts scoped to a district of a region
    District,
    /// Courts scoped to a district of a city
    CityDistrict,
}

/// Regional family: code -> label
const REGIONAL_TYPES: &[(u8, &str)] = &[
    (1, "Апеляційний суд"),
    (3, "Апеляційний господарський суд"),
    (4, "Апеляційний адміністративний суд"),
    (10, "Місцевий господарський суд"),
    (11, "Окружний адміністративний суд"),
];

const DISTRICT_TYPES: &[(u8, &str)] = &[
    (5, "Районний суд"),
    (6, "Міськрайонний суд"),
    (7, "Міський суд"),
];

const CITY_DISTRICT_TYPES: &[(u8, &str)] = &[(8, "Районний у місті суд")];

impl CourtFamily {
    /// Order in which a full run processes the families
    pub const RUN_ORDER: [CourtFamily; 3] = [
        CourtFamily::CityDistrict,
        CourtFamily::Regional,
        CourtFamily::District,
    ];

    /// Static type catalog of this family
    pub fn court_types(self) -> &'static [(u8, &'static str)] {
        match self {
            CourtFamily::Regional => REGIONAL_TYPES,
            CourtFamily::District => DISTRICT_TYPES,
            CourtFamily::CityDistrict => CITY_DISTRICT_TYPES,
        }
    }

    /// Type codes in declaration order
    pub fn type_codes(self) -> impl Iterator<Item = u8> {
        self.court_types().iter().map(|(code, _)| *code)
    }

    /// Display label for a code, `None` if the code belongs to another family
    pub fn type_label(self, type_id: u8) -> Option<&'static str> {
        self.court_types()
            .iter()
            .find(|(code, _)| *code == type_id)
            .map(|(_, label)| *label)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CourtFamily::Regional => "regional",
            CourtFamily::District => "district",
            CourtFamily::CityDistrict => "city-district",
        }
    }
}

impl fmt::Display for CourtFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourtFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regional" => Ok(CourtFamily::Regional),
            "district" => Ok(CourtFamily::District),
            "city-district" | "city_district" | "citydistrict" => Ok(CourtFamily::CityDistrict),
            other => Err(format!("unknown court family: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, CourtFamily::Regional, "Апеляційний суд")]
    #[case(4, CourtFamily::Regional, "Апеляційний адміністративний суд")]
    #[case(11, CourtFamily::Regional, "Окружний адміністративний суд")]
    #[case(5, CourtFamily::District, "Районний суд")]
    #[case(7, CourtFamily::District, "Міський суд")]
    #[case(8, CourtFamily::CityDistrict, "Районний у місті суд")]
    fn test_type_code_dispatch(#[case] code: u8, #[case] family: CourtFamily, #[case] label: &str) {
        assert_eq!(family.type_label(code), Some(label));
        let owners: Vec<_> = CourtFamily::RUN_ORDER
            .into_iter()
            .filter(|f| f.type_label(code).is_some())
            .collect();
        assert_eq!(owners, vec![family]);
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[case(9)]
    #[case(12)]
    fn test_unknown_codes_have_no_family(#[case] code: u8) {
        assert!(CourtFamily::RUN_ORDER
            .iter()
            .all(|family| family.type_label(code).is_none()));
    }

    #[test]
    fn test_families_do_not_share_codes() {
        for family in CourtFamily::RUN_ORDER {
            for code in family.type_codes() {
                let owners = CourtFamily::RUN_ORDER
                    .iter()
                    .filter(|f| f.type_label(code).is_some())
                    .count();
                assert_eq!(owners, 1, "code {code} declared by {owners} families");
            }
        }
    }

    #[test]
    fn test_family_parsing() {
        assert_eq!("city-district".parse::<CourtFamily>(), Ok(CourtFamily::CityDistrict));
        assert_eq!("Regional".parse::<CourtFamily>(), Ok(CourtFamily::Regional));
        assert!("appeal".parse::<CourtFamily>().is_err());
    }
}
