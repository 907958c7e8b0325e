//! Enumeration strategies
//!
//! Each court family reads its parameter sets from a different encoding in
//! the shared catalog document: regional courts from the region select
//! alone, district courts from the select joined with the `oblK_<region>`
//! script tables, city-district courts from the `mis1_<region>` and
//! `raj1_<city>` tables.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::constants::site::{CITY_DISTRICT_TABLE, CITY_TABLE, DISTRICT_TABLE_OFFSET};
use crate::domain::{
    CityDistrictCourtParams, CourtFamily, CourtParams, DistrictCourtParams, RegionalCourtParams,
};
use crate::infrastructure::parsing::{CatalogDocument, ParsingResult, ScriptEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationStrategy {
    Regional,
    District,
    CityDistrict,
}

impl EnumerationStrategy {
    pub fn for_family(family: CourtFamily) -> Self {
        match family {
            CourtFamily::Regional => Self::Regional,
            CourtFamily::District => Self::District,
            CourtFamily::CityDistrict => Self::CityDistrict,
        }
    }

    pub fn family(self) -> CourtFamily {
        match self {
            Self::Regional => CourtFamily::Regional,
            Self::District => CourtFamily::District,
            Self::CityDistrict => CourtFamily::CityDistrict,
        }
    }

    /// Every parameter set of one type code
    pub fn enumerate(
        self,
        type_code: u8,
        catalog: &CatalogDocument,
    ) -> ParsingResult<Vec<CourtParams>> {
        let params = match self {
            Self::Regional => Self::regional(type_code, catalog)?,
            Self::District => Self::district(type_code, catalog)?,
            Self::CityDistrict => Self::city_district(type_code, catalog)?,
        };
        debug!(
            "{} type {}: {} parameter sets",
            self.family(),
            type_code,
            params.len()
        );
        Ok(params)
    }

    fn regional(type_code: u8, catalog: &CatalogDocument) -> ParsingResult<Vec<CourtParams>> {
        Ok(catalog
            .region_options(type_code)?
            .iter()
            .map(|region| {
                CourtParams::Regional(RegionalCourtParams {
                    type_id: type_code,
                    region_id: region.id.clone(),
                    region_name: region.name.clone(),
                })
            })
            .collect())
    }

    fn district(type_code: u8, catalog: &CatalogDocument) -> ParsingResult<Vec<CourtParams>> {
        let regions = catalog.region_options(type_code)?;
        let Some(table_number) = type_code.checked_sub(DISTRICT_TABLE_OFFSET) else {
            debug!("Type code {} has no district table", type_code);
            return Ok(Vec::new());
        };
        let table = format!("obl{table_number}");

        let region_ids: HashSet<&str> = regions.iter().map(|r| r.id.as_str()).collect();
        let districts = group_by_key(catalog.script_variables().table(&table), &region_ids);

        let mut params = Vec::new();
        for region in regions {
            for district in districts.get(region.id.as_str()).into_iter().flatten() {
                params.push(CourtParams::District(DistrictCourtParams {
                    type_id: type_code,
                    region_id: region.id.clone(),
                    region_name: region.name.clone(),
                    district_id: district.id.clone(),
                    district_name: district.name.clone(),
                }));
            }
        }
        Ok(params)
    }

    fn city_district(type_code: u8, catalog: &CatalogDocument) -> ParsingResult<Vec<CourtParams>> {
        let region_names: HashMap<&str, &str> = catalog
            .region_options(type_code)?
            .iter()
            .map(|region| (region.id.as_str(), region.name.as_str()))
            .collect();
        let variables = catalog.script_variables();

        // cities in script order, each bound to its region's name
        let mut cities: Vec<(&ScriptEntry, &str)> = Vec::new();
        let mut city_ids = HashSet::new();
        for city in variables.table(CITY_TABLE) {
            let Some(&region_name) = region_names.get(city.key.as_str()) else {
                debug!("Skipping city {} of unknown region {}", city.id, city.key);
                continue;
            };
            if !city_ids.insert(city.id.as_str()) {
                debug!("Skipping duplicate city {}", city.id);
                continue;
            }
            cities.push((city, region_name));
        }

        let districts = group_by_key(variables.table(CITY_DISTRICT_TABLE), &city_ids);

        let mut params = Vec::new();
        for (city, region_name) in cities {
            for district in districts.get(city.id.as_str()).into_iter().flatten() {
                params.push(CourtParams::CityDistrict(CityDistrictCourtParams {
                    type_id: type_code,
                    region_name: region_name.to_string(),
                    district_id: district.id.clone(),
                    district_name: district.name.clone(),
                    city_name: city.name.clone(),
                }));
            }
        }
        Ok(params)
    }
}

/// Entries grouped by the id they reference, source order kept within a
/// group. Entries pointing at an id outside `known` are dropped.
fn group_by_key<'a>(
    entries: impl Iterator<Item = &'a ScriptEntry>,
    known: &HashSet<&str>,
) -> HashMap<&'a str, Vec<&'a ScriptEntry>> {
    let mut groups: HashMap<&'a str, Vec<&'a ScriptEntry>> = HashMap::new();
    for entry in entries {
        if !known.contains(entry.key.as_str()) {
            debug!(
                "Skipping {}_{} entry {}: unknown reference",
                entry.table, entry.key, entry.id
            );
            continue;
        }
        groups.entry(entry.key.as_str()).or_default().push(entry);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ParsingError;
    use crate::test_utils::CATALOG_FIXTURE;

    fn catalog() -> CatalogDocument {
        CatalogDocument::new(CATALOG_FIXTURE)
    }

    #[test]
    fn test_strategy_per_family() {
        for family in CourtFamily::RUN_ORDER {
            assert_eq!(EnumerationStrategy::for_family(family).family(), family);
        }
    }

    #[test]
    fn test_regional_sets_carry_region_and_no_district() {
        let params = EnumerationStrategy::Regional.enumerate(1, &catalog()).unwrap();

        assert_eq!(params.len(), 2);
        for p in &params {
            assert_eq!(p.family(), CourtFamily::Regional);
            assert!(p.region_id().is_some());
            assert!(p.district_id().is_none());
        }
        assert_eq!(
            params[0],
            CourtParams::Regional(RegionalCourtParams {
                type_id: 1,
                region_id: "12".to_string(),
                region_name: "Харківська область".to_string(),
            })
        );
    }

    #[test]
    fn test_district_expands_regions_in_option_then_script_order() {
        let params = EnumerationStrategy::District.enumerate(5, &catalog()).unwrap();

        let districts: Vec<_> = params
            .iter()
            .map(|p| match p {
                CourtParams::District(d) => (d.region_id.as_str(), d.district_id.as_str()),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(districts, vec![("12", "1201"), ("12", "1202"), ("11", "1101")]);
    }

    #[test]
    fn test_district_type_without_table_yields_nothing() {
        let params = EnumerationStrategy::District.enumerate(6, &catalog()).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_single_region_without_script_yields_zero_sets() {
        let catalog = CatalogDocument::new(
            r#"<html><body><form><input type="hidden" name="court_type" value="5"><select name="reg_id"><option value="12">Харківська область</option></select></form></body></html>"#,
        );
        let params = EnumerationStrategy::District.enumerate(5, &catalog).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_city_district_joins_cities_and_regions() {
        let params = EnumerationStrategy::CityDistrict.enumerate(8, &catalog()).unwrap();

        let expected = [
            ("Харківська область", "Харків", "2011", "Київський район"),
            ("Харківська область", "Харків", "2012", "Шевченківський район"),
            ("м. Київ", "Київ", "2611", "Печерський район"),
        ];
        assert_eq!(params.len(), expected.len());
        for (p, (region, city, district_id, district)) in params.iter().zip(expected) {
            let CourtParams::CityDistrict(p) = p else {
                panic!("unexpected {p:?}");
            };
            assert_eq!(p.region_name, region);
            assert_eq!(p.city_name, city);
            assert_eq!(p.district_id, district_id);
            assert_eq!(p.district_name, district);
            assert_eq!(p.type_id, 8);
        }
        assert!(params.iter().all(|p| p.region_id().is_none()));
    }

    #[test]
    fn test_apostrophe_names_survive_enumeration() {
        let catalog = CatalogDocument::new(
            r#"<html><head><script>
obl1_14[0] = "1401:Слов'янський район";
mis1_14[0] = "1501:Слов'янськ";
raj1_1501[0] = "1511:Кам'янський район";
</script></head><body>
<form><input type="hidden" name="court_type" value="5"><select><option value="14">Донецька область</option></select></form>
<form><input type="hidden" name="court_type" value="8"><select><option value="14">Донецька область</option></select></form>
</body></html>"#,
        );

        let district = EnumerationStrategy::District.enumerate(5, &catalog).unwrap();
        let CourtParams::District(district) = &district[0] else {
            panic!("unexpected {district:?}");
        };
        assert_eq!(district.district_name, "Слов'янський район");

        let city = EnumerationStrategy::CityDistrict.enumerate(8, &catalog).unwrap();
        let CourtParams::CityDistrict(city) = &city[0] else {
            panic!("unexpected {city:?}");
        };
        assert_eq!(city.city_name, "Слов'янськ");
        assert_eq!(city.district_name, "Кам'янський район");
    }

    #[test]
    fn test_missing_control_is_an_error_for_that_code_only() {
        let catalog = catalog();
        assert_eq!(
            EnumerationStrategy::Regional.enumerate(3, &catalog),
            Err(ParsingError::CatalogControlMissing { type_code: 3 })
        );
        assert!(EnumerationStrategy::Regional.enumerate(1, &catalog).is_ok());
    }
}
