//! Electricity mix zones and the labels of their impact factors.

use serde::Serialize;

/// A zone for which an electricity mix is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    /// ISO 3166-1 alpha-3 code, or `WOR` for the world average.
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

impl Country {
    /// Name shown in the zone selector, e.g. `"🇫🇷 France"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.flag, self.name)
    }
}

pub const COUNTRIES: [Country; 50] = [
    Country {
        code: "WOR",
        name: "World",
        flag: "🌍",
    },
    Country {
        code: "AUS",
        name: "Australia",
        flag: "🇦🇺",
    },
    Country {
        code: "AUT",
        name: "Austria",
        flag: "🇦🇹",
    },
    Country {
        code: "ARG",
        name: "Argentina",
        flag: "🇦🇷",
    },
    Country {
        code: "BEL",
        name: "Belgium",
        flag: "🇧🇪",
    },
    Country {
        code: "BGR",
        name: "Bulgaria",
        flag: "🇧🇬",
    },
    Country {
        code: "BRA",
        name: "Brazil",
        flag: "🇧🇷",
    },
    Country {
        code: "CAN",
        name: "Canada",
        flag: "🇨🇦",
    },
    Country {
        code: "CHE",
        name: "Switzerland",
        flag: "🇨🇭",
    },
    Country {
        code: "CHL",
        name: "Chile",
        flag: "🇨🇱",
    },
    Country {
        code: "CHN",
        name: "China",
        flag: "🇨🇳",
    },
    Country {
        code: "CYP",
        name: "Cyprus",
        flag: "🇨🇾",
    },
    Country {
        code: "CZE",
        name: "Czech Republic",
        flag: "🇨🇿",
    },
    Country {
        code: "DEU",
        name: "Germany",
        flag: "🇩🇪",
    },
    Country {
        code: "DNK",
        name: "Denmark",
        flag: "🇩🇰",
    },
    Country {
        code: "ESP",
        name: "Spain",
        flag: "🇪🇸",
    },
    Country {
        code: "EST",
        name: "Estonia",
        flag: "🇪🇪",
    },
    Country {
        code: "FIN",
        name: "Finland",
        flag: "🇫🇮",
    },
    Country {
        code: "FRA",
        name: "France",
        flag: "🇫🇷",
    },
    Country {
        code: "GBR",
        name: "United Kingdom",
        flag: "🇬🇧",
    },
    Country {
        code: "GRC",
        name: "Greece",
        flag: "🇬🇷",
    },
    Country {
        code: "HUN",
        name: "Hungary",
        flag: "🇭🇺",
    },
    Country {
        code: "IDN",
        name: "Indonesia",
        flag: "🇮🇩",
    },
    Country {
        code: "IND",
        name: "India",
        flag: "🇮🇳",
    },
    Country {
        code: "IRL",
        name: "Ireland",
        flag: "🇮🇪",
    },
    Country {
        code: "ISL",
        name: "Iceland",
        flag: "🇮🇸",
    },
    Country {
        code: "ITA",
        name: "Italy",
        flag: "🇮🇹",
    },
    Country {
        code: "JPN",
        name: "Japan",
        flag: "🇯🇵",
    },
    Country {
        code: "KOR",
        name: "South Korea",
        flag: "🇰🇷",
    },
    Country {
        code: "LTU",
        name: "Lithuania",
        flag: "🇱🇹",
    },
    Country {
        code: "LUX",
        name: "Luxembourg",
        flag: "🇱🇺",
    },
    Country {
        code: "LVA",
        name: "Latvia",
        flag: "🇱🇻",
    },
    Country {
        code: "MEX",
        name: "Mexico",
        flag: "🇲🇽",
    },
    Country {
        code: "MLT",
        name: "Malta",
        flag: "🇲🇹",
    },
    Country {
        code: "MYS",
        name: "Malaysia",
        flag: "🇲🇾",
    },
    Country {
        code: "NLD",
        name: "Netherlands",
        flag: "🇳🇱",
    },
    Country {
        code: "NOR",
        name: "Norway",
        flag: "🇳🇴",
    },
    Country {
        code: "NZL",
        name: "New Zealand",
        flag: "🇳🇿",
    },
    Country {
        code: "POL",
        name: "Poland",
        flag: "🇵🇱",
    },
    Country {
        code: "PRT",
        name: "Portugal",
        flag: "🇵🇹",
    },
    Country {
        code: "ROU",
        name: "Romania",
        flag: "🇷🇴",
    },
    Country {
        code: "RUS",
        name: "Russian Federation",
        flag: "🇷🇺",
    },
    Country {
        code: "SVK",
        name: "Slovak Republic",
        flag: "🇸🇰",
    },
    Country {
        code: "SVN",
        name: "Slovenia",
        flag: "🇸🇮",
    },
    Country {
        code: "SWE",
        name: "Sweden",
        flag: "🇸🇪",
    },
    Country {
        code: "UKR",
        name: "Ukraine",
        flag: "🇺🇦",
    },
    Country {
        code: "THA",
        name: "Thailand",
        flag: "🇹🇭",
    },
    Country {
        code: "TUR",
        name: "Turkey",
        flag: "🇹🇷",
    },
    Country {
        code: "TWN",
        name: "Taiwan",
        flag: "🇹🇼",
    },
    Country {
        code: "USA",
        name: "United States",
        flag: "🇺🇸",
    },
];

/// Code of the zone selected by default.
pub const DEFAULT_COUNTRY_CODE: &str = "WOR";

/// Looks up a zone by its exact, upper-case code.
#[must_use]
pub fn country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code == code)
}

/// Display name of the zone with the given code.
#[must_use]
pub fn country_name(code: &str) -> Option<String> {
    country(code).map(Country::display_name)
}

/// Impact factors published for each electricity mix, with their labels.
pub const MIX_CRITERIA: [(&str, &str); 4] = [
    ("gwp", "GHG Emission (kg CO2 eq)"),
    ("adpe", "Abiotic Resources (kg Sb eq)"),
    ("pe", "Primary Energy (MJ)"),
    ("wue", "Water Usage Effectiveness (L/kWh)"),
];

#[must_use]
pub fn criterion_label(criterion: &str) -> Option<&'static str> {
    MIX_CRITERIA
        .iter()
        .find(|(key, _)| *key == criterion)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_country_name() {
        assert_eq!(country_name("USA").unwrap(), "🇺🇸 United States");
        assert_eq!(country_name("FRA").unwrap(), "🇫🇷 France");
        assert_eq!(country_name("WOR").unwrap(), "🌍 World");
    }

    #[test]
    fn test_unknown_country() {
        assert_eq!(country_name("XXX"), None);
        assert_eq!(country_name(""), None);
        // Codes are case sensitive
        assert_eq!(country_name("usa"), None);
    }

    #[test]
    fn test_codes_unique() {
        let codes: HashSet<_> = COUNTRIES.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), COUNTRIES.len());
        assert!(country(DEFAULT_COUNTRY_CODE).is_some());
        assert!(COUNTRIES.iter().all(|c| c.code.len() == 3));
    }

    #[test]
    fn test_criterion_labels() {
        assert_eq!(criterion_label("gwp"), Some("GHG Emission (kg CO2 eq)"));
        assert_eq!(criterion_label("adpe"), Some("Abiotic Resources (kg Sb eq)"));
        assert_eq!(criterion_label("pe"), Some("Primary Energy (MJ)"));
        assert_eq!(
            criterion_label("wue"),
            Some("Water Usage Effectiveness (L/kWh)")
        );
        assert_eq!(criterion_label("invalid"), None);
        assert_eq!(criterion_label(""), None);
    }
}
