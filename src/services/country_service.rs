use std::collections::HashMap;

use crate::models::country::CountryMeta;

pub const DEFAULT_COUNTRY_CODE: &str = "AE";

static COUNTRIES: [CountryMeta; 6] = [
    CountryMeta {
        code: "AE",
        name: "United Arab Emirates",
        currency: "AED",
        symbol: "AED",
        hourly_rate_minor: 12000,
    },
    CountryMeta {
        code: "SA",
        name: "Saudi Arabia",
        currency: "SAR",
        symbol: "SAR",
        hourly_rate_minor: 11000,
    },
    CountryMeta {
        code: "QA",
        name: "Qatar",
        currency: "QAR",
        symbol: "QAR",
        hourly_rate_minor: 12500,
    },
    CountryMeta {
        code: "KW",
        name: "Kuwait",
        currency: "KWD",
        symbol: "KWD",
        hourly_rate_minor: 1000,
    },
    CountryMeta {
        code: "BH",
        name: "Bahrain",
        currency: "BHD",
        symbol: "BHD",
        hourly_rate_minor: 1200,
    },
    CountryMeta {
        code: "OM",
        name: "Oman",
        currency: "OMR",
        symbol: "OMR",
        hourly_rate_minor: 1250,
    },
];

pub fn list_countries() -> &'static [CountryMeta] {
    &COUNTRIES
}

pub fn find_country_meta(code: &str) -> Option<&'static CountryMeta> {
    let code = code.trim();
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Unknown codes resolve to the default country rather than failing.
pub fn get_country_meta(code: &str) -> &'static CountryMeta {
    find_country_meta(code).unwrap_or(&COUNTRIES[0])
}

/// Hourly rates in minor units keyed by upper-case country code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRates {
    rates: HashMap<String, i64>,
}

impl CountryRates {
    pub fn new(rates: HashMap<String, i64>) -> Self {
        let rates = rates
            .into_iter()
            .map(|(code, rate)| (code.to_ascii_uppercase(), rate))
            .collect();
        Self { rates }
    }

    pub fn standard() -> Self {
        Self::new(
            COUNTRIES
                .iter()
                .map(|c| (c.code.to_string(), c.hourly_rate_minor))
                .collect(),
        )
    }

    pub fn rate_for(&self, code: &str) -> Option<i64> {
        self.rates.get(&code.trim().to_ascii_uppercase()).copied()
    }
}

impl Default for CountryRates {
    fn default() -> Self {
        Self::standard()
    }
}
