use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::dto::job_dto::{QuotePayload, QuoteResponse, ServicePayload};
use crate::models::country::CountryMeta;
use crate::models::job::Service;
use crate::services::country_service::{get_country_meta, CountryRates};
use crate::utils::ids::new_id;

pub const BUDGET_TBD: &str = "Budget TBD";

/// Money arithmetic in minor units. Major units only appear in formatted labels.
pub struct PricingService;

impl PricingService {
    /// The service's own hourly rate, else the average rate of its allowed countries.
    pub fn resolve_hourly_rate(service: &Service, rates: &CountryRates) -> i64 {
        service
            .hourly_rate_minor
            .unwrap_or_else(|| Self::compute_average_rate_per_provider(&service.country_codes, rates))
    }

    /// Explicit price if set, otherwise `round(rate * max(1, minutes / 60) * providers)`.
    pub fn compute_service_price(service: &Service, rates: &CountryRates) -> i64 {
        if let Some(price) = service.price_minor {
            return price;
        }
        let rate = Decimal::from(Self::resolve_hourly_rate(service, rates));
        let hours = (Decimal::from(service.duration_minutes) / Decimal::from(60)).max(Decimal::ONE);
        rate
            .checked_mul(hours)
            .and_then(|amount| amount.checked_mul(Decimal::from(service.providers_required)))
            .map(round_minor)
            .unwrap_or(i64::MAX)
    }

    /// Saturates at `i64::MAX` instead of overflowing.
    pub fn compute_job_total(services: &[Service], rates: &CountryRates) -> i64 {
        services
            .iter()
            .map(|s| Self::compute_service_price(s, rates))
            .fold(0i64, i64::saturating_add)
    }

    /// Total provider headcount across services, saturating at `u32::MAX`.
    pub fn compute_capacity(services: &[Service]) -> u32 {
        services
            .iter()
            .map(|s| s.providers_required)
            .fold(0u32, u32::saturating_add)
    }

    /// Mean hourly rate over the codes that resolve; zero when none do.
    pub fn compute_average_rate_per_provider(country_codes: &[String], rates: &CountryRates) -> i64 {
        let known: Vec<i64> = country_codes
            .iter()
            .filter_map(|code| rates.rate_for(code))
            .collect();
        if known.is_empty() {
            return 0;
        }
        let sum: Decimal = known.iter().copied().map(Decimal::from).sum();
        round_minor(sum / Decimal::from(known.len()))
    }

    /// One provider's share of the service price.
    pub fn price_per_provider(service: &Service, rates: &CountryRates) -> i64 {
        let total = Decimal::from(Self::compute_service_price(service, rates));
        round_minor(total / Decimal::from(service.providers_required.max(1)))
    }

    pub fn format_money(minor: i64, symbol: &str) -> String {
        format!("{} {}", symbol, format_major(minor))
    }

    pub fn format_rate_label(total_minor: i64, symbol: &str) -> String {
        if total_minor == 0 {
            return BUDGET_TBD.to_string();
        }
        format!("{}/job", Self::format_money(total_minor, symbol))
    }

    /// Builds priced services from posted line items. Items without countries
    /// inherit the job's country.
    pub fn resolve_services(
        items: Vec<ServicePayload>,
        country: &CountryMeta,
        rates: &CountryRates,
    ) -> Vec<Service> {
        items
            .into_iter()
            .map(|item| {
                let country_codes = if item.country_codes.is_empty() {
                    vec![country.code.to_string()]
                } else {
                    item.country_codes
                        .iter()
                        .map(|code| code.trim().to_ascii_uppercase())
                        .collect()
                };
                let mut service = Service {
                    id: item.id.unwrap_or_else(|| new_id("svc")),
                    label: item.label,
                    providers_required: item.providers_required,
                    country_codes,
                    price_minor: item.price_minor,
                    hourly_rate_minor: item.hourly_rate_minor,
                    duration_minutes: item.duration_minutes,
                };
                service.price_minor = Some(Self::compute_service_price(&service, rates));
                service
            })
            .collect()
    }

    pub fn quote(payload: QuotePayload, default_country: &str, rates: &CountryRates) -> QuoteResponse {
        let country = get_country_meta(payload.country_code.as_deref().unwrap_or(default_country));
        let services = Self::resolve_services(payload.services, country, rates);
        let total_minor = Self::compute_job_total(&services, rates);

        QuoteResponse {
            country_code: country.code.to_string(),
            currency: country.currency.to_string(),
            capacity: Self::compute_capacity(&services),
            rate_label: Self::format_rate_label(total_minor, country.symbol),
            services,
            total_minor,
        }
    }
}

fn round_minor(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

/// Minor units to a grouped major-unit string: 84000 -> "840", 123450 -> "1,234.5".
fn format_major(minor: i64) -> String {
    let major = Decimal::new(minor, 2).normalize();
    let text = major.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if major.is_sign_negative() && !major.is_zero() {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
