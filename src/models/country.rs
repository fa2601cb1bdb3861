use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryMeta {
    pub code: &'static str,
    pub name: &'static str,
    pub currency: &'static str,
    pub symbol: &'static str,
    pub hourly_rate_minor: i64,
}
