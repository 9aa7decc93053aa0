//! Rate sources

use crate::{RateError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Something that can report the current USD/JPY rate
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rate(&self) -> Result<f64>;
}

/// Rate payload in either of the two shapes providers send
///
/// `{"rates": {"JPY": 150.1}}` is the canonical shape; the flat
/// `{"base": "USD", "quotes": {"USDJPY": 150.1}}` shape is reshaped into it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProxyPayload {
    Rates {
        rates: HashMap<String, Value>,
    },
    Quotes {
        #[serde(default)]
        base: Option<String>,
        quotes: HashMap<String, Value>,
    },
}

impl ProxyPayload {
    /// Rewrite into the canonical `rates` map; non-numeric entries are dropped
    pub fn into_rates(self) -> HashMap<String, f64> {
        match self {
            Self::Rates { rates } => numeric(rates).collect(),
            Self::Quotes { base, quotes } => {
                let base = base.unwrap_or_else(|| "USD".to_string());
                numeric(quotes)
                    .map(|(pair, rate)| match pair.strip_prefix(base.as_str()) {
                        Some(quote) if !quote.is_empty() => (quote.to_string(), rate),
                        _ => (pair, rate),
                    })
                    .collect()
            }
        }
    }
}

fn numeric(map: HashMap<String, Value>) -> impl Iterator<Item = (String, f64)> {
    map.into_iter().filter_map(|(key, value)| value.as_f64().map(|rate| (key, rate)))
}

/// Extract the JPY rate from a response body
pub fn parse_rate(body: &str) -> Result<f64> {
    let payload: ProxyPayload = serde_json::from_str(body)?;
    payload
        .into_rates()
        .get("JPY")
        .copied()
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .ok_or(RateError::MissingRate)
}

/// HTTP rate source
pub struct HttpRateSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRateSource {
    pub const DEFAULT_ENDPOINT: &'static str = "https://open.er-api.com/v6/latest/USD";

    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rate(&self) -> Result<f64> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let rate = parse_rate(&body)?;
        tracing::debug!("Fetched USD/JPY {} from {}", rate, self.endpoint);
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rates_shape() {
        let body = r#"{"result":"success","base_code":"USD","rates":{"USD":1,"JPY":150.25}}"#;
        assert_eq!(parse_rate(body).unwrap(), 150.25);
    }

    #[test]
    fn test_parse_quotes_shape() {
        let body = r#"{"base":"USD","quotes":{"USDJPY":149.9,"USDEUR":0.92}}"#;
        assert_eq!(parse_rate(body).unwrap(), 149.9);

        let rates = serde_json::from_str::<ProxyPayload>(body).unwrap().into_rates();
        assert_eq!(rates.get("EUR"), Some(&0.92));
    }

    #[test]
    fn test_non_numeric_siblings_ignored() {
        let body = r#"{"rates":{"USD":1,"XDR":null,"note":"delayed","JPY":151.5}}"#;
        assert_eq!(parse_rate(body).unwrap(), 151.5);

        let body = r#"{"base":"USD","quotes":{"USDJPY":149.9,"USDXXX":"n/a"}}"#;
        assert_eq!(parse_rate(body).unwrap(), 149.9);

        assert!(matches!(
            parse_rate(r#"{"rates":{"JPY":"150"}}"#),
            Err(RateError::MissingRate)
        ));
    }

    #[test]
    fn test_missing_or_bad_rate() {
        assert!(matches!(
            parse_rate(r#"{"rates":{"EUR":0.92}}"#),
            Err(RateError::MissingRate)
        ));
        assert!(matches!(
            parse_rate(r#"{"rates":{"JPY":0}}"#),
            Err(RateError::MissingRate)
        ));
        assert!(matches!(parse_rate("<html>"), Err(RateError::Payload(_))));
        assert!(matches!(
            parse_rate(r#"{"result":"error"}"#),
            Err(RateError::Payload(_))
        ));
    }
}
