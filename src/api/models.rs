use crate::errors::ApiError;
use crate::rates::{self, Country};
use axum::{
    body::{to_bytes, Body},
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Same cap as Express' JSON body parser.
const MAX_BODY_BYTES: usize = 100 * 1024;

/// Body of POST /api/convert. Fields stay loosely typed so each validation
/// failure can be reported with its own error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub country_from: Option<Value>,
    pub country_to: Option<Value>,
    pub score: Option<Value>,
}

/// A request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidConversion {
    pub from: Country,
    pub to: Country,
    pub score: f64,
}

impl ConvertRequest {
    /// Anything other than a JSON object carries none of the fields.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Checks run in a fixed order and the first failure wins: presence,
    /// source country, target country, score range.
    pub fn validate(&self) -> Result<ValidConversion, ApiError> {
        let score = match &self.score {
            Some(Value::Number(n)) => n.as_f64(),
            _ => None,
        };
        let (Some(from), Some(to), Some(score)) = (
            present(&self.country_from),
            present(&self.country_to),
            score,
        ) else {
            return Err(ApiError::MissingFields);
        };

        let from = parse_country(from).ok_or(ApiError::InvalidCountryFrom)?;
        let to = parse_country(to).ok_or(ApiError::InvalidCountryTo)?;

        if !rates::in_range(score) {
            return Err(ApiError::ScoreOutOfRange);
        }

        Ok(ValidConversion { from, to, score })
    }
}

/// Reads the body the way Express' JSON parser does: an empty body, a body
/// without a JSON content type, or a JSON value that is not an object all
/// carry no fields. Only unparseable JSON is rejected outright.
impl<S> FromRequest<S> for ConvertRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
            tracing::debug!(error = %e, "unreadable convert body");
            ApiError::MalformedBody
        })?;
        if bytes.is_empty() {
            return Ok(Self::default());
        }

        let req = Request::from_parts(parts, Body::from(bytes));
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(body)) => Ok(Self::from_body(body)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self::default()),
            Err(rejection) => {
                tracing::debug!(%rejection, "unreadable convert body");
                Err(ApiError::MalformedBody)
            }
        }
    }
}

/// Absent, null, false, 0 and "" all count as not supplied.
fn present(value: &Option<Value>) -> Option<&Value> {
    match value.as_ref()? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other),
    }
}

fn parse_country(value: &Value) -> Option<Country> {
    value.as_str()?.parse().ok()
}

/// Response for GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> ConvertRequest {
        ConvertRequest::from_body(body)
    }

    #[test]
    fn test_valid_request() {
        let valid = request(json!({"countryFrom": "US", "countryTo": "India", "score": 750}))
            .validate()
            .unwrap();
        assert_eq!(
            valid,
            ValidConversion {
                from: Country::US,
                to: Country::India,
                score: 750.0
            }
        );
    }

    #[test]
    fn test_non_object_body_has_no_fields() {
        for body in [json!(["US", "UK", 500]), json!("US"), json!(42), Value::Null] {
            let err = ConvertRequest::from_body(body).validate().unwrap_err();
            assert!(matches!(err, ApiError::MissingFields));
        }
    }

    #[test]
    fn test_missing_or_falsy_fields() {
        for body in [
            json!({}),
            json!({"countryTo": "US", "score": 5}),
            json!({"countryFrom": "US", "score": 5}),
            json!({"countryFrom": "US", "countryTo": "UK"}),
            json!({"countryFrom": "", "countryTo": "UK", "score": 5}),
            json!({"countryFrom": null, "countryTo": "UK", "score": 5}),
            json!({"countryFrom": "US", "countryTo": false, "score": 5}),
            json!({"countryFrom": "US", "countryTo": "UK", "score": "500"}),
            json!({"countryFrom": "US", "countryTo": "UK", "score": null}),
        ] {
            let err = request(body.clone()).validate().unwrap_err();
            assert!(matches!(err, ApiError::MissingFields), "{body}: {err:?}");
        }
    }

    #[test]
    fn test_missing_fields_checked_before_countries() {
        let err = request(json!({"countryFrom": "Mars", "countryTo": "UK"}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingFields));
    }

    #[test]
    fn test_invalid_country_from_before_country_to() {
        let err = request(json!({"countryFrom": "Mars", "countryTo": "Venus", "score": 5}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCountryFrom));
    }

    #[test]
    fn test_non_string_country_is_invalid() {
        let err = request(json!({"countryFrom": "US", "countryTo": 7, "score": 5}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCountryTo));
    }

    #[test]
    fn test_countries_checked_before_range() {
        let err = request(json!({"countryFrom": "US", "countryTo": "us", "score": 5000}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCountryTo));
    }

    #[test]
    fn test_score_range() {
        for score in [json!(-1), json!(1001), json!(1000.5), json!(-0.01)] {
            let err = request(json!({"countryFrom": "US", "countryTo": "UK", "score": score}))
                .validate()
                .unwrap_err();
            assert!(matches!(err, ApiError::ScoreOutOfRange));
        }
        for score in [json!(0), json!(1000), json!(0.5)] {
            assert!(
                request(json!({"countryFrom": "US", "countryTo": "UK", "score": score}))
                    .validate()
                    .is_ok()
            );
        }
    }
}
