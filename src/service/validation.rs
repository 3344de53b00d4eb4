//! Player payload validation. Rules run in fixed field order and stop at the first violation.

use crate::error::ValidationError;
use crate::model::{NewPlayer, Role};
use serde_json::{Map, Value};

const FIELDS: [&str; 7] = ["name", "team", "country", "runs", "image", "role", "salary"];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a full player payload. Update uses the same rules as create.
    pub fn validate(body: &Value) -> Result<NewPlayer, ValidationError> {
        let obj = body
            .as_object()
            .ok_or_else(|| ValidationError::new("value", "must be of type object"))?;

        let player = NewPlayer {
            name: required_str(obj, "name")?,
            team: required_str(obj, "team")?,
            country: required_str(obj, "country")?,
            runs: required_integer(obj, "runs")?,
            image: required_uri(obj, "image")?,
            role: required_role(obj, "role")?,
            salary: required_positive(obj, "salary")?,
        };

        if let Some(extra) = obj.keys().find(|k| !FIELDS.contains(&k.as_str())) {
            return Err(ValidationError::new(extra, "is not allowed"));
        }
        Ok(player)
    }
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value, ValidationError> {
    match obj.get(field) {
        None => Err(ValidationError::new(field, "is required")),
        Some(v) => Ok(v),
    }
}

fn required_str(obj: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    let s = required(obj, field)?
        .as_str()
        .ok_or_else(|| ValidationError::new(field, "must be a string"))?;
    if s.is_empty() {
        return Err(ValidationError::new(field, "is not allowed to be empty"));
    }
    Ok(s.to_string())
}

/// JSON numbers, or strings holding a finite decimal number.
fn required_number(obj: &Map<String, Value>, field: &str) -> Result<f64, ValidationError> {
    let n = match required(obj, field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    };
    n.ok_or_else(|| ValidationError::new(field, "must be a number"))
}

fn required_integer(obj: &Map<String, Value>, field: &str) -> Result<i64, ValidationError> {
    if let Some(n) = required(obj, field)?.as_i64() {
        return Ok(n);
    }
    let f = required_number(obj, field)?;
    if f.fract() != 0.0 || f.abs() > MAX_SAFE_INTEGER {
        return Err(ValidationError::new(field, "must be an integer"));
    }
    Ok(f as i64)
}

/// Largest integer a JSON client can represent exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn required_uri(obj: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    let s = required_str(obj, field)?;
    url::Url::parse(&s).map_err(|_| ValidationError::new(field, "must be a valid uri"))?;
    Ok(s)
}

fn required_role(obj: &Map<String, Value>, field: &str) -> Result<Role, ValidationError> {
    let allowed = || {
        let labels: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
        ValidationError::new(field, format!("must be one of [{}]", labels.join(", ")))
    };
    let s = required(obj, field)?.as_str().ok_or_else(allowed)?;
    s.parse().map_err(|_| allowed())
}

fn required_positive(obj: &Map<String, Value>, field: &str) -> Result<f64, ValidationError> {
    let n = required_number(obj, field)?;
    if n <= 0.0 {
        return Err(ValidationError::new(field, "must be a positive number"));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "name": "A",
            "team": "X",
            "country": "Y",
            "runs": 50,
            "image": "http://i/a.png",
            "role": "Batsman",
            "salary": 100000
        })
    }

    fn error_for(body: Value) -> ValidationError {
        match RequestValidator::validate(&body) {
            Err(e) => e,
            Ok(p) => panic!("expected validation failure, got {:?}", p),
        }
    }

    #[test]
    fn accepts_valid_payload_unchanged() {
        let p = RequestValidator::validate(&valid()).unwrap();
        assert_eq!(p.name, "A");
        assert_eq!(p.team, "X");
        assert_eq!(p.country, "Y");
        assert_eq!(p.runs, 50);
        assert_eq!(p.image, "http://i/a.png");
        assert_eq!(p.role, Role::Batsman);
        assert_eq!(p.salary, 100000.0);
    }

    #[test]
    fn each_missing_field_is_named() {
        for field in FIELDS {
            let mut body = valid();
            body.as_object_mut().unwrap().remove(field);
            let e = error_for(body);
            assert_eq!(e.field, field);
            assert_eq!(e.message, format!("\"{}\" is required", field));
        }
    }

    #[test]
    fn null_is_a_type_error_not_a_missing_field() {
        let mut body = valid();
        body["team"] = Value::Null;
        assert_eq!(error_for(body).message, "\"team\" must be a string");

        let mut body = valid();
        body["salary"] = Value::Null;
        assert_eq!(error_for(body).message, "\"salary\" must be a number");

        let mut body = valid();
        body["role"] = Value::Null;
        assert_eq!(error_for(body).field, "role");
    }

    #[test]
    fn numeric_strings_are_converted() {
        let mut body = valid();
        body["runs"] = json!(" 50 ");
        body["salary"] = json!("100000.5");
        let p = RequestValidator::validate(&body).unwrap();
        assert_eq!(p.runs, 50);
        assert_eq!(p.salary, 100000.5);

        let mut body = valid();
        body["runs"] = json!("50.5");
        assert_eq!(error_for(body).message, "\"runs\" must be an integer");

        let mut body = valid();
        body["salary"] = json!("-5");
        assert_eq!(error_for(body).message, "\"salary\" must be a positive number");

        for bad in ["", "fifty", "NaN", "inf"] {
            let mut body = valid();
            body["runs"] = json!(bad);
            assert_eq!(error_for(body).message, "\"runs\" must be a number");
        }
    }

    #[test]
    fn stops_at_first_violation_in_field_order() {
        let body = json!({ "runs": "lots", "salary": -1 });
        assert_eq!(error_for(body).field, "name");

        let mut body = valid();
        body["country"] = json!("");
        body["salary"] = json!(-5);
        assert_eq!(error_for(body).message, "\"country\" is not allowed to be empty");
    }

    #[test]
    fn rejects_wrong_types() {
        let mut body = valid();
        body["name"] = json!(12);
        assert_eq!(error_for(body).message, "\"name\" must be a string");

        let mut body = valid();
        body["runs"] = json!(true);
        assert_eq!(error_for(body).message, "\"runs\" must be a number");
    }

    #[test]
    fn runs_must_be_integral() {
        let mut body = valid();
        body["runs"] = json!(50.5);
        assert_eq!(error_for(body).message, "\"runs\" must be an integer");

        let mut body = valid();
        body["runs"] = json!(50.0);
        assert_eq!(RequestValidator::validate(&body).unwrap().runs, 50);
    }

    #[test]
    fn image_must_be_absolute_uri() {
        for bad in ["a.png", "not a uri", "/images/a.png"] {
            let mut body = valid();
            body["image"] = json!(bad);
            assert_eq!(error_for(body).message, "\"image\" must be a valid uri");
        }
    }

    #[test]
    fn role_must_be_enumerated() {
        let mut body = valid();
        body["role"] = json!("Keeper");
        assert_eq!(
            error_for(body).message,
            "\"role\" must be one of [Batsman, Bowler, All-rounder]"
        );

        let mut body = valid();
        body["role"] = json!("All-rounder");
        assert_eq!(RequestValidator::validate(&body).unwrap().role, Role::AllRounder);
    }

    #[test]
    fn salary_must_be_strictly_positive() {
        for bad in [json!(0), json!(-5), json!(-0.01)] {
            let mut body = valid();
            body["salary"] = bad;
            let e = error_for(body);
            assert_eq!(e.field, "salary");
            assert_eq!(e.message, "\"salary\" must be a positive number");
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut body = valid();
        body["captain"] = json!(true);
        assert_eq!(error_for(body).message, "\"captain\" is not allowed");
    }

    #[test]
    fn body_must_be_object() {
        assert_eq!(error_for(json!([1, 2])).message, "\"value\" must be of type object");
    }
}
