//! Submission Types
//!
//! Form input, the validated payload and the API wire shapes.

use serde::{Deserialize, Serialize};

use super::error::InputError;

/// Raw text of the three form fields, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub weight: String,
    pub blood_pressure: String,
    pub steps: String,
}

impl FormState {
    pub fn new(
        weight: impl Into<String>,
        blood_pressure: impl Into<String>,
        steps: impl Into<String>,
    ) -> Self {
        Self {
            weight: weight.into(),
            blood_pressure: blood_pressure.into(),
            steps: steps.into(),
        }
    }

    /// Parse the fields into a payload.
    ///
    /// Weight must be a positive finite number (kg), steps a non-negative
    /// whole number and blood pressure any non-empty text.
    pub fn validate(&self) -> Result<HealthData, InputError> {
        let weight_text = self.weight.trim();
        if weight_text.is_empty() {
            return Err(InputError::Missing("weight"));
        }
        let weight: f64 = weight_text
            .parse()
            .map_err(|_| InputError::InvalidWeight(weight_text.to_string()))?;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(InputError::InvalidWeight(weight_text.to_string()));
        }

        let blood_pressure = self.blood_pressure.trim();
        if blood_pressure.is_empty() {
            return Err(InputError::Missing("blood_pressure"));
        }

        let steps_text = self.steps.trim();
        if steps_text.is_empty() {
            return Err(InputError::Missing("steps"));
        }
        let steps: u64 = steps_text
            .parse()
            .map_err(|_| InputError::InvalidSteps(steps_text.to_string()))?;

        Ok(HealthData {
            weight,
            blood_pressure: blood_pressure.to_string(),
            steps,
        })
    }
}

/// Validated health metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthData {
    /// Body weight in kg
    pub weight: f64,
    /// Free text, usually `systolic/diastolic`
    pub blood_pressure: String,
    /// Steps walked today
    pub steps: u64,
}

/// Body of `POST /api/phr/submit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub wallet_address: String,
    pub data: HealthData,
}

/// Successful response of `POST /api/phr/submit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// LLM-generated summary of the submitted metrics
    pub summary: String,
    /// Hash of the anchoring transaction
    pub tx_hash: String,
    /// Explorer page for `tx_hash`
    pub explorer_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        let form = FormState::new(" 65.5", "120/80", "8200 ");
        let data = form.validate().unwrap();
        assert_eq!(data.weight, 65.5);
        assert_eq!(data.blood_pressure, "120/80");
        assert_eq!(data.steps, 8200);
    }

    #[test]
    fn test_validate_missing_fields() {
        let form = FormState::new("", "120/80", "8200");
        assert_eq!(form.validate(), Err(InputError::Missing("weight")));

        let form = FormState::new("65", "   ", "8200");
        assert_eq!(form.validate(), Err(InputError::Missing("blood_pressure")));

        let form = FormState::new("65", "120/80", "");
        assert_eq!(form.validate(), Err(InputError::Missing("steps")));
    }

    #[test]
    fn test_validate_rejects_nan_inputs() {
        for weight in ["abc", "NaN", "inf", "-3", "0"] {
            let form = FormState::new(weight, "120/80", "100");
            assert!(
                matches!(form.validate(), Err(InputError::InvalidWeight(_))),
                "weight {weight:?} should be rejected"
            );
        }

        for steps in ["many", "-5", "12.5"] {
            let form = FormState::new("70", "120/80", steps);
            assert!(
                matches!(form.validate(), Err(InputError::InvalidSteps(_))),
                "steps {steps:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_request_wire_format() {
        let request = SubmissionRequest {
            wallet_address: "0xabc".to_string(),
            data: HealthData {
                weight: 65.5,
                blood_pressure: "120/80".to_string(),
                steps: 8200,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "wallet_address": "0xabc",
                "data": {"weight": 65.5, "blood_pressure": "120/80", "steps": 8200}
            })
        );
    }

    #[test]
    fn test_result_ignores_extra_fields() {
        let result: SubmissionResult = serde_json::from_str(
            r#"{"summary":"ok","tx_hash":"0xabc","explorer_url":"https://x/tx/0xabc","extra":1}"#,
        )
        .unwrap();
        assert_eq!(result.summary, "ok");
        assert_eq!(result.tx_hash, "0xabc");
    }
}
