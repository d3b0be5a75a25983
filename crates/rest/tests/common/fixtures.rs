//! Request bodies used across the REST tests.

use serde_json::{Value, json};

/// A complete doctor payload.
pub fn doctor(given_name: &str, surname: &str) -> Value {
    json!({
        "doctor": {
            "given_name": given_name,
            "surname": surname
        }
    })
}

/// A patient payload without an assigned doctor.
pub fn patient(given_name: &str, surname: &str) -> Value {
    json!({
        "patient": {
            "given_name": given_name,
            "surname": surname,
            "born_on": "1984-03-02",
            "gender": "female"
        }
    })
}

/// A patient payload assigned to `doctor_id`.
pub fn patient_of(given_name: &str, surname: &str, doctor_id: i64) -> Value {
    json!({
        "patient": {
            "given_name": given_name,
            "surname": surname,
            "doctor_id": doctor_id
        }
    })
}
