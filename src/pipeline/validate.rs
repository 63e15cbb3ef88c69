// src/pipeline/validate.rs

//! Response shape checks and status translation.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Homework, HomeworkStatus};

const HOMEWORKS: &str = "homeworks";
const CURRENT_DATE: &str = "current_date";
const HOMEWORK_NAME: &str = "homework_name";
const STATUS: &str = "status";

/// Check the payload shape and return its homework records.
pub fn check_response(response: &Value) -> Result<&[Value]> {
    log::info!("Checking API response.");

    let map = response
        .as_object()
        .ok_or_else(|| AppError::field_type("response is not a mapping"))?;

    let homeworks = map
        .get(HOMEWORKS)
        .ok_or_else(|| AppError::shape(format!("missing key \"{HOMEWORKS}\"")))?;
    if !map.contains_key(CURRENT_DATE) {
        return Err(AppError::shape(format!("missing key \"{CURRENT_DATE}\"")));
    }

    let homeworks = homeworks
        .as_array()
        .ok_or_else(|| AppError::field_type(format!("\"{HOMEWORKS}\" is not a list")))?;

    if homeworks.is_empty() {
        log::info!("No new statuses in API response.");
    }
    Ok(homeworks.as_slice())
}

/// Read `current_date` from an already checked payload.
pub fn current_date(response: &Value) -> Result<i64> {
    let value = response
        .get(CURRENT_DATE)
        .ok_or_else(|| AppError::shape(format!("missing key \"{CURRENT_DATE}\"")))?;
    value
        .as_i64()
        .ok_or_else(|| AppError::field_type(format!("\"{CURRENT_DATE}\" is not an integer")))
}

/// Convert a raw record into a typed [`Homework`].
pub fn parse_homework(record: &Value) -> Result<Homework> {
    let map = record
        .as_object()
        .ok_or_else(|| AppError::field_type("homework record is not a mapping"))?;

    let (Some(name), Some(status)) = (map.get(HOMEWORK_NAME), map.get(STATUS)) else {
        log::error!("Keys {HOMEWORK_NAME} or {STATUS} are missing in API response");
        return Err(AppError::shape(format!(
            "missing key \"{HOMEWORK_NAME}\" or \"{STATUS}\" in homework record"
        )));
    };

    let name = name
        .as_str()
        .ok_or_else(|| AppError::field_type(format!("\"{HOMEWORK_NAME}\" is not a string")))?;
    let status = status
        .as_str()
        .ok_or_else(|| AppError::field_type(format!("\"{STATUS}\" is not a string")))?;

    let status = status.parse::<HomeworkStatus>().inspect_err(|_| {
        log::error!("Unknown homework status: {status}");
    })?;

    Ok(Homework {
        name: name.to_string(),
        status,
    })
}

/// Produce the user-facing message for a homework record.
pub fn parse_status(record: &Value) -> Result<String> {
    parse_homework(record).map(|homework| homework.message())
}
