use serde::{Deserialize, Serialize};

use super::Extra;

/// A student's health record. Only the identifiers are typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<serde_json::Value>,
    #[serde(flatten)]
    pub fields: Extra,
}

/// Health form fields as submitted by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthUpdate(pub Extra);
