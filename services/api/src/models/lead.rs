//! Lead model and related functionality

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tier::Tier;

/// Qualification status of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Converted,
    Lost,
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "converted" => Ok(Self::Converted),
            "lost" => Ok(Self::Lost),
            other => Err(format!("Unknown lead status: {other}")),
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Converted => "converted",
            Self::Lost => "lost",
        };
        f.write_str(s)
    }
}

/// Lead entity: a prospective client's contact and requirement submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub tier: Tier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    pub qualified: bool,
    pub status: LeadStatus,
    pub created_at: DateTime,
}

impl Lead {
    /// Build a lead for insertion. The status is always `new` and the creation
    /// time is stamped here; whatever the client sent for either is ignored.
    pub fn new(
        user_id: Option<String>,
        name: String,
        email: String,
        phone: Option<String>,
        tier: Tier,
        requirements: Option<String>,
        qualified: bool,
    ) -> Self {
        Self {
            id: None,
            user_id,
            name,
            email,
            phone,
            tier,
            requirements,
            qualified,
            status: LeadStatus::New,
            created_at: DateTime::now(),
        }
    }
}

/// Lead as returned to API callers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    pub qualified: bool,
    pub status: LeadStatus,
    pub created_at: ChronoDateTime<Utc>,
}

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: lead.user_id,
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            tier: lead.tier,
            requirements: lead.requirements,
            qualified: lead.qualified,
            status: lead.status,
            created_at: lead.created_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn new_lead_always_starts_as_new() {
        let lead = Lead::new(
            None,
            "Ada".to_string(),
            "ada@example.com".to_string(),
            None,
            Tier::High,
            Some("Full-stack app".to_string()),
            true,
        );
        assert_eq!(lead.status, LeadStatus::New);
        assert!(lead.id.is_none());
    }

    #[test]
    fn lead_document_uses_camel_case_fields() {
        let lead = Lead::new(
            Some("u-1".to_string()),
            "Ada".to_string(),
            "ada@example.com".to_string(),
            None,
            Tier::Low,
            None,
            false,
        );
        let doc = bson::to_document(&lead).unwrap();

        assert_eq!(doc.get_str("status").unwrap(), "new");
        assert_eq!(doc.get_str("tier").unwrap(), "low");
        assert_eq!(doc.get_str("userId").unwrap(), "u-1");
        assert!(doc.get_datetime("createdAt").is_ok());
        // Absent optionals are not written at all
        assert!(!doc.contains_key("phone"));
        assert!(!doc.contains_key("_id"));
    }

    #[test]
    fn lead_status_rejects_unknown_values() {
        assert!("qualified".parse::<LeadStatus>().is_err());
        assert_eq!("new".parse::<LeadStatus>(), Ok(LeadStatus::New));
    }
}
