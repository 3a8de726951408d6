//! Admin account model

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Admin entity, used only by the database fallback login path. The stored
/// password is an argon2 hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub password: String,
    pub role: String,
}
