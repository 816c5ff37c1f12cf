//! Static sample documents served by the `/read/{n}` routes.
//!
//! Each document is fixed data; the `timestamp` field is the only part
//! recomputed per response.

use serde_json::{Value, json};

/// One canned sample document.
#[derive(Debug, Clone)]
pub struct SampleDocument {
    pub id: u32,
    pub status: &'static str,
    pub description: &'static str,
    /// Omitted from the rendered response when `None`.
    pub security_level: Option<&'static str>,
}

impl SampleDocument {
    /// Render the document with a response-time timestamp.
    pub fn render(&self, timestamp: &str) -> Value {
        let mut doc = json!({
            "id": self.id,
            "status": self.status,
            "description": self.description,
            "timestamp": timestamp,
        });
        if let Some(level) = self.security_level {
            doc["security_level"] = json!(level);
        }
        doc
    }
}

/// Fixed table of sample documents, keyed by route id.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    documents: Vec<SampleDocument>,
}

impl SampleCatalog {
    /// The built-in document set (ids 1..=5).
    pub fn builtin() -> Self {
        Self {
            documents: vec![
                SampleDocument {
                    id: 1,
                    status: "Success",
                    description: "Response for the sample data read request.",
                    security_level: Some("High"),
                },
                SampleDocument {
                    id: 2,
                    status: "Success",
                    description: "Response for the transaction history read request.",
                    security_level: Some("Medium"),
                },
                SampleDocument {
                    id: 3,
                    status: "Success",
                    description: "Response for the public notice read request.",
                    security_level: Some("Low"),
                },
                SampleDocument {
                    id: 4,
                    status: "Pending",
                    description: "Response for the batch settlement status request.",
                    security_level: None,
                },
                SampleDocument {
                    id: 5,
                    status: "Success",
                    description: "Response for the intrusion detection summary request.",
                    security_level: Some("Critical"),
                },
            ],
        }
    }

    /// Look up a document by route id.
    pub fn get(&self, id: u32) -> Option<&SampleDocument> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
