/// Client feedback model

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientFeedbackRow {
    pub id: String,
    pub client_name: String,
    pub satisfaction: String,
    pub rating: f64,
    pub feedback: String,
    pub date: String,
}

/// Satisfaction survey answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFeedback {
    pub id: String,
    pub client_name: String,
    /// `Sangat Puas`, `Puas`, `Biasa`, `Tidak Puas`
    pub satisfaction: String,
    /// 1.0..=5.0
    pub rating: f64,
    pub feedback: String,
    pub date: String,
}

impl From<ClientFeedbackRow> for ClientFeedback {
    fn from(row: ClientFeedbackRow) -> Self {
        ClientFeedback {
            id: row.id,
            client_name: row.client_name,
            satisfaction: row.satisfaction,
            rating: row.rating,
            feedback: row.feedback,
            date: row.date,
        }
    }
}

impl From<ClientFeedback> for ClientFeedbackRow {
    fn from(feedback: ClientFeedback) -> Self {
        ClientFeedbackRow {
            id: feedback.id,
            client_name: feedback.client_name,
            satisfaction: feedback.satisfaction,
            rating: feedback.rating,
            feedback: feedback.feedback,
            date: feedback.date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewClientFeedback {
    #[validate(length(min = 1, message = "Name is required"))]
    pub client_name: String,
    pub satisfaction: String,
    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5"))]
    pub rating: f64,
    pub feedback: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct ClientFeedbackPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl Entity for ClientFeedback {
    type Row = ClientFeedbackRow;
    type New = NewClientFeedback;
    type Patch = ClientFeedbackPatch;

    const TABLE: Table = Table::ClientFeedback;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.client_feedback
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.client_feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let feedback = ClientFeedback {
            id: "f-1".to_string(),
            client_name: "Ana".to_string(),
            satisfaction: "Sangat Puas".to_string(),
            rating: 5.0,
            feedback: "Hasilnya bagus".to_string(),
            date: "2024-05-01".to_string(),
        };
        assert_eq!(
            ClientFeedback::from(ClientFeedbackRow::from(feedback.clone())),
            feedback
        );
    }

    #[test]
    fn test_rating_bounds() {
        let new: NewClientFeedback = serde_json::from_value(json!({
            "clientName": "Ana",
            "satisfaction": "Puas",
            "rating": 6,
            "feedback": "",
            "date": "2024-05-01"
        }))
        .unwrap();
        assert!(new.validate().is_err());

        let ok = NewClientFeedback { rating: 4.0, ..new };
        assert!(ok.validate().is_ok());
    }
}
