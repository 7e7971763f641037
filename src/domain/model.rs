use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// 分攤此項目的參與者 ID；空清單代表不參與分攤
    #[serde(default)]
    pub consumed_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<Item>,
    pub participants: Vec<Participant>,
    /// 小費百分比，例如 10.0 代表 10%
    pub tip: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSplit {
    pub participant_id: String,
    pub participant_name: String,
    pub subtotal: f64,
    pub tip_share: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSummary {
    pub bill_id: String,
    #[serde(rename = "total_amount")]
    pub subtotal: f64,
    pub tip_amount: f64,
    pub grand_total: f64,
    pub currency: String,
    pub split: Vec<ParticipantSplit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub consumed_by: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBillRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub items: Vec<ItemInput>,
    pub participants: Vec<ParticipantInput>,
    #[serde(default)]
    pub tip: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub consumed_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    pub items: Vec<Item>,
    pub total: f64,
    pub currency: String,
}

/// 收據 QR code 上的財政參數
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiscalReceiptQuery {
    pub r#fn: String,
    pub fd: String,
    pub fp: String,
    pub t: String,
    pub s: String,
    #[serde(default)]
    pub n: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub status: u16,
    pub body: serde_json::Value,
}
