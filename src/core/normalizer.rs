use crate::domain::model::{
    AddItemRequest, Bill, CreateBillRequest, Item, ItemInput, Participant, ParticipantInput,
};
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::{validate_non_empty_string, validate_price};
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

pub const DEFAULT_CURRENCY: &str = "RUB";
pub const DEFAULT_CREATOR: &str = "Anonymous";

/// 將建立帳單與新增項目的請求驗證並補齊成可計算的 [`Bill`]
#[derive(Debug, Clone)]
pub struct BillNormalizer {
    default_currency: String,
    default_creator: String,
}

impl Default for BillNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY, DEFAULT_CREATOR)
    }
}

fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 去除重複的 consumer ID，保留第一次出現的順序
fn dedup_consumers(consumers: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    consumers
        .into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

impl BillNormalizer {
    pub fn new(default_currency: impl Into<String>, default_creator: impl Into<String>) -> Self {
        Self {
            default_currency: default_currency.into(),
            default_creator: default_creator.into(),
        }
    }

    pub fn normalize_create(&self, request: CreateBillRequest) -> Result<Bill> {
        validate_non_empty_string("Title", &request.title)?;

        if request.items.is_empty() {
            return Err(SplitError::invalid_input("At least one item is required"));
        }
        if request.participants.is_empty() {
            return Err(SplitError::invalid_input(
                "At least one participant is required",
            ));
        }

        for item in &request.items {
            validate_price("Item price", item.price)?;
            validate_non_empty_string("Item name", &item.name)?;
        }

        if !request.tip.is_finite() {
            return Err(SplitError::invalid_input("Tip must be a finite number"));
        }
        let tip = request.tip.max(0.0);

        let participants = self.normalize_participants(request.participants)?;
        let all_ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
        let items = self.normalize_items(request.items, &all_ids)?;

        let bill = Bill {
            id: generate_id("bill"),
            title: request.title.trim().to_string(),
            description: non_blank(request.description),
            items,
            participants,
            tip,
            currency: non_blank(request.currency).unwrap_or_else(|| self.default_currency.clone()),
            created_at: Utc::now(),
            created_by: non_blank(request.created_by)
                .unwrap_or_else(|| self.default_creator.clone()),
        };

        tracing::debug!(
            bill_id = %bill.id,
            items = bill.items.len(),
            participants = bill.participants.len(),
            "Normalized bill"
        );
        Ok(bill)
    }

    fn normalize_participants(&self, inputs: Vec<ParticipantInput>) -> Result<Vec<Participant>> {
        let mut seen = HashSet::new();
        let mut participants = Vec::with_capacity(inputs.len());

        for (index, input) in inputs.into_iter().enumerate() {
            let id = non_blank(input.id).unwrap_or_else(|| generate_id("participant"));
            if !seen.insert(id.clone()) {
                return Err(SplitError::invalid_input(format!(
                    "Duplicate participant id: {}",
                    id
                )));
            }

            let name = match input.name.trim() {
                "" => format!("Participant {}", index + 1),
                name => name.to_string(),
            };

            participants.push(Participant {
                id,
                name,
                email: non_blank(input.email),
            });
        }

        Ok(participants)
    }

    fn normalize_items(&self, inputs: Vec<ItemInput>, participant_ids: &[String]) -> Result<Vec<Item>> {
        let known: HashSet<&str> = participant_ids.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(inputs.len());

        for input in inputs {
            let id = non_blank(input.id).unwrap_or_else(|| generate_id("item"));
            if !seen.insert(id.clone()) {
                return Err(SplitError::invalid_input(format!("Duplicate item id: {}", id)));
            }

            let consumed_by = if input.consumed_by.is_empty() {
                // 未指定時預設由所有參與者分攤
                participant_ids.to_vec()
            } else {
                dedup_consumers(input.consumed_by)
            };

            for consumer in consumed_by.iter().filter(|c| !known.contains(c.as_str())) {
                tracing::warn!(item_id = %id, consumer_id = %consumer, "Item references unknown participant");
            }

            items.push(Item {
                id,
                name: input.name.trim().to_string(),
                price: input.price,
                consumed_by,
            });
        }

        Ok(items)
    }

    /// 驗證要追加到既有帳單的項目。所有 consumer 都必須是帳單參與者。
    pub fn normalize_new_item(&self, bill: &Bill, request: AddItemRequest) -> Result<Item> {
        validate_non_empty_string("Item name", &request.name)?;
        validate_price("Item price", request.price)?;

        let consumed_by = dedup_consumers(request.consumed_by);
        if consumed_by.is_empty() {
            return Err(SplitError::invalid_input(
                "At least one consumer is required",
            ));
        }

        if let Some(unknown) = consumed_by
            .iter()
            .find(|id| !bill.participants.iter().any(|p| &p.id == *id))
        {
            return Err(SplitError::invalid_input(format!(
                "Participant not found: {}",
                unknown
            )));
        }

        Ok(Item {
            id: generate_id("item"),
            name: request.name.trim().to_string(),
            price: request.price,
            consumed_by,
        })
    }
}
