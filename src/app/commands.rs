use crate::core::service::BillService;
use crate::core::BillStore;
use crate::domain::model::{
    AddItemRequest, BillSummary, CreateBillRequest, ItemInput, ParsedReceipt, ParticipantInput,
};
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 建立帳單、依序追加項目，最後回傳重新計算的分攤結果
pub fn split_bill<S: BillStore>(
    service: &BillService<S>,
    request: CreateBillRequest,
    additions: Vec<AddItemRequest>,
) -> Result<BillSummary> {
    let bill = service.create_bill(request)?;

    for addition in additions {
        service.add_item(&bill.id, addition)?;
    }

    service.summary(&bill.id)
}

/// 把擷取出的收據項目轉成建立請求；項目不指定 consumer，由所有參與者分攤
pub fn receipt_to_request(
    receipt: &ParsedReceipt,
    title: &str,
    participants: &[String],
    tip: f64,
) -> CreateBillRequest {
    CreateBillRequest {
        title: title.to_string(),
        description: None,
        items: receipt
            .items
            .iter()
            .map(|item| ItemInput {
                id: Some(item.id.clone()),
                name: item.name.clone(),
                price: item.price,
                consumed_by: Vec::new(),
            })
            .collect(),
        participants: participants
            .iter()
            .map(|name| ParticipantInput {
                id: None,
                name: name.clone(),
                email: None,
            })
            .collect(),
        tip,
        currency: Some(receipt.currency.clone()),
        created_by: None,
    }
}
