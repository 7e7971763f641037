use crate::domain::model::{Bill, FiscalReceiptQuery, VerificationResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 帳單儲存。每個 key 的寫入必須是整筆替換，讀取不可看到寫到一半的帳單。
pub trait BillStore: Send + Sync {
    fn create(&self, bill: Bill) -> Result<()>;
    fn get(&self, id: &str) -> Result<Bill>;
    fn update(&self, bill: Bill) -> Result<()>;
    /// 在同一個寫入鎖內讀取、修改並寫回；`f` 失敗時帳單維持原狀
    fn modify(&self, id: &str, f: &mut dyn FnMut(&mut Bill) -> Result<()>) -> Result<Bill>;
    fn delete(&self, id: &str) -> Result<()>;
    fn list_all(&self) -> Result<Vec<Bill>>;
}

#[async_trait]
pub trait ReceiptVerifier: Send + Sync {
    async fn verify(&self, query: &FiscalReceiptQuery) -> Result<VerificationResponse>;
}
