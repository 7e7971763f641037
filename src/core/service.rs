use crate::core::calculator::SplitCalculator;
use crate::core::normalizer::BillNormalizer;
use crate::domain::model::{AddItemRequest, Bill, BillSummary, CreateBillRequest};
use crate::domain::ports::BillStore;
use crate::utils::error::{Result, SplitError};
use std::sync::Arc;

/// 帳單應用服務：儲存由外部注入，計算結果每次重新產生、不快取
pub struct BillService<S: BillStore> {
    store: Arc<S>,
    normalizer: BillNormalizer,
}

impl<S: BillStore> Clone for BillService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            normalizer: self.normalizer.clone(),
        }
    }
}

fn require_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(SplitError::invalid_input("Bill ID is required"));
    }
    Ok(id)
}

impl<S: BillStore> BillService<S> {
    pub fn new(store: Arc<S>, normalizer: BillNormalizer) -> Self {
        Self { store, normalizer }
    }

    pub fn create_bill(&self, request: CreateBillRequest) -> Result<Bill> {
        let bill = self.normalizer.normalize_create(request)?;
        self.store.create(bill.clone())?;

        tracing::info!("🧾 Created bill {} ({})", bill.id, bill.title);
        Ok(bill)
    }

    pub fn get_bill(&self, id: &str) -> Result<Bill> {
        self.store.get(require_id(id)?)
    }

    pub fn add_item(&self, id: &str, request: AddItemRequest) -> Result<Bill> {
        // 驗證與追加都在儲存的寫入鎖內完成，並行追加不會互相覆蓋
        self.store.modify(require_id(id)?, &mut |bill| {
            let item = self.normalizer.normalize_new_item(bill, request.clone())?;

            tracing::info!("➕ Adding item '{}' ({:.2}) to bill {}", item.name, item.price, bill.id);
            bill.items.push(item);
            Ok(())
        })
    }

    pub fn summary(&self, id: &str) -> Result<BillSummary> {
        let bill = self.store.get(require_id(id)?)?;
        let summary = SplitCalculator::compute(&bill);

        tracing::debug!(
            bill_id = %summary.bill_id,
            subtotal = summary.subtotal,
            tip_amount = summary.tip_amount,
            grand_total = summary.grand_total,
            "Computed bill summary"
        );
        Ok(summary)
    }

    pub fn list_bills(&self) -> Result<Vec<Bill>> {
        self.store.list_all()
    }

    pub fn delete_bill(&self, id: &str) -> Result<()> {
        let id = require_id(id)?;
        self.store.delete(id)?;

        tracing::info!("🗑️ Deleted bill {}", id);
        Ok(())
    }
}
