use crate::domain::model::{Bill, BillSummary, ParticipantSplit};
use crate::utils::money::round2;
use std::collections::HashMap;

/// 帳單分攤計算。純函式，不做 I/O，也不重新驗證輸入。
///
/// 每個欄位在所有運算完成後各自四捨五入到兩位小數，因此各參與者的
/// `total` 加總不保證等於 `grand_total`，可能相差一分。
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitCalculator;

impl SplitCalculator {
    pub fn compute(bill: &Bill) -> BillSummary {
        let subtotal: f64 = bill.items.iter().map(|item| item.price).sum();
        let tip_amount = subtotal * (bill.tip / 100.0);
        let grand_total = subtotal + tip_amount;

        // 參與者 ID -> 在 participants 中的位置，只用來解析 consumed_by
        let positions: HashMap<&str, usize> = bill
            .participants
            .iter()
            .enumerate()
            .map(|(index, participant)| (participant.id.as_str(), index))
            .collect();

        let mut shares = vec![0.0_f64; bill.participants.len()];

        for item in &bill.items {
            if item.consumed_by.is_empty() {
                // 無人分攤的項目不列入分配
                continue;
            }

            let share_per_consumer = item.price / item.consumed_by.len() as f64;
            for consumer_id in &item.consumed_by {
                match positions.get(consumer_id.as_str()) {
                    Some(&index) => shares[index] += share_per_consumer,
                    None => tracing::trace!(
                        item_id = %item.id,
                        consumer_id = %consumer_id,
                        "Skipping unknown consumer"
                    ),
                }
            }
        }

        let total_distributed: f64 = shares.iter().sum();

        let split = bill
            .participants
            .iter()
            .zip(&shares)
            .map(|(participant, &raw_share)| {
                let tip_share = if total_distributed > 0.0 && raw_share > 0.0 {
                    tip_amount * (raw_share / total_distributed)
                } else {
                    0.0
                };

                ParticipantSplit {
                    participant_id: participant.id.clone(),
                    participant_name: participant.name.clone(),
                    subtotal: round2(raw_share),
                    tip_share: round2(tip_share),
                    total: round2(raw_share + tip_share),
                }
            })
            .collect();

        BillSummary {
            bill_id: bill.id.clone(),
            subtotal: round2(subtotal),
            tip_amount: round2(tip_amount),
            grand_total: round2(grand_total),
            currency: bill.currency.clone(),
            split,
        }
    }
}
