use crate::core::normalizer::DEFAULT_CURRENCY;
use crate::domain::model::{Item, ParsedReceipt};
use crate::utils::money::round2;
use regex::Regex;
use std::sync::LazyLock;

const HEADER_KEYWORDS: &[&str] = &[
    "чек", "date", "дата", "время", "time", "касса", "смена", "оператор", "order", "заказ",
    "фискальный", "фн", "фд", "фпд", "регистратор", "наименование", "цена", "кол-во", "сумма",
];

const TOTAL_KEYWORDS: &[&str] = &[
    "итого", "всего", "total", "сумма", "оплата", "налог", "ндс", "сдача", "change", "внесено",
    "наличными", "картой", "cash", "card", "credit",
];

const UNIT_PREFIXES: &[&str] = &["шт", "kg", "кг", "pcs", "уп", "упак", "пак", "набор", "компл"];

/// 價格匹配規則，依序嘗試，第一個成功者勝出
struct PriceRule {
    name: &'static str,
    pattern: Regex,
    /// 第二個群組是分位數 (例如 "123 45")
    cents_group: bool,
}

impl PriceRule {
    fn new(name: &'static str, pattern: &str, cents_group: bool) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("receipt price pattern must compile"),
            cents_group,
        }
    }
}

static PRICE_RULES: LazyLock<Vec<PriceRule>> = LazyLock::new(|| {
    vec![
        PriceRule::new("trailing_decimal", r"(\d+[.,]\d{2})\s*$", false),
        PriceRule::new("inline_decimal", r"\s(\d+[.,]\d{2})\s", false),
        PriceRule::new("trailing_integer", r"\s(\d+)[.,]?(\d{2})?\s*$", true),
        PriceRule::new("multiplier_decimal", r"[x×*]\s*(\d+[.,]\d{2})", false),
        PriceRule::new("multiplier_integer", r"[x×*]\s*(\d+)", false),
        PriceRule::new("rub_short", r"\s(\d+)\s*р", false),
        PriceRule::new("rub_long", r"\s(\d+)\s*руб", false),
        PriceRule::new("rub_sign", r"\s(\d+)\s*₽", false),
        PriceRule::new("dollar", r"\$(\d+[.,]\d{2})", false),
        PriceRule::new("euro", r"€(\d+[.,]\d{2})", false),
        PriceRule::new("pound", r"£(\d+[.,]\d{2})", false),
    ]
});

static LEADING_QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.,]?\d*\s*[x×*]\s*").expect("quantity pattern must compile"));
static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s\-]").expect("char filter must compile"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));
static NUMERIC_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s.,\-]+$").expect("numeric pattern must compile"));

/// 從自由格式的收據文字中盡力擷取項目。沒有正確性保證，和分攤計算完全分離。
#[derive(Debug, Clone)]
pub struct ReceiptTextExtractor {
    default_currency: String,
}

impl Default for ReceiptTextExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl ReceiptTextExtractor {
    pub fn new(default_currency: impl Into<String>) -> Self {
        Self {
            default_currency: default_currency.into(),
        }
    }

    pub fn extract(&self, text: &str) -> ParsedReceipt {
        let currency = self.detect_currency(text);
        let mut items = Vec::new();

        for (index, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || is_header_line(line) || is_total_line(line) {
                continue;
            }

            if let Some((price, name)) = extract_price_and_name(line) {
                if price > 0.0 && is_valid_item_name(&name) {
                    items.push(Item {
                        id: format!("receipt_{}", index + 1),
                        name,
                        price,
                        consumed_by: Vec::new(),
                    });
                }
            }
        }

        let total = round2(items.iter().map(|item| item.price).sum());
        tracing::debug!(items = items.len(), total, %currency, "Extracted receipt items");

        ParsedReceipt {
            items,
            total,
            currency,
        }
    }

    fn detect_currency(&self, text: &str) -> String {
        if text.contains('$') {
            "USD".to_string()
        } else if text.contains('€') {
            "EUR".to_string()
        } else if text.contains('£') {
            "GBP".to_string()
        } else {
            self.default_currency.clone()
        }
    }
}

fn contains_keyword(line: &str, keywords: &[&str]) -> bool {
    let lower = line.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}

fn is_header_line(line: &str) -> bool {
    contains_keyword(line, HEADER_KEYWORDS)
}

fn is_total_line(line: &str) -> bool {
    contains_keyword(line, TOTAL_KEYWORDS)
}

fn extract_price_and_name(line: &str) -> Option<(f64, String)> {
    for rule in PRICE_RULES.iter() {
        let Some(caps) = rule.pattern.captures(line) else {
            continue;
        };

        let mut price_str = caps.get(1).map(|m| m.as_str().to_string())?;
        if rule.cents_group {
            if let Some(cents) = caps.get(2) {
                price_str = format!("{}.{}", price_str, cents.as_str());
            }
        }

        let Ok(price) = price_str.replace(',', ".").parse::<f64>() else {
            continue;
        };

        let name = clean_item_name(rule.pattern.replace_all(line, "").trim());
        if !name.is_empty() {
            tracing::trace!(rule = rule.name, price, %name, "Matched receipt line");
            return Some((price, name));
        }
    }

    None
}

fn clean_item_name(name: &str) -> String {
    let name = LEADING_QUANTITY.replace(name, "");
    let name = DISALLOWED_CHARS.replace_all(&name, "");
    WHITESPACE_RUN.replace_all(name.trim(), " ").into_owned()
}

fn is_valid_item_name(name: &str) -> bool {
    if name.chars().count() < 2 {
        return false;
    }

    if NUMERIC_ONLY.is_match(name) {
        return false;
    }

    let lower = name.to_lowercase();
    !UNIT_PREFIXES.iter().any(|unit| lower.starts_with(unit))
}
