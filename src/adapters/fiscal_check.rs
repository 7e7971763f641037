use crate::config::toml_config::VerificationConfig;
use crate::domain::model::{FiscalReceiptQuery, VerificationResponse};
use crate::domain::ports::ReceiptVerifier;
use crate::utils::error::{Result, SplitError};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

const CLIENT_USER_AGENT: &str = "BillSplitter/1.0";

impl FiscalReceiptQuery {
    /// 清理並驗證 QR code 參數，不合法時在送出請求前就回報
    pub fn normalized(&self) -> Result<FiscalReceiptQuery> {
        let mut query = FiscalReceiptQuery {
            r#fn: self.r#fn.trim().to_string(),
            fd: self.fd.trim().to_string(),
            fp: self.fp.trim().to_string(),
            t: self.t.trim().to_string(),
            s: self.s.trim().replace(',', "."),
            n: self.n.trim().to_string(),
        };

        if [&query.r#fn, &query.fd, &query.fp, &query.t, &query.s]
            .iter()
            .any(|v| v.is_empty())
        {
            return Err(SplitError::invalid_input("Missing required parameters"));
        }

        // YYYYMMDDTHHMMSS -> YYYYMMDDTHHMM
        if query.t.len() > 13 && query.t.as_bytes()[13].is_ascii_digit() {
            query.t.truncate(13);
        }

        if query.s.parse::<f64>().is_err() {
            return Err(SplitError::invalid_input(format!(
                "Invalid sum format: {}",
                query.s
            )));
        }

        Ok(query)
    }
}

/// 收據驗證服務的 HTTP 用戶端，自帶逾時與重試策略
pub struct FiscalCheckClient {
    client: Client,
    config: VerificationConfig,
}

impl FiscalCheckClient {
    pub fn new(config: VerificationConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn send_once(&self, form: &[(&str, &str)]) -> Result<VerificationResponse> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .form(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        tracing::debug!("Verification response status: {}", status);

        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

        Ok(VerificationResponse { status, body })
    }
}

#[async_trait]
impl ReceiptVerifier for FiscalCheckClient {
    async fn verify(&self, query: &FiscalReceiptQuery) -> Result<VerificationResponse> {
        let token = self
            .config
            .resolved_token()
            .ok_or_else(|| SplitError::MissingConfigError {
                field: "verification.token".to_string(),
            })?;

        let query = query.normalized()?;
        let form = [
            ("fn", query.r#fn.as_str()),
            ("fd", query.fd.as_str()),
            ("fp", query.fp.as_str()),
            ("t", query.t.as_str()),
            ("s", query.s.as_str()),
            ("n", query.n.as_str()),
            ("qr", "1"),
            ("token", token),
        ];

        tracing::info!(
            "📤 Verifying receipt fn={} fd={} fp={} t={} s={}",
            query.r#fn,
            query.fd,
            query.fp,
            query.t,
            query.s
        );

        let max_attempts = self.config.retry_attempts.max(1);
        let delay = Duration::from_secs(self.config.retry_delay_seconds);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.send_once(&form).await {
                Ok(response) if response.status >= 500 && attempt < max_attempts => {
                    tracing::warn!(
                        "⚠️ Upstream returned {} (attempt {}/{}), retrying",
                        response.status,
                        attempt,
                        max_attempts
                    );
                }
                Ok(response) => {
                    tracing::info!("📩 Verification finished with status {}", response.status);
                    return Ok(response);
                }
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(
                        "⚠️ Verification request failed (attempt {}/{}): {}",
                        attempt,
                        max_attempts,
                        e
                    );
                }
                Err(e) => return Err(e),
            }

            tokio::time::sleep(delay).await;
        }
    }
}
