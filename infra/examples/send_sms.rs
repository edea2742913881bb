//! Send one templated SMS with the configured connector
//!
//! Run with: cargo run --example send_sms -- +8613800138000 Register
//!
//! The connector configuration is read from
//! `<sms.config_dir>/<sms.connector_id>.json`. Set
//! `SMSGATE__SMS__PROVIDER=aliyun` to go through Aliyun instead of the mock.

use anyhow::Context;
use serde_json::json;
use sg_infra::sms::{create_sms_connector, FileConfigResolver};
use sg_infra::{load_config, SendMessageRequest, UsageType};
use sg_shared::init_tracing;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_config()?;
    init_tracing(&settings.logging)?;

    let mut args = std::env::args().skip(1);
    let to = args.next().context("usage: send_sms <phone> [usage type]")?;
    let usage_type: UsageType = args
        .next()
        .as_deref()
        .unwrap_or("Register")
        .parse()
        .map_err(anyhow::Error::msg)?;

    let resolver = Arc::new(FileConfigResolver::new(&settings.sms.config_dir));
    let connector = create_sms_connector(&settings.sms, resolver);

    println!(
        "Sending {} message via {} ({})",
        usage_type,
        connector.provider_name(),
        connector.connector_id()
    );

    let request = SendMessageRequest::new(to, usage_type, json!({ "code": "123456" }));
    match connector.send_message(&request, None).await {
        Ok(receipt) => {
            println!("Accepted: HTTP {}", receipt.status);
            println!("  RequestId: {}", receipt.request_id.unwrap_or_default());
            println!("  BizId:     {}", receipt.biz_id.unwrap_or_default());
        }
        Err(e) => {
            println!("Failed [{}]: {}", e.code(), e);
        }
    }

    Ok(())
}
