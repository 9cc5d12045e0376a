//! Gateway Adapters - TtsGatewayPort 的具体实现

mod fake_gateway_client;
mod http_gateway_client;

pub use fake_gateway_client::FakeGatewayClient;
pub use http_gateway_client::{HttpGatewayClient, HttpGatewayConfig};
