use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use nfr_funding::utils::{logger, validation::Validate};
use nfr_funding::{FundingConfig, FundingGateway, GatewayRequest, GatewayResponse};

async fn function_handler(
    gateway: &FundingGateway<nfr_funding::ReqwestTransport>,
    event: LambdaEvent<GatewayRequest>,
) -> Result<GatewayResponse, Error> {
    tracing::debug!("Handling request {}", event.context.request_id);
    Ok(gateway.handle(&event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立一次配置與服務
    let config = FundingConfig::from_env()?;
    config.validate()?;
    let gateway = FundingGateway::from_config(&config)?;
    tracing::info!("NFR funding Lambda initialised for {}", config.api_domain);

    let gateway = &gateway;
    run(service_fn(move |event: LambdaEvent<GatewayRequest>| async move {
        function_handler(gateway, event).await
    }))
    .await
}
