use aws_sdk_dynamodb::config::Region;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use users_handler::{ApiResponse, Config, DynamoStore, UserHandler};

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = Config::from_env();

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let client = aws_sdk_dynamodb::Client::new(&aws_config);
    let handler = UserHandler::new(DynamoStore::new(client, config.table_name));
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<ApiResponse, Error>(handler.handle(&event.payload).await)
    }))
    .await
}
