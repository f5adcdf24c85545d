//! Token authorizer Lambda.
//!
//! Receives API Gateway `TOKEN` authorizer events and answers with an
//! Allow or Deny policy. The function itself never fails on a bad token.

use anyhow::Context;
use aws_lambda_events::apigw::ApiGatewayCustomAuthorizerRequest;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use todo_core::auth::{Authorizer, AuthorizerResponse};
use todo_shared::config::{AuthConfig, load_section};

#[allow(clippy::unused_async)]
async fn handle(
    authorizer: &Authorizer,
    event: LambdaEvent<ApiGatewayCustomAuthorizerRequest>,
) -> Result<AuthorizerResponse, Error> {
    info!(
        request_id = %event.context.request_id,
        method_arn = event.payload.method_arn.as_deref().unwrap_or_default(),
        "Authorizing request"
    );
    Ok(authorizer.authorize(event.payload.authorization_token.as_deref()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authorizer=info,todo_core=info".into()),
        )
        .with(fmt::layer().json().without_time().with_ansi(false))
        .init();

    let auth: AuthConfig = load_section("auth").context("Failed to load auth configuration")?;
    let certificate = auth
        .certificate_pem()
        .context("Failed to load auth certificate")?;
    let authorizer = Authorizer::from_pem(&certificate).context("Invalid auth certificate")?;

    lambda_runtime::run(service_fn(|event| handle(&authorizer, event)))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use lambda_runtime::Context as LambdaContext;
    use serde_json::json;
    use todo_shared::testing::{self, CERTIFICATE_PEM};

    fn event(token: Option<String>) -> LambdaEvent<ApiGatewayCustomAuthorizerRequest> {
        let payload = serde_json::from_value(json!({
            "type": "TOKEN",
            "authorizationToken": token,
            "methodArn": "arn:aws:execute-api:us-east-1:123456789012:abc/dev/GET/todos"
        }))
        .unwrap();
        LambdaEvent::new(payload, LambdaContext::default())
    }

    #[tokio::test]
    async fn test_valid_token_allowed() {
        let authorizer = Authorizer::from_pem(CERTIFICATE_PEM).unwrap();
        let token = testing::sign_token("auth0|u1", Duration::minutes(5));

        let response = handle(&authorizer, event(Some(format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "principalId": "auth0|u1",
                "policyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Action": "execute-api:Invoke",
                        "Effect": "Allow",
                        "Resource": "*"
                    }]
                }
            })
        );
    }

    #[tokio::test]
    async fn test_missing_token_denied_without_error() {
        let authorizer = Authorizer::from_pem(CERTIFICATE_PEM).unwrap();

        let response = handle(&authorizer, event(None)).await.unwrap();

        assert!(!response.is_allowed());
        assert_eq!(response.principal_id, "user");
    }

    #[tokio::test]
    async fn test_foreign_token_denied_without_error() {
        let authorizer = Authorizer::from_pem(CERTIFICATE_PEM).unwrap();
        let token = testing::sign_foreign_token("auth0|u1", Duration::minutes(5));

        let response = handle(&authorizer, event(Some(format!("Bearer {token}"))))
            .await
            .unwrap();

        assert!(!response.is_allowed());
    }
}
