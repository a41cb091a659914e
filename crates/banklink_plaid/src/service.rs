// --- File: crates/banklink_plaid/src/service.rs ---
use banklink_common::{
    AccessCredential, BankLinkService, BanklinkError, BoxFuture, LinkSession, ProcessorToken,
};
use banklink_config::PlaidConfig;

use crate::logic::{
    create_link_token, create_stripe_bank_account_token, exchange_public_token,
    LinkTokenCreateResponse,
};

/// Plaid bank-linking service implementation
pub struct PlaidLinkService {
    config: PlaidConfig,
}

impl PlaidLinkService {
    /// Create a new Plaid link service
    pub fn new(config: PlaidConfig) -> Self {
        Self { config }
    }
}

impl From<LinkTokenCreateResponse> for LinkSession {
    fn from(response: LinkTokenCreateResponse) -> Self {
        LinkSession {
            link_token: response.link_token,
            expiration: response.expiration,
            request_id: response.request_id,
        }
    }
}

impl BankLinkService for PlaidLinkService {
    type Error = BanklinkError;

    fn create_link_token(&self, client_user_id: &str) -> BoxFuture<'_, LinkSession, Self::Error> {
        let client_user_id = client_user_id.to_string();
        Box::pin(async move {
            create_link_token(&self.config, &client_user_id)
                .await
                .map(LinkSession::from)
                .map_err(BanklinkError::from)
        })
    }

    fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> BoxFuture<'_, AccessCredential, Self::Error> {
        let public_token = public_token.to_string();
        Box::pin(async move {
            exchange_public_token(&self.config, &public_token)
                .await
                .map(|response| response.access_token)
                .map_err(BanklinkError::from)
        })
    }

    fn create_processor_token(
        &self,
        access: &AccessCredential,
        account_id: &str,
    ) -> BoxFuture<'_, ProcessorToken, Self::Error> {
        let access = access.clone();
        let account_id = account_id.to_string();
        Box::pin(async move {
            create_stripe_bank_account_token(&self.config, &access, &account_id)
                .await
                .map(|response| ProcessorToken(response.stripe_bank_account_token))
                .map_err(BanklinkError::from)
        })
    }
}
