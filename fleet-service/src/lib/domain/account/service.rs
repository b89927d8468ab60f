use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::Role;
use crate::domain::account::models::SessionIdentity;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Auth service: login, registration and token verification.
///
/// Stateless apart from the injected credential store and authenticator.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hasher and token codec
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError> {
        if command.email.trim().is_empty() || command.password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }

        let email = EmailAddress::normalize(&command.email);
        let Some(account) = self.repository.find_by_email(&email).await? else {
            tracing::warn!(email = %email, "Login rejected: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let claims = auth::Claims::for_account(
            account.id,
            account.email.as_str(),
            Some(account.role.as_str().to_string()),
            self.authenticator.token_ttl_hours(),
        );

        let result = self
            .authenticator
            .authenticate(&command.password, &account.password_hash, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(account_id = %account.id, "Login rejected: wrong password");
                    AccountError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => AccountError::Password(err.to_string()),
                AuthenticationError::JwtError(err) => AccountError::Token(err.to_string()),
            })?;

        tracing::info!(account_id = %account.id, role = %account.role, "Login succeeded");

        Ok(LoginOutcome {
            account: account.into(),
            token: result.access_token,
        })
    }

    async fn register(
        &self,
        command: RegisterAccountCommand,
    ) -> Result<AccountProfile, AccountError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateAccount(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| AccountError::Password(e.to_string()))?;

        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            name: command.name,
            role: command.role.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(account).await?;

        tracing::info!(
            account_id = %created.id,
            role = %created.role,
            "Account registered"
        );

        Ok(created.into())
    }

    async fn verify_token(&self, token: &str) -> Result<SessionIdentity, AccountError> {
        let claims: auth::Claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            AccountError::InvalidToken
        })?;

        let account_id =
            AccountId::from_string(&claims.sub).map_err(|_| AccountError::InvalidToken)?;

        Ok(SessionIdentity {
            account_id,
            email: claims.email,
            role: claims.role.as_deref().and_then(|r| r.parse::<Role>().ok()),
        })
    }

    async fn get_account(&self, id: &AccountId) -> Result<AccountProfile, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(AccountProfile::from)
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}
