use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::SessionIdentity;

/// Port for authentication operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Check credentials and mint a session token.
    ///
    /// # Arguments
    /// * `command` - Raw email and password
    ///
    /// # Returns
    /// Account profile and signed token
    ///
    /// # Errors
    /// * `MissingCredentials` - Email or password empty
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `DatabaseError` - Store lookup failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError>;

    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated registration input
    ///
    /// # Returns
    /// Created account profile
    ///
    /// # Errors
    /// * `DuplicateAccount` - Email already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterAccountCommand)
        -> Result<AccountProfile, AccountError>;

    /// Verify a session token and resolve the identity it carries.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, tampered or expired token
    async fn verify_token(&self, token: &str) -> Result<SessionIdentity, AccountError>;

    /// Retrieve an account profile by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store lookup failed
    async fn get_account(&self, id: &AccountId) -> Result<AccountProfile, AccountError>;
}

/// Credential store operations.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `DuplicateAccount` - Email uniqueness violated
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by normalized (lowercase) email.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
}
