use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::RoleError;
use crate::domain::errors::IdError;

/// Account aggregate entity.
///
/// A login identity. The password hash never leaves the domain layer:
/// callers outside it receive an [`AccountProfile`].
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|_| IdError::InvalidFormat {
                kind: "account",
                value: s.to_string(),
            })
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Access role attached to an account and embedded in its session tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    Driver,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Driver];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Driver => "driver",
        }
    }

    /// Parse a role, falling back to the default role for unknown values.
    ///
    /// Used where a value has already passed the transport boundary (stored
    /// rows), so an unexpected string degrades to the least-privileged role.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "driver" => Ok(Role::Driver),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Email address type
///
/// Stored trimmed and lowercased. Must look like `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, normalized email address.
    ///
    /// # Errors
    /// * `Empty` - Blank input
    /// * `InvalidFormat` - Not an address or the domain has no dot-separated suffix
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let normalized = Self::normalize(email.as_ref());
        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }

        let parsed = email_address::EmailAddress::from_str(&normalized)
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))?;

        let has_suffix = parsed
            .domain()
            .rsplit_once('.')
            .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty());
        if !has_suffix {
            return Err(EmailError::InvalidFormat(normalized));
        }

        Ok(Self(normalized))
    }

    /// Canonical lookup form of a raw email: trimmed and lowercased.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Rebuild from a value that was validated before it was stored.
    pub fn from_stored(email: String) -> Self {
        Self(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the registration policy.
///
/// Deliberately not `Display`/`Serialize`; the only way out is `expose`.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(String);

impl PlainPassword {
    pub const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `Empty` - Empty input
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length == 0 {
            Err(PasswordPolicyError::Empty)
        } else if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(***)")
    }
}

/// Account as seen outside the domain: everything but the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub id: AccountId,
    pub email: EmailAddress,
    pub name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
            role: account.role,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Command to register a new account with validated fields.
#[derive(Debug)]
pub struct RegisterAccountCommand {
    pub email: EmailAddress,
    pub password: PlainPassword,
    pub name: Option<String>,
    pub role: Option<Role>,
}

impl RegisterAccountCommand {
    /// Validate raw registration input.
    ///
    /// Checks run in a fixed order and the first failure wins: both
    /// credentials present, email shape, password length, role value.
    ///
    /// # Errors
    /// * `MissingCredentials` - Email or password empty
    /// * `InvalidEmail` - Email not shaped like `local@domain.tld`
    /// * `InvalidPassword` - Password shorter than 6 characters
    /// * `InvalidRole` - Role supplied but not `admin`/`driver`
    pub fn parse(
        email: &str,
        password: String,
        name: Option<String>,
        role: Option<&str>,
    ) -> Result<Self, AccountError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }

        let email = EmailAddress::new(email)?;
        let password = PlainPassword::new(password)?;
        let role = role.map(str::parse::<Role>).transpose()?;
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            email,
            password,
            name,
            role,
        })
    }
}

/// Raw login input. Only emptiness is checked before the lookup.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Successful login: the account plus a freshly minted session token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub account: AccountProfile,
    pub token: String,
}

/// Identity resolved from a verified session token.
///
/// `role` is `None` when the token carried no role or one this build does
/// not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub account_id: AccountId,
    pub email: String,
    pub role: Option<Role>,
}

impl SessionIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  Dispatch@Fleet.IO ").unwrap();
        assert_eq!(email.as_str(), "dispatch@fleet.io");
    }

    #[test]
    fn test_email_requires_domain_suffix() {
        assert!(matches!(
            EmailAddress::new("not-an-email"),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(matches!(
            EmailAddress::new("driver@localhost"),
            Err(EmailError::InvalidFormat(_))
        ));
        assert_eq!(EmailAddress::new("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_password_policy() {
        assert!(PlainPassword::new("123456".to_string()).is_ok());
        assert_eq!(
            PlainPassword::new("12345".to_string()),
            Err(PasswordPolicyError::TooShort { min: 6, actual: 5 })
        );
        assert_eq!(
            PlainPassword::new(String::new()),
            Err(PasswordPolicyError::Empty)
        );
    }

    #[test]
    fn test_plain_password_debug_is_redacted() {
        let password = PlainPassword::new("hunter22".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter22"));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("driver".parse::<Role>(), Ok(Role::Driver));
        assert!("superuser".parse::<Role>().is_err());
        assert_eq!(Role::parse_or_default("superuser"), Role::Driver);
        assert_eq!(Role::default(), Role::Driver);
    }

    #[test]
    fn test_register_validation_order() {
        // Missing credentials wins over a malformed email
        assert!(matches!(
            RegisterAccountCommand::parse("not-an-email", String::new(), None, None),
            Err(AccountError::MissingCredentials)
        ));
        assert!(matches!(
            RegisterAccountCommand::parse("", "secret1".to_string(), None, None),
            Err(AccountError::MissingCredentials)
        ));
        // Email shape wins over password length
        assert!(matches!(
            RegisterAccountCommand::parse("not-an-email", "12345".to_string(), None, None),
            Err(AccountError::InvalidEmail(_))
        ));
        // Password length wins over role
        assert!(matches!(
            RegisterAccountCommand::parse("a@fleet.io", "12345".to_string(), None, Some("boss")),
            Err(AccountError::InvalidPassword(_))
        ));
        assert!(matches!(
            RegisterAccountCommand::parse("a@fleet.io", "123456".to_string(), None, Some("boss")),
            Err(AccountError::InvalidRole(_))
        ));
    }

    #[test]
    fn test_register_parse_success() {
        let command = RegisterAccountCommand::parse(
            "New.Driver@Fleet.io",
            "123456".to_string(),
            Some("  ".to_string()),
            Some("admin"),
        )
        .unwrap();

        assert_eq!(command.email.as_str(), "new.driver@fleet.io");
        assert_eq!(command.name, None);
        assert_eq!(command.role, Some(Role::Admin));
    }

    #[test]
    fn test_error_messages() {
        let err = AccountError::from(EmailError::InvalidFormat("x".into()));
        assert_eq!(err.to_string(), "Please provide a valid email address");

        let err = AccountError::from(PasswordPolicyError::TooShort { min: 6, actual: 5 });
        assert_eq!(err.to_string(), "Password must be at least 6 characters long");
    }
}
