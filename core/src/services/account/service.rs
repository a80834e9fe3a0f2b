//! Account service implementation.
//!
//! Implements the flow-initiating and flow-completing entry points on top
//! of the purpose-generic verification flow. The purpose-specific parts
//! live here: which identity is bound into the code hash, which accounts
//! silently no-op (anti-enumeration), and which side effect success
//! applies.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{Account, VerificationPurpose};
use crate::errors::{CredentialError, DomainResult};
use crate::repositories::{AccountRepository, VerificationRepository};
use crate::services::verification::{IssuedCode, Mailer, VerificationFlow};

use super::config::AccountServiceConfig;
use super::email_utils::{mask_email, normalize_email, validate_email};
use super::password::{validate_new_password, PasswordHasher};

/// Account service managing credential verification flows
pub struct AccountService<A, V, M>
where
    A: AccountRepository,
    V: VerificationRepository,
    M: Mailer + 'static,
{
    /// Account repository for persistence
    accounts: Arc<A>,
    /// Purpose-generic code issue/check/consume machine
    flow: Arc<VerificationFlow<V>>,
    /// Outbound mail delivery
    mailer: Arc<M>,
    /// Password hashing
    password_hasher: PasswordHasher,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<A, V, M> AccountService<A, V, M>
where
    A: AccountRepository,
    V: VerificationRepository,
    M: Mailer + 'static,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Repository for account persistence
    /// * `flow` - Verification flow shared by the three purposes
    /// * `mailer` - Mail delivery implementation
    /// * `config` - Service configuration
    pub fn new(
        accounts: Arc<A>,
        flow: Arc<VerificationFlow<V>>,
        mailer: Arc<M>,
        config: AccountServiceConfig,
    ) -> Self {
        let password_hasher = PasswordHasher::new(config.bcrypt_cost);
        Self {
            accounts,
            flow,
            mailer,
            password_hasher,
            config,
        }
    }

    /// Register a new account and initiate email verification
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The created, not yet verified account
    /// * `Err(DomainError)` - Invalid email/password shape, or the email is
    ///   already registered
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<Account> {
        let email = normalize_email(email);
        validate_email(&email)?;
        validate_new_password(password)?;

        if self.accounts.exists_by_email(&email).await? {
            return Err(CredentialError::EmailAlreadyRegistered.into());
        }

        let password_hash = self.password_hasher.hash(password)?;
        let account = self
            .accounts
            .create(Account::new(email.clone(), password_hash))
            .await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&email),
            event = "account_registered",
            "Registered new account"
        );

        let issued = self
            .flow
            .issue(
                account.id,
                VerificationPurpose::EmailVerification,
                &account.email,
                None,
            )
            .await?;
        self.send_code_email(&account.email, "Verify your email", &issued);

        Ok(account)
    }

    /// Complete email verification with a submitted code
    pub async fn verify_email(&self, email: &str, code: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let mut account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(CredentialError::AccountNotFound)?;

        let record = self
            .flow
            .check(
                account.id,
                VerificationPurpose::EmailVerification,
                &account.email,
                code,
            )
            .await?;

        account.verify_email();
        let account = self.accounts.update(account).await?;
        self.flow.consume(&record).await?;

        tracing::info!(
            account_id = %account.id,
            event = "email_verified",
            "Account email verified"
        );
        Ok(())
    }

    /// Resend the registration verification code
    ///
    /// Silently succeeds when the account does not exist or is already
    /// verified, so the endpoint cannot be used to probe for registered
    /// emails. Rate-limit rejections are surfaced.
    pub async fn resend_verification(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        validate_email(&email)?;

        let Some(account) = self.accounts.find_by_email(&email).await? else {
            tracing::info!(
                email = %mask_email(&email),
                event = "resend_noop",
                "Resend requested for unknown email"
            );
            return Ok(());
        };
        if account.is_email_verified {
            tracing::info!(
                account_id = %account.id,
                event = "resend_noop",
                "Resend requested for already-verified account"
            );
            return Ok(());
        }

        let issued = self
            .flow
            .issue(
                account.id,
                VerificationPurpose::EmailVerification,
                &account.email,
                None,
            )
            .await?;
        self.send_code_email(&account.email, "Verify your email", &issued);
        Ok(())
    }

    /// Initiate an email change for an authenticated account
    ///
    /// The code is delivered to the new address (the one being proven),
    /// and a warning notice goes to the current address. The duplicate
    /// check here is advisory; it is re-validated at completion to close
    /// the race between two concurrent changes targeting the same address.
    pub async fn request_email_change(
        &self,
        account_id: Uuid,
        current_password: &str,
        new_email: &str,
    ) -> DomainResult<()> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(CredentialError::AccountNotFound)?;

        if !self
            .password_hasher
            .verify(current_password, &account.password_hash)?
        {
            return Err(CredentialError::InvalidCredentials.into());
        }

        let new_email = normalize_email(new_email);
        validate_email(&new_email)?;
        if new_email == account.email {
            return Err(CredentialError::EmailUnchanged.into());
        }
        if self.accounts.exists_by_email(&new_email).await? {
            return Err(CredentialError::EmailAlreadyRegistered.into());
        }

        let issued = self
            .flow
            .issue(
                account.id,
                VerificationPurpose::EmailChange,
                &new_email,
                Some(new_email.clone()),
            )
            .await?;

        tracing::info!(
            account_id = %account.id,
            new_email = %mask_email(&new_email),
            event = "email_change_requested",
            "Email change code issued"
        );

        self.send_code_email(&new_email, "Confirm your new email", &issued);
        self.dispatch_email(
            account.email.clone(),
            format!("{} email change requested", self.config.product_name),
            format!(
                "A request was made to change your {} account email to {}. \
                 If this was not you, change your password immediately.",
                self.config.product_name, new_email
            ),
        );
        Ok(())
    }

    /// Complete an email change with a submitted code
    ///
    /// The binding identity is the new address stored on the pending
    /// record, and availability of that address is re-checked before the
    /// swap: of two concurrent changes targeting the same address, only
    /// the first completion wins.
    pub async fn confirm_email_change(&self, account_id: Uuid, code: &str) -> DomainResult<()> {
        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(CredentialError::AccountNotFound)?;

        let pending = self
            .flow
            .pending(account_id, VerificationPurpose::EmailChange)
            .await?
            .ok_or(CredentialError::NoPendingVerification)?;
        let new_email = pending
            .payload
            .clone()
            .ok_or(CredentialError::NoPendingVerification)?;

        let record = self
            .flow
            .check(
                account_id,
                VerificationPurpose::EmailChange,
                &new_email,
                code,
            )
            .await?;

        // Re-validate for races: the address may have been taken since the
        // change was requested
        if self.accounts.exists_by_email(&new_email).await? {
            return Err(CredentialError::EmailAlreadyRegistered.into());
        }

        let old_email = account.email.clone();
        account.change_email(new_email);
        let account = self.accounts.update(account).await?;
        self.flow.consume(&record).await?;

        tracing::info!(
            account_id = %account.id,
            old_email = %mask_email(&old_email),
            new_email = %mask_email(&account.email),
            event = "email_changed",
            "Account email changed"
        );
        Ok(())
    }

    /// Initiate a password reset
    ///
    /// Always succeeds for unknown emails without creating a record, so
    /// the endpoint cannot be used to probe for registered addresses.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        validate_email(&email)?;

        let Some(account) = self.accounts.find_by_email(&email).await? else {
            tracing::info!(
                email = %mask_email(&email),
                event = "password_reset_noop",
                "Password reset requested for unknown email"
            );
            return Ok(());
        };

        let issued = self
            .flow
            .issue(
                account.id,
                VerificationPurpose::PasswordReset,
                &account.email,
                None,
            )
            .await?;
        self.send_code_email(&account.email, "Reset your password", &issued);
        Ok(())
    }

    /// Complete a password reset with a submitted code and new password
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let email = normalize_email(email);
        // Shape checks run before any stored state is touched
        validate_new_password(new_password)?;

        let mut account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(CredentialError::AccountNotFound)?;

        let record = self
            .flow
            .check(
                account.id,
                VerificationPurpose::PasswordReset,
                &account.email,
                code,
            )
            .await?;

        let password_hash = self.password_hasher.hash(new_password)?;
        account.set_password_hash(password_hash);
        let account = self.accounts.update(account).await?;
        self.flow.consume(&record).await?;

        tracing::info!(
            account_id = %account.id,
            event = "password_reset",
            "Account password reset"
        );
        Ok(())
    }

    /// Compose and dispatch a code-bearing email
    fn send_code_email(&self, to: &str, subject: &str, issued: &IssuedCode) {
        let ttl_minutes = self.flow.config().code_ttl_minutes;
        let body = format!(
            "Your {} verification code is {}. It expires in {} minutes.",
            self.config.product_name, issued.code, ttl_minutes
        );
        self.dispatch_email(
            to.to_string(),
            format!("{}: {}", self.config.product_name, subject),
            body,
        );
    }

    /// Fire-and-forget mail dispatch with a catch-log-discard boundary
    ///
    /// The caller's success contract never depends on mail-relay health:
    /// a delivery failure is logged and the code stays issued until the
    /// user requests a resend.
    fn dispatch_email(&self, to: String, subject: String, body: String) {
        let mailer = Arc::clone(&self.mailer);
        let recipient = mask_email(&to);
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&to, &subject, &body).await {
                tracing::error!(
                    to = %recipient,
                    error = %e,
                    event = "mail_dispatch_failed",
                    "Failed to deliver notification email"
                );
            }
        });
    }
}
