//! Password input for the command-line tools
//!
//! The password comes from `SECRETBOX_PASSWORD` when set (for scripting),
//! otherwise from a hidden terminal prompt. Either way it lands in guarded
//! memory straight away.

use crate::crypto::GuardedBuffer;
use crate::error::{SecretboxError, SecretboxResult};

/// Environment variable that bypasses the interactive prompt
pub const PASSWORD_ENV: &str = "SECRETBOX_PASSWORD";

/// Obtain the password, asking twice when `confirm` is set
pub fn read_password(confirm: bool) -> SecretboxResult<GuardedBuffer> {
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(from_env) => GuardedBuffer::from_vec(from_env.into_bytes()),
        Err(_) => prompt_with_confirmation(confirm)?,
    };

    if password.is_empty() {
        return Err(SecretboxError::Config("password must not be empty".to_string()));
    }

    Ok(password)
}

fn prompt_with_confirmation(confirm: bool) -> SecretboxResult<GuardedBuffer> {
    let first = prompt_password("enter password: ")?;
    if !confirm {
        return Ok(first);
    }

    let second = prompt_password("enter password (again): ")?;
    if first.bytes()? != second.bytes()? {
        return Err(SecretboxError::Config("password mismatch".to_string()));
    }

    Ok(first)
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> SecretboxResult<GuardedBuffer> {
    let password = rpassword::prompt_password(prompt)
        .map_err(|e| SecretboxError::Io(format!("Failed to read password: {}", e)))?;
    Ok(GuardedBuffer::from_vec(password.into_bytes()))
}
