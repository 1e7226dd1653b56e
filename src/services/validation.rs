use crate::constants::{
    ERR_EMPTY_COMMENT, ERR_EMPTY_PASSWORD, ERR_EMPTY_USERNAME, ERR_INVALID_NUMBER,
    ERR_USERNAME_TOO_LONG, ERR_USERNAME_WHITESPACE, MAX_USERNAME_LEN,
};
use crate::error::{AppError, Result};

fn invalid(msg: &str) -> AppError {
    AppError::InvalidInput(msg.to_string())
}

pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(invalid(ERR_EMPTY_USERNAME));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(invalid(ERR_USERNAME_WHITESPACE));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(invalid(ERR_USERNAME_TOO_LONG));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(invalid(ERR_EMPTY_PASSWORD));
    }
    Ok(())
}

pub fn validate_comment_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(invalid(ERR_EMPTY_COMMENT));
    }
    Ok(())
}

/// Parse a 1-based menu number or record id
pub fn parse_number(input: &str) -> Result<u32> {
    match input.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(invalid(ERR_INVALID_NUMBER)),
    }
}
