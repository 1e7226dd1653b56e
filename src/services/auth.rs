use super::validation::{validate_password, validate_username};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::{hash_password, verify_admin_password, verify_password};
use crate::AppState;

/// Register a new user
///
/// Fails with `UserAlreadyExists` when the username is taken and with
/// `PasswordMismatch` when the confirmation differs. The password is stored
/// as a peppered hash.
pub fn register(state: &mut AppState, username: &str, password: &str, confirm: &str) -> Result<User> {
    validate_username(username)?;
    validate_password(password)?;

    if state.users.exists(username, None) {
        tracing::info!("Registration rejected, username taken");
        return Err(AppError::UserAlreadyExists(username.to_string()));
    }

    if password != confirm {
        return Err(AppError::PasswordMismatch);
    }

    let hashed = hash_password(password, &state.config.password_pepper)?;
    let user = state.users.create(User::new(username, hashed))?;

    tracing::info!("New user registered with ID {}", user.id);
    Ok(user)
}

/// Authenticate a user by username and password
///
/// Unknown usernames and wrong passwords both return `InvalidCredentials`.
pub fn login(state: &AppState, username: &str, password: &str) -> Result<User> {
    let user = match state.users.find_by_username(username) {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => {
            tracing::warn!("Login failed, unknown username");
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    if !verify_password(password, &user.password, &state.config.password_pepper) {
        tracing::warn!("Login failed for user ID {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!("User ID {} logged in", user.id);
    Ok(user.clone())
}

/// Gate for the admin menu
///
/// With no `ADMIN_PASS` configured the menu is open.
pub fn admin_login(state: &AppState, input: &str) -> Result<()> {
    let Some(expected) = state.config.admin_password.as_deref() else {
        return Ok(());
    };

    if verify_admin_password(input, expected) {
        tracing::info!("Admin session opened");
        Ok(())
    } else {
        tracing::warn!("Invalid admin password attempt");
        Err(AppError::Unauthorized)
    }
}
