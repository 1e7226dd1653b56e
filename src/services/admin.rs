use serde::Serialize;

use super::validation::{validate_comment_text, validate_password, validate_username};
use crate::constants::ADMIN_OWNER_ID;
use crate::error::{AppError, Result};
use crate::models::{Category, Comment, CommentId, CommentPatch, User, UserPatch};
use crate::security::hash_password;
use crate::store::Sparse;
use crate::AppState;

/// Summary counts shown on the admin stats screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub users: usize,
    pub comments: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

// =============================================================================
// Users
// =============================================================================

pub fn list_users(state: &AppState) -> &[User] {
    state.users.get_all()
}

pub fn search_users(state: &AppState, keyword: &str) -> Sparse<User> {
    state.users.search_by_username(keyword)
}

pub fn create_user(state: &mut AppState, username: &str, password: &str, confirm: &str) -> Result<User> {
    let user = super::auth::register(state, username, password, confirm)?;
    tracing::info!("Admin created user ID {}", user.id);
    Ok(user)
}

/// Edit the user shown as `number` (1-based) in the user table
///
/// Blank username or password keeps the current value. A new username must
/// not belong to any other user; a new password must match `confirm`.
pub fn edit_user(
    state: &mut AppState,
    number: u32,
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<User> {
    let position = to_position(state, number)?;

    if !username.is_empty() {
        validate_username(username)?;
        if state.users.exists(username, Some(position)) {
            return Err(AppError::UserAlreadyExists(username.to_string()));
        }
    }

    let password = if password.is_empty() {
        String::new()
    } else {
        validate_password(password)?;
        if password != confirm {
            return Err(AppError::PasswordMismatch);
        }
        hash_password(password, &state.config.password_pepper)?
    };

    let user = state
        .users
        .edit_at(position, UserPatch::from_input(username, &password))?
        .clone();

    tracing::info!("Admin edited user ID {}", user.id);
    Ok(user)
}

/// Delete the user shown as `number` (1-based); their comments stay
pub fn delete_user(state: &mut AppState, number: u32) -> Result<User> {
    let position = to_position(state, number)?;
    let removed = state.users.delete_at(position)?;

    tracing::info!("Admin deleted user ID {}", removed.id);
    Ok(removed)
}

fn to_position(state: &AppState, number: u32) -> Result<usize> {
    let live = state.users.len();
    match (number as usize).checked_sub(1) {
        Some(position) if position < live => Ok(position),
        _ => Err(AppError::OutOfRange {
            position: number as usize,
            live,
        }),
    }
}

// =============================================================================
// Comments
// =============================================================================

pub fn add_comment(state: &mut AppState, text: &str, category: Category) -> Result<Comment> {
    validate_comment_text(text)?;

    let comment = state
        .comments
        .create(Comment::new(text.trim(), category), ADMIN_OWNER_ID)?;

    tracing::info!("Admin posted comment {}", comment.id);
    Ok(comment)
}

pub fn edit_comment(
    state: &mut AppState,
    comment_id: CommentId,
    text: &str,
    category: Option<Category>,
) -> Result<Comment> {
    let patch = CommentPatch::from_input(text.trim(), category);
    let comment = state.comments.edit_by_id(comment_id, patch)?.clone();

    tracing::info!("Admin edited comment {}", comment_id);
    Ok(comment)
}

pub fn delete_comment(state: &mut AppState, comment_id: CommentId) -> Result<Comment> {
    let removed = state.comments.delete_by_id(comment_id)?;

    tracing::info!("Admin deleted comment {}", comment_id);
    Ok(removed)
}

pub fn stats(state: &AppState) -> Stats {
    Stats {
        users: state.users.len(),
        comments: state.comments.len(),
        positive: state.comments.count_by_category(Category::Positif),
        neutral: state.comments.count_by_category(Category::Netral),
        negative: state.comments.count_by_category(Category::Negatif),
    }
}
