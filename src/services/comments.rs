use super::validation::validate_comment_text;
use crate::error::Result;
use crate::models::{Category, Comment, CommentId, CommentPatch, User};
use crate::store::Sparse;
use crate::AppState;

/// Field a comment listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Length of the comment text
    Text,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn is_ascending(self) -> bool {
        self == SortOrder::Ascending
    }
}

/// Post a comment as `author`
pub fn add(state: &mut AppState, author: &User, text: &str, category: Category) -> Result<Comment> {
    validate_comment_text(text)?;

    let comment = state
        .comments
        .create(Comment::new(text.trim(), category), author.id)
        .inspect_err(|e| tracing::warn!("Comment rejected: {}", e))?;

    tracing::info!("User ID {} posted comment {}", author.id, comment.id);
    Ok(comment)
}

/// Every comment, in storage order
pub fn list_all(state: &AppState) -> &[Comment] {
    state.comments.get_all()
}

/// Comments written by `author`, keyed by store position
pub fn list_own(state: &AppState, author: &User) -> Sparse<Comment> {
    state.comments.get_by_owner(author.id)
}

/// Edit one of `author`'s comments; blank text keeps the old text
pub fn edit_own(
    state: &mut AppState,
    author: &User,
    comment_id: CommentId,
    text: &str,
    category: Option<Category>,
) -> Result<Comment> {
    let patch = CommentPatch::from_input(text.trim(), category);
    let comment = state.comments.edit_owned(comment_id, author.id, patch)?;

    tracing::info!("User ID {} edited comment {}", author.id, comment_id);
    Ok(comment.clone())
}

pub fn delete_own(state: &mut AppState, author: &User, comment_id: CommentId) -> Result<Comment> {
    let removed = state.comments.delete_owned(comment_id, author.id)?;

    tracing::info!("User ID {} deleted comment {}", author.id, comment_id);
    Ok(removed)
}

pub fn search(state: &AppState, keyword: &str) -> Sparse<Comment> {
    state.comments.search_by_text(keyword)
}

pub fn sorted(state: &AppState, key: SortKey, order: SortOrder) -> Vec<Comment> {
    match key {
        SortKey::Text => state.comments.sort_by_text_length(order.is_ascending()),
        SortKey::Category => state.comments.sort_by_category(order.is_ascending()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::auth::register;
    use crate::Config;

    fn setup() -> (AppState, User, User) {
        let mut state = AppState::new(Config::default());
        let ana = register(&mut state, "ana", "a", "a").unwrap();
        let budi = register(&mut state, "budi", "b", "b").unwrap();
        (state, ana, budi)
    }

    #[test]
    fn test_add_records_author() {
        let (mut state, ana, _) = setup();
        let comment = add(&mut state, &ana, "  mantap  ", Category::Positif).unwrap();

        assert_eq!(comment.owner_id, ana.id);
        assert_eq!(comment.text, "mantap");
    }

    #[test]
    fn test_add_rejects_blank_text() {
        let (mut state, ana, _) = setup();
        assert!(matches!(
            add(&mut state, &ana, " ", Category::Netral),
            Err(AppError::InvalidInput(_))
        ));
        assert!(state.comments.is_empty());
    }

    #[test]
    fn test_add_when_full() {
        let mut state = AppState::new(Config {
            store_capacity: 1,
            ..Config::default()
        });
        let ana = register(&mut state, "ana", "a", "a").unwrap();
        add(&mut state, &ana, "one", Category::Netral).unwrap();

        assert!(matches!(
            add(&mut state, &ana, "two", Category::Netral),
            Err(AppError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_users_only_touch_their_own_comments() {
        let (mut state, ana, budi) = setup();
        let c = add(&mut state, &ana, "punya ana", Category::Positif).unwrap();

        assert!(matches!(
            edit_own(&mut state, &budi, c.id, "diubah", None),
            Err(AppError::NotFoundOrNotOwned { .. })
        ));
        assert!(matches!(
            delete_own(&mut state, &budi, c.id),
            Err(AppError::NotFoundOrNotOwned { .. })
        ));

        let edited = edit_own(&mut state, &ana, c.id, "", Some(Category::Negatif)).unwrap();
        assert_eq!(edited.text, "punya ana");
        assert_eq!(edited.category, Category::Negatif);

        delete_own(&mut state, &ana, c.id).unwrap();
        assert!(list_all(&state).is_empty());
    }

    #[test]
    fn test_list_own_filters_by_author() {
        let (mut state, ana, budi) = setup();
        add(&mut state, &ana, "a1", Category::Netral).unwrap();
        add(&mut state, &budi, "b1", Category::Netral).unwrap();
        add(&mut state, &ana, "a2", Category::Netral).unwrap();

        let mine = list_own(&state, &ana);
        assert_eq!(mine.positions().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_sorted_dispatch() {
        let (mut state, ana, _) = setup();
        add(&mut state, &ana, "panjang sekali", Category::Negatif).unwrap();
        add(&mut state, &ana, "pendek", Category::Positif).unwrap();

        let by_len = sorted(&state, SortKey::Text, SortOrder::Ascending);
        assert_eq!(by_len[0].text, "pendek");

        let by_cat = sorted(&state, SortKey::Category, SortOrder::Descending);
        assert_eq!(by_cat[0].category, Category::Positif);
    }
}
