use super::{contains_folded, Slots, Sparse};
use crate::error::{AppError, Result};
use crate::models::{Category, Comment, CommentId, CommentPatch, UserId};

/// Comment records plus the process-wide id generator
#[derive(Debug, Clone)]
pub struct CommentStore {
    slots: Slots<Comment>,
    last_id: CommentId,
}

impl CommentStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Slots::with_capacity(capacity),
            last_id: 0,
        }
    }

    /// Append `comment` under a new id owned by `owner_id`
    ///
    /// Ids strictly increase and are never reissued, even after deletes.
    pub fn create(&mut self, comment: Comment, owner_id: UserId) -> Result<Comment> {
        let comment = Comment {
            id: self.last_id + 1,
            owner_id,
            ..comment
        };
        self.slots.append(comment.clone())?;
        self.last_id = comment.id;
        Ok(comment)
    }

    pub fn get_all(&self) -> &[Comment] {
        self.slots.as_slice()
    }

    /// Comments whose text contains `needle`, ignoring case
    pub fn search_by_text(&self, needle: &str) -> Sparse<Comment> {
        let needle = needle.to_lowercase();
        Sparse::select(self.slots.as_slice(), |c| contains_folded(&c.text, &needle))
    }

    pub fn get_by_owner(&self, owner_id: UserId) -> Sparse<Comment> {
        Sparse::select(self.slots.as_slice(), |c| c.owner_id == owner_id)
    }

    /// Copy of the live comments ordered by text length (selection sort)
    ///
    /// Ties are not kept in their original order.
    pub fn sort_by_text_length(&self, ascending: bool) -> Vec<Comment> {
        let mut sorted = self.slots.as_slice().to_vec();
        let n = sorted.len();

        for i in 0..n.saturating_sub(1) {
            let mut pick = i;
            for j in i + 1..n {
                let better = if ascending {
                    sorted[j].text_len() < sorted[pick].text_len()
                } else {
                    sorted[j].text_len() > sorted[pick].text_len()
                };
                if better {
                    pick = j;
                }
            }
            if pick != i {
                sorted.swap(i, pick);
            }
        }

        sorted
    }

    /// Copy of the live comments ordered by category rank (insertion sort)
    ///
    /// Ascending runs Negatif, Netral, Positif. Equal categories keep their
    /// storage order.
    pub fn sort_by_category(&self, ascending: bool) -> Vec<Comment> {
        let mut sorted = self.slots.as_slice().to_vec();

        for i in 1..sorted.len() {
            let rank = sorted[i].category.rank();
            let mut j = i;
            while j > 0 {
                let prev = sorted[j - 1].category.rank();
                let out_of_order = if ascending { prev > rank } else { prev < rank };
                if !out_of_order {
                    break;
                }
                j -= 1;
            }
            // shift sorted[j..i] right by one, current record lands at j
            sorted[j..=i].rotate_right(1);
        }

        sorted
    }

    /// Patch a comment only if it exists and belongs to `owner_id`
    pub fn edit_owned(
        &mut self,
        comment_id: CommentId,
        owner_id: UserId,
        patch: CommentPatch,
    ) -> Result<&Comment> {
        let position = self
            .slots
            .position(|c| c.id == comment_id && c.owner_id == owner_id)
            .ok_or(AppError::NotFoundOrNotOwned {
                comment_id,
                owner_id,
            })?;

        self.patch_at(position, patch)
    }

    /// Admin edit: match by id alone
    pub fn edit_by_id(&mut self, comment_id: CommentId, patch: CommentPatch) -> Result<&Comment> {
        let position = self.position_by_id(comment_id)?;
        self.patch_at(position, patch)
    }

    /// Remove a comment only if it exists and belongs to `owner_id`
    pub fn delete_owned(&mut self, comment_id: CommentId, owner_id: UserId) -> Result<Comment> {
        let position = self
            .slots
            .position(|c| c.id == comment_id && c.owner_id == owner_id)
            .ok_or(AppError::NotFoundOrNotOwned {
                comment_id,
                owner_id,
            })?;

        self.slots.delete_at(position)
    }

    /// Admin delete: match by id alone
    pub fn delete_by_id(&mut self, comment_id: CommentId) -> Result<Comment> {
        let position = self.position_by_id(comment_id)?;
        self.slots.delete_at(position)
    }

    pub fn count_by_category(&self, category: Category) -> usize {
        self.slots.all().filter(|c| c.category == category).count()
    }

    /// Highest id handed out so far (0 before the first create)
    pub fn last_issued_id(&self) -> CommentId {
        self.last_id
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &Slots<Comment> {
        &self.slots
    }

    fn position_by_id(&self, comment_id: CommentId) -> Result<usize> {
        self.slots
            .position(|c| c.id == comment_id)
            .ok_or_else(|| AppError::NotFound(format!("comment with ID {}", comment_id)))
    }

    fn patch_at(&mut self, position: usize, patch: CommentPatch) -> Result<&Comment> {
        let comment = self.slots.get_mut(position)?;
        patch.apply(comment);
        Ok(&*comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category::*;

    fn store_with(rows: &[(&str, Category, UserId)]) -> CommentStore {
        let mut store = CommentStore::new(16);
        for (text, category, owner) in rows {
            store.create(Comment::new(*text, *category), *owner).unwrap();
        }
        store
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let store = store_with(&[("a", Netral, 1), ("b", Netral, 2), ("c", Netral, 1)]);
        let ids: Vec<_> = store.get_all().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.last_issued_id(), 3);
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let mut store = store_with(&[("a", Netral, 1), ("b", Netral, 1)]);
        store.delete_by_id(2).unwrap();
        store.delete_by_id(1).unwrap();

        let next = store.create(Comment::new("c", Positif), 1).unwrap();
        assert_eq!(next.id, 3);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_full_store_keeps_counter() {
        let mut store = CommentStore::new(1);
        store.create(Comment::new("a", Netral), 1).unwrap();
        assert!(matches!(
            store.create(Comment::new("b", Netral), 1),
            Err(AppError::CapacityExceeded { capacity: 1 })
        ));
        assert_eq!(store.last_issued_id(), 1);
    }

    #[test]
    fn test_search_by_text_sparse_positions() {
        let store = store_with(&[
            ("very good job", Positif, 1),
            ("bad", Negatif, 1),
            ("so good", Positif, 2),
        ]);
        let hits = store.search_by_text("good");

        assert_eq!(hits.positions().collect::<Vec<_>>(), vec![0, 2]);
        assert!(hits.get(1).is_none());
        assert_eq!(hits.span(), 3);
    }

    #[test]
    fn test_search_by_text_ignores_case() {
        let store = store_with(&[("Sangat BAGUS", Positif, 1)]);
        assert_eq!(store.search_by_text("bagus").len(), 1);
        assert_eq!(store.search_by_text("").len(), 1);
        assert!(store.search_by_text("jelek").is_empty());
    }

    #[test]
    fn test_sort_by_text_length_ascending() {
        let store = store_with(&[
            ("aaaaa", Netral, 1),
            ("bb", Netral, 1),
            ("cccccccc", Netral, 1),
            ("dd", Netral, 1),
        ]);
        let lens: Vec<_> = store
            .sort_by_text_length(true)
            .iter()
            .map(|c| c.text_len())
            .collect();

        assert_eq!(lens, vec![2, 2, 5, 8]);
    }

    #[test]
    fn test_sort_by_text_length_descending() {
        let store = store_with(&[("aaaaa", Netral, 1), ("bb", Netral, 1), ("cccccccc", Netral, 1)]);
        let lens: Vec<_> = store
            .sort_by_text_length(false)
            .iter()
            .map(|c| c.text_len())
            .collect();

        assert_eq!(lens, vec![8, 5, 2]);
    }

    #[test]
    fn test_sort_does_not_touch_store() {
        let store = store_with(&[("aaaaa", Netral, 1), ("bb", Netral, 1)]);
        let _ = store.sort_by_text_length(true);
        let _ = store.sort_by_category(true);
        assert_eq!(store.get_all()[0].text, "aaaaa");
    }

    #[test]
    fn test_sort_by_category_ascending_is_stable() {
        let store = store_with(&[
            ("first", Netral, 1),
            ("second", Positif, 1),
            ("third", Netral, 1),
            ("fourth", Negatif, 1),
        ]);
        let sorted = store.sort_by_category(true);

        let cats: Vec<_> = sorted.iter().map(|c| c.category).collect();
        assert_eq!(cats, vec![Negatif, Netral, Netral, Positif]);
        assert_eq!(sorted[1].text, "first");
        assert_eq!(sorted[2].text, "third");
    }

    #[test]
    fn test_sort_by_category_descending() {
        let store = store_with(&[
            ("n1", Netral, 1),
            ("neg", Negatif, 1),
            ("pos", Positif, 1),
            ("n2", Netral, 1),
        ]);
        let texts: Vec<_> = store
            .sort_by_category(false)
            .into_iter()
            .map(|c| c.text)
            .collect();

        assert_eq!(texts, vec!["pos", "n1", "n2", "neg"]);
    }

    #[test]
    fn test_sort_empty_and_single() {
        let empty = CommentStore::new(4);
        assert!(empty.sort_by_text_length(true).is_empty());
        assert!(empty.sort_by_category(false).is_empty());

        let one = store_with(&[("x", Positif, 1)]);
        assert_eq!(one.sort_by_text_length(false).len(), 1);
    }

    #[test]
    fn test_edit_owned_rejects_foreign_comment() {
        let mut store = CommentStore::new(8);
        for _ in 0..4 {
            store.create(Comment::new("filler", Netral), 1).unwrap();
        }
        let target = store.create(Comment::new("mine", Positif), 3).unwrap();
        assert_eq!(target.id, 5);

        let result = store.edit_owned(5, 7, CommentPatch::from_input("hijacked", None));
        assert!(matches!(
            result,
            Err(AppError::NotFoundOrNotOwned {
                comment_id: 5,
                owner_id: 7
            })
        ));
        assert_eq!(store.get_all()[4].text, "mine");
    }

    #[test]
    fn test_edit_owned_partial_update() {
        let mut store = store_with(&[("old text", Positif, 2)]);
        let edited = store
            .edit_owned(1, 2, CommentPatch::from_input("", Some(Negatif)))
            .unwrap();

        assert_eq!(edited.text, "old text");
        assert_eq!(edited.category, Negatif);
        assert_eq!(edited.owner_id, 2);
    }

    #[test]
    fn test_edit_by_id_missing() {
        let mut store = store_with(&[("a", Netral, 1)]);
        assert!(matches!(
            store.edit_by_id(9, CommentPatch::default()),
            Err(AppError::NotFound(_))
        ));
        assert_eq!(
            store
                .edit_by_id(1, CommentPatch::from_input("b", None))
                .unwrap()
                .text,
            "b"
        );
    }

    #[test]
    fn test_delete_owned_compacts() {
        let mut store = store_with(&[("a", Netral, 1), ("b", Netral, 1), ("c", Netral, 1)]);
        store.delete_owned(2, 1).unwrap();

        let texts: Vec<_> = store.get_all().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.slots().raw_slot(2), Some(&Comment::default()));
        assert_eq!(store.last_issued_id(), 3);
    }

    #[test]
    fn test_delete_owned_wrong_owner() {
        let mut store = store_with(&[("a", Netral, 1)]);
        assert!(matches!(
            store.delete_owned(1, 2),
            Err(AppError::NotFoundOrNotOwned { .. })
        ));
        assert!(matches!(
            store.delete_owned(4, 1),
            Err(AppError::NotFoundOrNotOwned { .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_by_id_missing() {
        let mut store = store_with(&[("a", Netral, 1)]);
        assert!(matches!(store.delete_by_id(2), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_get_by_owner_sparse() {
        let store = store_with(&[("a", Netral, 1), ("b", Netral, 2), ("c", Netral, 1)]);
        let mine = store.get_by_owner(1);

        assert_eq!(mine.positions().collect::<Vec<_>>(), vec![0, 2]);
        assert!(store.get_by_owner(9).is_empty());
    }

    #[test]
    fn test_count_by_category() {
        let store = store_with(&[
            ("a", Positif, 1),
            ("b", Negatif, 1),
            ("c", Positif, 2),
        ]);
        assert_eq!(store.count_by_category(Positif), 2);
        assert_eq!(store.count_by_category(Negatif), 1);
        assert_eq!(store.count_by_category(Netral), 0);
    }
}
