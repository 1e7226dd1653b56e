use super::{contains_folded, Slots, Sparse};
use crate::error::{AppError, Result};
use crate::models::{User, UserId, UserPatch};

/// User records plus the id generator
#[derive(Debug, Clone)]
pub struct UserStore {
    slots: Slots<User>,
    last_id: UserId,
}

impl UserStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Slots::with_capacity(capacity),
            last_id: 0,
        }
    }

    /// Append a user under a freshly issued id
    ///
    /// Username uniqueness is the caller's job (see [`UserStore::exists`]).
    /// The id counter only advances when the append succeeds.
    pub fn create(&mut self, mut user: User) -> Result<User> {
        user.id = self.last_id + 1;
        self.slots.append(user.clone())?;
        self.last_id = user.id;
        Ok(user)
    }

    /// First live user whose username matches exactly (case-sensitive)
    pub fn find_by_username(&self, username: &str) -> Result<&User> {
        self.slots
            .all()
            .find(|u| u.username == username)
            .ok_or_else(|| AppError::NotFound(format!("user with username {}", username)))
    }

    pub fn find_by_id(&self, id: UserId) -> Result<&User> {
        self.slots
            .all()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("user with ID {}", id)))
    }

    /// Whether any live user other than `except` already has `username`
    pub fn exists(&self, username: &str, except: Option<usize>) -> bool {
        self.slots
            .all()
            .enumerate()
            .any(|(i, u)| u.username == username && Some(i) != except)
    }

    pub fn get_all(&self) -> &[User] {
        self.slots.as_slice()
    }

    /// Users whose username contains `needle`, ignoring case
    pub fn search_by_username(&self, needle: &str) -> Sparse<User> {
        let needle = needle.to_lowercase();
        Sparse::select(self.slots.as_slice(), |u| {
            contains_folded(&u.username, &needle)
        })
    }

    pub fn edit_at(&mut self, position: usize, patch: UserPatch) -> Result<&User> {
        let user = self.slots.get_mut(position)?;
        patch.apply(user);
        Ok(&*user)
    }

    pub fn delete_at(&mut self, position: usize) -> Result<User> {
        self.slots.delete_at(position)
    }

    pub fn position_of(&self, id: UserId) -> Option<usize> {
        self.slots.position(|u| u.id == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &Slots<User> {
        &self.slots
    }
}
