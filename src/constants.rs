/// Default number of slots in each record store
pub const STORE_CAPACITY: usize = 255;

/// Owner id recorded on comments written from the admin menu
/// User ids are issued from 1, so this never collides with a real user
pub const ADMIN_OWNER_ID: u32 = 0;

/// Longest username accepted at registration
pub const MAX_USERNAME_LEN: usize = 32;

// =============================================================================
// Error Messages
// =============================================================================

/// Username was blank
pub const ERR_EMPTY_USERNAME: &str = "Username cannot be empty";

/// Username contained whitespace
pub const ERR_USERNAME_WHITESPACE: &str = "Username cannot contain spaces";

/// Username exceeded MAX_USERNAME_LEN
pub const ERR_USERNAME_TOO_LONG: &str = "Username must be at most 32 characters";

/// Password was blank
pub const ERR_EMPTY_PASSWORD: &str = "Password cannot be empty";

/// Comment text was blank
pub const ERR_EMPTY_COMMENT: &str = "Comment cannot be empty";

/// Category label not one of Positif, Netral, Negatif
pub const ERR_INVALID_CATEGORY: &str = "Category must be Positif, Netral or Negatif";

/// Menu number or id could not be parsed
pub const ERR_INVALID_NUMBER: &str = "Please enter a positive number";
