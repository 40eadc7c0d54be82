//! # Constants
//!
//! Format constants shared by the four decryption layers.

/// AES block size in bytes. Every IV and every ciphertext chunk is this long.
pub const BLOCK_SIZE: usize = 16;

/// Service name the desktop reader stores its device secret under.
pub const CREDENTIAL_SERVICE: &str = "com.ridi.books";

/// Account name paired with [`CREDENTIAL_SERVICE`].
pub const CREDENTIAL_ACCOUNT: &str = "global";

/// Exact byte length of a decoded device secret (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`).
pub const DEVICE_SECRET_LEN: usize = 36;

/// Opaque header in front of the settings ciphertext. Skipped, never parsed.
pub const SETTINGS_HEADER_LEN: usize = 256;

/// JSON pointer to the device identifier inside the decrypted settings record.
pub const DEVICE_ID_POINTER: &str = "/data/device/deviceId";

/// Number of leading device-identifier bytes used as the key-material key.
pub const DEVICE_KEY_LEN: usize = 16;

/// First character (0-indexed, inclusive) of the book key inside the key-material text.
pub const BOOK_KEY_CHAR_START: usize = 68;

/// One past the last character of the book key inside the key-material text.
pub const BOOK_KEY_CHAR_END: usize = 84;

/// Minimum number of decoded characters a key-material text must hold.
pub const KEY_MATERIAL_MIN_CHARS: usize = BOOK_KEY_CHAR_END;
