//! Record storage — trait + Windows registry backend.

use std::fmt;

// ── Error type ──

/// Record store errors.
///
/// String payloads follow the convention **"context: details"** where
/// *context* is the registry path or value being accessed and *details*
/// is the underlying OS error.
#[derive(Debug)]
pub enum StoreError {
    /// No registry on this platform.
    Unavailable(String),
    OpenFailed(String),
    ReadFailed(String),
    WriteFailed(String),
    /// The value exists but is not `REG_BINARY`.
    WrongType(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(e) => write!(f, "Record store unavailable: {e}"),
            StoreError::OpenFailed(e) => write!(f, "Failed to open registry key: {e}"),
            StoreError::ReadFailed(e) => write!(f, "Failed to read record: {e}"),
            StoreError::WriteFailed(e) => write!(f, "Failed to write record: {e}"),
            StoreError::WrongType(e) => write!(f, "Unexpected registry value type: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

pub type Result<T> = std::result::Result<T, StoreError>;

// ── Trait ──

/// One opened record location (registry key + value name).
///
/// The handle is acquired once and released when dropped.
pub trait RecordKey {
    /// Fetch the record. `Ok(None)` when the value does not exist.
    fn read(&self) -> Result<Option<Vec<u8>>>;
    /// Overwrite the record as a binary value.
    fn write(&self, data: &[u8]) -> Result<()>;
}

impl<K: RecordKey + ?Sized> RecordKey for &K {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }
}

// ── Windows backend ──

/// A value under `HKEY_CURRENT_USER`.
#[cfg(windows)]
pub struct RegistryKey {
    key: winreg::RegKey,
    path: String,
    value_name: String,
}

#[cfg(windows)]
impl RegistryKey {
    /// Open `HKCU\<path>` for reading and writing.
    pub fn open(path: &str, value_name: &str) -> Result<Self> {
        use winreg::enums::{HKEY_CURRENT_USER, KEY_READ, KEY_WRITE};

        let hkcu = winreg::RegKey::predef(HKEY_CURRENT_USER);
        let key = hkcu
            .open_subkey_with_flags(path, KEY_READ | KEY_WRITE)
            .map_err(|e| StoreError::OpenFailed(format!("{path}: {e}")))?;
        log::debug!("opened HKCU\\{path}");
        Ok(RegistryKey {
            key,
            path: path.to_string(),
            value_name: value_name.to_string(),
        })
    }
}

#[cfg(windows)]
impl RecordKey for RegistryKey {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        use winreg::enums::RegType;

        let value = match self.key.get_raw_value(&self.value_name) {
            Ok(v) => v,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::ReadFailed(format!(
                    "{}\\{}: {e}",
                    self.path, self.value_name
                )));
            }
        };
        if !matches!(value.vtype, RegType::REG_BINARY) {
            return Err(StoreError::WrongType(format!(
                "{}\\{}: {:?}",
                self.path, self.value_name, value.vtype
            )));
        }
        Ok(Some(value.bytes))
    }

    fn write(&self, data: &[u8]) -> Result<()> {
        use winreg::RegValue;
        use winreg::enums::RegType;

        let value = RegValue {
            bytes: data.to_vec(),
            vtype: RegType::REG_BINARY,
        };
        self.key
            .set_raw_value(&self.value_name, &value)
            .map_err(|e| StoreError::WriteFailed(format!("{}\\{}: {e}", self.path, self.value_name)))
    }
}

// ── Non-Windows stand-in ──

/// Placeholder on platforms without a registry; `open` always fails.
#[cfg(not(windows))]
pub struct RegistryKey {
    path: String,
}

#[cfg(not(windows))]
impl RegistryKey {
    pub fn open(path: &str, _value_name: &str) -> Result<Self> {
        Err(unavailable(path))
    }
}

#[cfg(not(windows))]
fn unavailable(path: &str) -> StoreError {
    StoreError::Unavailable(format!("{path}: Night Light is only available on Windows"))
}

#[cfg(not(windows))]
impl RecordKey for RegistryKey {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Err(unavailable(&self.path))
    }

    fn write(&self, _data: &[u8]) -> Result<()> {
        Err(unavailable(&self.path))
    }
}

// ── Mock key for testing ──

/// In-memory record store for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Stores one record in memory; records every write.
    #[derive(Default)]
    pub struct MemoryKey {
        /// Current value. `None` = value absent.
        pub data: RefCell<Option<Vec<u8>>>,
        /// Every payload passed to `write`, in order.
        pub writes: RefCell<Vec<Vec<u8>>>,
        /// Number of `read` calls.
        pub reads: Cell<usize>,
        /// If true, `read` returns an error.
        pub fail_read: Cell<bool>,
        /// If true, `write` returns an error.
        pub fail_write: Cell<bool>,
    }

    impl MemoryKey {
        pub fn new(data: Vec<u8>) -> Self {
            MemoryKey {
                data: RefCell::new(Some(data)),
                ..Default::default()
            }
        }

        /// A key whose value does not exist.
        pub fn empty() -> Self {
            Self::default()
        }

        /// Snapshot of the stored bytes.
        pub fn current(&self) -> Option<Vec<u8>> {
            self.data.borrow().clone()
        }
    }

    impl RecordKey for MemoryKey {
        fn read(&self) -> Result<Option<Vec<u8>>> {
            self.reads.set(self.reads.get() + 1);
            if self.fail_read.get() {
                return Err(StoreError::ReadFailed("mock: read refused".into()));
            }
            Ok(self.data.borrow().clone())
        }

        fn write(&self, data: &[u8]) -> Result<()> {
            if self.fail_write.get() {
                return Err(StoreError::WriteFailed("mock: access denied".into()));
            }
            self.writes.borrow_mut().push(data.to_vec());
            *self.data.borrow_mut() = Some(data.to_vec());
            Ok(())
        }
    }
}
