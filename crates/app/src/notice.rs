//! Transient user-facing notices.

use std::time::Duration;

use serde::Serialize;

use pocketbook_infra::PersistenceError;

pub const ADDED_MESSAGE: &str = "✨ Transaksi berhasil ditambahkan!";
pub const REMOVED_MESSAGE: &str = "🗑️ Transaksi berhasil dihapus!";
pub const CONFIRM_DELETE_PROMPT: &str = "Yakin ingin menghapus transaksi ini?";

/// How long a notice stays on screen. Purely cosmetic.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    #[serde(skip)]
    pub duration: Duration,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DISPLAY_DURATION,
        }
    }

    pub fn added() -> Self {
        Self::new(NoticeLevel::Success, ADDED_MESSAGE)
    }

    pub fn removed() -> Self {
        Self::new(NoticeLevel::Success, REMOVED_MESSAGE)
    }

    pub fn save_failed(error: &PersistenceError) -> Self {
        Self::new(
            NoticeLevel::Warning,
            format!("⚠️ Perubahan belum tersimpan: {error}"),
        )
    }

    pub fn load_failed(error: &PersistenceError) -> Self {
        Self::new(
            NoticeLevel::Warning,
            format!("⚠️ Data tersimpan tidak dapat dibaca, memulai dengan catatan kosong: {error}"),
        )
    }

    pub fn is_warning(&self) -> bool {
        self.level == NoticeLevel::Warning
    }
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}
