//! Utility functions for the smm-login module.

use std::path::Path;

/// Mask a session token for safe display.
pub fn safe_format_key(key: &str) -> String {
    if key.len() <= 13 || !key.is_ascii() {
        return "***".to_string();
    }
    let prefix = &key[..8];
    let suffix = &key[key.len() - 5..];
    format!("{prefix}***{suffix}")
}

/// Set restrictive file permissions (0600 on Unix).
pub(crate) fn set_file_permissions(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    #[cfg(not(unix))]
    {
        let _ = path;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_format_key_long() {
        let key = "eyJhbGciOiJIUzI1NiJ9.payload";
        assert_eq!(safe_format_key(key), "eyJhbGci***yload");
    }

    #[test]
    fn test_safe_format_key_short() {
        assert_eq!(safe_format_key("short-token"), "***");
    }
}
