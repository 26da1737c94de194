use crate::config::AccessDescriptor;

/// Result of the access gate, evaluated once at initialization. There is no
/// per-item access control: an authorized caller sees the whole library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Admin,
    Member,
    Denied,
}

impl AccessLevel {
    /// Gate rules: the explicit admin flag or an `admin` role tag grants admin,
    /// an `affiliate` role tag grants member access, design/preview mode
    /// bypasses the gate at member level, anything else is denied.
    pub fn evaluate(access: &AccessDescriptor, design_mode: bool) -> Self {
        if access.admin || has_role(access, "admin") {
            AccessLevel::Admin
        } else if has_role(access, "affiliate") || design_mode {
            AccessLevel::Member
        } else {
            AccessLevel::Denied
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, AccessLevel::Admin)
    }

    pub fn is_denied(self) -> bool {
        matches!(self, AccessLevel::Denied)
    }
}

fn has_role(access: &AccessDescriptor, role: &str) -> bool {
    access
        .roles
        .iter()
        .any(|tag| tag.trim().eq_ignore_ascii_case(role))
}
