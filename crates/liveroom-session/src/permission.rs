//! Device permissions gating the room bootstrap.

use std::fmt;

/// A device permission the room needs before initialization may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Camera access for capture and preview.
    Camera,
    /// Microphone access for publishing audio.
    Microphone,
    /// Storage access for effect resources.
    Storage,
}

impl Permission {
    /// All permissions the bootstrap requires.
    pub const ALL: [Permission; 3] = [Self::Camera, Self::Microphone, Self::Storage];

    const fn bit(self) -> u8 {
        match self {
            Self::Camera => 1,
            Self::Microphone => 1 << 1,
            Self::Storage => 1 << 2,
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Microphone => "microphone",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of [`Permission`]s, stored as a bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionSet(u8);

impl PermissionSet {
    /// Empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set containing every required permission.
    pub const fn all() -> Self {
        Self(Permission::Camera.bit() | Permission::Microphone.bit() | Permission::Storage.bit())
    }

    /// Add a permission to the set.
    pub fn insert(&mut self, permission: Permission) {
        self.0 |= permission.bit();
    }

    /// Remove a permission from the set.
    pub fn remove(&mut self, permission: Permission) {
        self.0 &= !permission.bit();
    }

    /// True if the set contains `permission`.
    pub fn contains(self, permission: Permission) -> bool {
        self.0 & permission.bit() != 0
    }

    /// True if the set contains no permissions.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if the set contains every required permission.
    pub fn is_complete(self) -> bool {
        self == Self::all()
    }

    /// Required permissions missing from this set.
    pub fn missing(self) -> Self {
        Self(Self::all().0 & !self.0)
    }

    /// Iterate the permissions in the set.
    pub fn iter(self) -> impl Iterator<Item = Permission> {
        Permission::ALL.into_iter().filter(move |permission| self.contains(*permission))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = Self::empty();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for permission in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(permission.label())?;
            first = false;
        }
        Ok(())
    }
}
