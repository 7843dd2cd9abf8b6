use std::{borrow::Borrow, fmt};

use crate::foundation::core::Rgb8;

/// Stable roster identity. Assigned once when a dancer joins and never handed out again.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct DancerId(pub String);

impl DancerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DancerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DancerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DancerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marker fill, outline and label colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DancerColors {
    pub color: Rgb8,
    pub border_color: Rgb8,
    pub text_color: Rgb8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dancer {
    pub id: DancerId,
    pub name: String,
    pub initials: String, // 1-3 chars, uppercase
    #[serde(flatten)]
    pub colors: DancerColors,
}

/// Display attributes to merge into an existing dancer. `None` leaves a field as is.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DancerPatch {
    pub name: Option<String>,
    pub initials: Option<String>,
    pub colors: Option<DancerColors>,
}

impl DancerPatch {
    pub fn initials(initials: impl Into<String>) -> Self {
        Self {
            initials: Some(initials.into()),
            ..Self::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl Dancer {
    pub(crate) fn apply(&mut self, patch: DancerPatch) {
        if let Some(name) = patch.name {
            let name = name.trim();
            if !name.is_empty() {
                self.name = name.to_string();
            }
        }
        if let Some(initials) = patch.initials {
            let initials: String = initials.trim().to_uppercase().chars().take(3).collect();
            if !initials.is_empty() {
                self.initials = initials;
            }
        }
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
    }
}
