// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Separator used when flattening material selections for storage.
const SEPARATOR: &str = ", ";

/// A multi-select list of material names.
///
/// Selections are stored denormalized as a single comma-joined string
/// (`"Kayu, Besi, Kaca"`), not as relational rows. The joined form must
/// round-trip unchanged; this type is the only place that knows the
/// delimiter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialList {
    /// The selected material names, in submission order.
    items: Vec<String>,
}

impl MaterialList {
    /// Creates a list from individual selections.
    #[must_use]
    pub const fn from_items(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Reconstructs a list from its stored joined form.
    ///
    /// An empty stored value yields an empty list.
    #[must_use]
    pub fn from_joined(joined: &str) -> Self {
        if joined.is_empty() {
            return Self { items: Vec::new() };
        }
        Self {
            items: joined.split(SEPARATOR).map(String::from).collect(),
        }
    }

    /// Returns the storage form: items joined with `", "`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.items.join(SEPARATOR)
    }

    /// Returns the individual selections.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Returns whether no material was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
