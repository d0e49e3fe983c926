//! Interned symbolic names.
//!
//! Record field names, map keys and enum values are represented natively as
//! [`Symbol`]s rather than plain strings. A symbol is created through a
//! process-wide interner, so every occurrence of the same name shares a single
//! allocation no matter how many messages carry it. Names no live symbol
//! refers to are swept out as the interner grows.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Interner size below which no sweep runs.
const MIN_SWEEP_AT: usize = 1024;

struct Interner {
    names: HashSet<Arc<str>>,
    /// Size at which the next insert sweeps unused names first.
    sweep_at: usize,
}

impl Interner {
    /// Drop every name held only by the interner itself. Callers hold the
    /// write lock, so no new reference can appear mid-sweep.
    fn sweep(&mut self) {
        self.names.retain(|name| Arc::strong_count(name) > 1);
        self.sweep_at = MIN_SWEEP_AT.max(self.names.len() * 2);
    }
}

fn interner() -> &'static RwLock<Interner> {
    static INTERNER: OnceLock<RwLock<Interner>> = OnceLock::new();
    INTERNER.get_or_init(|| {
        RwLock::new(Interner {
            names: HashSet::new(),
            sweep_at: MIN_SWEEP_AT,
        })
    })
}

/// An interned name.
///
/// Equality, ordering and hashing follow the name's text, so a `Symbol` can
/// be looked up in a map with a plain `&str`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Intern `name` and return its symbol.
    pub fn new(name: &str) -> Self {
        // A poisoned interner still holds valid names; keep using it.
        if let Some(existing) = interner()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .names
            .get(name)
        {
            return Self(existing.clone());
        }

        let mut interner = interner().write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = interner.names.get(name) {
            return Self(existing.clone());
        }
        if interner.names.len() >= interner.sweep_at {
            interner.sweep();
        }
        let interned: Arc<str> = Arc::from(name);
        interner.names.insert(interned.clone());
        Self(interned)
    }

    /// The symbol's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `other` is the very same interned allocation.
    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Number of names currently held by the interner.
    pub fn interned_count() -> usize {
        interner()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .names
            .len()
    }

    /// Drop every interned name no live symbol refers to.
    pub fn release_unused() {
        interner()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .sweep();
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<&String> for Symbol {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Symbol::new(&name))
    }
}
