use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

use ahash::{HashMap, HashMapExt};
use append_only_vec::AppendOnlyVec;
use once_cell::sync::Lazy;
use smartstring::alias::String;

static STATE: Lazy<RwLock<State>> = Lazy::new(|| RwLock::new(State::new()));
static ID_TO_STR: AppendOnlyVec<String> = AppendOnlyVec::<String>::new();

/// An interned variable identifier.
///
/// Symbols are cheap `Copy` handles into the global [State]. Equality and
/// hashing compare the handle; the canonical total order used throughout the
/// polynomial code compares names, so that it does not depend on the order in
/// which symbols were registered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Symbol {
    id: u32,
}

impl Symbol {
    const fn init(id: u32) -> Symbol {
        Symbol { id }
    }

    /// Get the id of the symbol in the global state.
    pub fn get_id(&self) -> u32 {
        self.id
    }

    /// Get the name of the symbol.
    pub fn get_name(&self) -> &'static str {
        State::get_name(*self)
    }
}

impl PartialOrd for Symbol {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.id == other.id {
            return Ordering::Equal;
        }

        // names are unique per id, so the name order is total
        State::get_name(*self).cmp(State::get_name(*other))
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.get_name())
    }
}

/// A global state that stores mappings from variable names to ids.
pub struct State {
    str_to_id: HashMap<String, Symbol>,
}

impl State {
    fn new() -> State {
        State {
            str_to_id: HashMap::new(),
        }
    }

    /// Get the symbol for a certain name if the name is already registered,
    /// else register it and return a new symbol.
    pub fn get_symbol<S: AsRef<str>>(name: S) -> Symbol {
        STATE.write().unwrap().get_symbol_impl(name.as_ref())
    }

    fn get_symbol_impl(&mut self, name: &str) -> Symbol {
        match self.str_to_id.entry(name.into()) {
            Entry::Occupied(o) => *o.get(),
            Entry::Vacant(v) => {
                if ID_TO_STR.len() == u32::MAX as usize - 1 {
                    panic!("Too many variables defined");
                }

                // there is no synchronization issue since only one thread can insert at a time
                // as the state itself is behind a lock
                let id = ID_TO_STR.push(name.into());

                let new_symbol = Symbol::init(id as u32);
                v.insert(new_symbol);
                new_symbol
            }
        }
    }

    /// Get the name for a given symbol.
    pub fn get_name(id: Symbol) -> &'static str {
        &ID_TO_STR[id.id as usize]
    }
}

#[cfg(test)]
mod test {
    use super::{State, Symbol};

    #[test]
    fn interning_is_idempotent() {
        let a = State::get_symbol("v1");
        let b = State::get_symbol("v1");
        assert_eq!(a, b);
        assert_eq!(a.get_name(), "v1");
    }

    #[test]
    fn order_follows_names() {
        // register out of alphabetical order on purpose
        let c = State::get_symbol("name_c");
        let a = State::get_symbol("name_a");
        let b = State::get_symbol("name_b");

        let mut v = vec![c, a, b];
        v.sort();
        assert_eq!(v, vec![a, b, c]);
        assert!(a < b && b < c);
    }

    #[test]
    fn handles_are_small() {
        assert_eq!(std::mem::size_of::<Symbol>(), 4);
    }
}
