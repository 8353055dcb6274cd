use edk::Address;
use std::collections::HashMap;

/// Maps label names to the address of the line that follows them.
///
/// Case-sensitive: the original source this core was distilled from treats
/// labels case-sensitively, unlike mnemonics and register names.
#[derive(Default)]
pub struct SymbolTable {
    addresses: HashMap<String, Address>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            addresses: HashMap::new(),
        }
    }

    /// Inserts `name -> address`. Returns the previous address if `name`
    /// was already defined, leaving the table holding the *first*
    /// definition (last-wins would silently hide the duplicate).
    pub fn insert(&mut self, name: &str, address: Address) -> Option<Address> {
        if let Some(&existing) = self.addresses.get(name) {
            return Some(existing);
        }
        self.addresses.insert(name.to_string(), address);
        None
    }

    pub fn get(&self, name: &str) -> Option<Address> {
        self.addresses.get(name).copied()
    }
}
