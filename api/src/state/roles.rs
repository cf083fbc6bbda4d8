use std::collections::{BTreeSet, HashMap};

use crate::traits::AccessController;
use crate::types::*;

/// In-memory capability sets. Grants are permanent; there is no revoke.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roles {
    members: HashMap<Capability, BTreeSet<Account>>,
}

impl Roles {
    /// The admin starts out holding every capability.
    pub fn new(admin: &Account) -> Self {
        let mut roles = Self::default();
        for capability in Capability::ALL {
            roles.grant(capability, admin);
        }
        roles
    }

    pub fn members(&self, capability: Capability) -> Vec<Account> {
        self.members
            .get(&capability)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl AccessController for Roles {
    fn has_capability(&self, capability: Capability, account: &Account) -> bool {
        self.members
            .get(&capability)
            .is_some_and(|set| set.contains(account))
    }

    fn grant(&mut self, capability: Capability, account: &Account) -> bool {
        self.members
            .entry(capability)
            .or_default()
            .insert(*account)
    }
}
