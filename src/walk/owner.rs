//! Owner name resolution

use std::collections::HashMap;

use nix::unistd::{Uid, User};

/// Maps uids to user names, caching each passwd lookup for the run.
#[derive(Debug, Default)]
pub struct OwnerResolver {
    cache: HashMap<u32, String>,
}

impl OwnerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, uid: u32) -> String {
        if let Some(name) = self.cache.get(&uid) {
            return name.clone();
        }
        let name = lookup_user_name(uid);
        self.cache.insert(uid, name.clone());
        name
    }
}

/// Unknown uids are rendered as the number itself.
fn lookup_user_name(uid: u32) -> String {
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(user)) => user.name,
        Ok(None) => uid.to_string(),
        Err(e) => {
            log::debug!("passwd lookup for uid {} failed: {}", uid, e);
            uid.to_string()
        }
    }
}
