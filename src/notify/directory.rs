// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Static, in-memory user directory.
//!
//! Suitable for composition roots with a fixed contact set and for tests.
//! A real account store plugs in behind the same [`UserDirectory`] trait.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::core::models::Contact;
use crate::core::traits::UserDirectory;

#[derive(Debug, Default, Clone)]
pub struct StaticUserDirectory {
    contacts: HashMap<String, Contact>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the contact for `sender_id`.
    pub fn insert(&mut self, sender_id: impl Into<String>, contact: Contact) {
        self.contacts.insert(sender_id.into(), contact);
    }
}

impl FromIterator<(String, Contact)> for StaticUserDirectory {
    fn from_iter<T: IntoIterator<Item = (String, Contact)>>(iter: T) -> Self {
        Self {
            contacts: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn get_by_id(&self, sender_id: &str) -> Option<Contact> {
        self.contacts.get(sender_id).cloned()
    }
}
