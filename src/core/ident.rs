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

//! Identifier and secret generation.
//!
//! All identifiers derive from fresh random values, never from a mutable
//! counter, so concurrent creations need no coordination.

use rand::Rng;
use uuid::Uuid;

use crate::core::constants::{otp, tracking};
use crate::core::models::{ParcelId, TrackingId};

/// Generates internal ids, tracking codes, and delivery OTPs.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentifierGenerator;

impl IdentifierGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Fresh opaque internal identifier (128-bit random Uuid).
    pub fn new_id(&self) -> ParcelId {
        ParcelId::new(Uuid::new_v4())
    }

    /// Fresh tracking code matching `TRK-[A-Z0-9]{8}`.
    pub fn new_tracking_id(&self) -> TrackingId {
        let mut rng = rand::rng();
        let suffix: String = (0..tracking::SUFFIX_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..tracking::CHARSET.len());
                tracking::CHARSET[idx] as char
            })
            .collect();
        TrackingId::new(format!("{}{}", tracking::PREFIX, suffix))
    }

    /// Fresh 6-digit delivery OTP, uniform in `100000..=999999`.
    pub fn mint_delivery_otp(&self) -> String {
        rand::rng().random_range(otp::MIN..=otp::MAX).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_tracking_format(code: &str) -> bool {
        code.len() == tracking::PREFIX.len() + tracking::SUFFIX_LENGTH
            && code.starts_with(tracking::PREFIX)
            && code[tracking::PREFIX.len()..]
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    }

    #[test]
    fn tracking_id_matches_format() {
        let idgen = IdentifierGenerator::new();
        for _ in 0..100 {
            let code = idgen.new_tracking_id();
            assert!(is_tracking_format(code.as_str()), "bad code: {}", code);
        }
    }

    #[test]
    fn tracking_ids_do_not_repeat_in_practice() {
        let idgen = IdentifierGenerator::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(idgen.new_tracking_id()));
        }
    }

    #[test]
    fn otp_is_six_digits_in_range() {
        let idgen = IdentifierGenerator::new();
        for _ in 0..1000 {
            let code = idgen.mint_delivery_otp();
            assert_eq!(code.len(), otp::LENGTH);
            let value: u32 = code.parse().unwrap();
            assert!((otp::MIN..=otp::MAX).contains(&value));
        }
    }

    #[test]
    fn internal_ids_are_distinct() {
        let idgen = IdentifierGenerator::new();
        assert_ne!(idgen.new_id(), idgen.new_id());
    }
}
