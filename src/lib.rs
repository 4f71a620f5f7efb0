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

//! parceltrack: parcel lifecycle and delivery-verification engine.
//!
//! This library provides the core logic for parcel tracking: tracking-code
//! generation, status transitions, one-time-code (OTP) issuance and
//! verification at physical handover, and the notifications tied to those
//! transitions. Transport layers (HTTP controllers, real email delivery)
//! live outside this crate and reach it through [`core::lifecycle`],
//! [`core::traits`], and the [`registry`] contract.

pub mod config;
pub mod core;
pub mod notify;
pub mod registry;
pub mod utils;
