//! It exposes all common structs, types and the token layer shared by the
//! minting contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{account::*, constants::*, errors::*, token::*, types::*};
use concordium_cis2::*;
use concordium_std::*;

mod account;
mod constants;
mod errors;
mod token;
mod types;
