//! A media pool NFT minter implementing the Concordium Token Standard CIS2.
//!
//! # Description
//! The admin of an instance fills a pool of media URIs and switches minting
//! on. From then on any address can call `mintNft` to receive one token whose
//! name, metadata URL and `media_uri` property are a URI taken out of the
//! pool. Every URI is minted at most once.
//!
//! The pool index is the slot time of the block modulo the pool size. The
//! slot time is public before the transaction is included, so whoever
//! controls transaction timing can steer which URI gets minted.
//!
//! Tokens live in the collection created when the instance is initialized and
//! can be moved around through the usual CIS2 `transfer` and
//! `updateOperator` functions.

#![cfg_attr(not(feature = "std"), no_std)]

mod constants;
mod contract;
mod events;
mod external;
mod state;
