//! Agent bindings for the canisters the feed talks to,
//! generated from `did/*.did` at build time

include!(concat!(env!("OUT_DIR"), "/did/mod.rs"));
