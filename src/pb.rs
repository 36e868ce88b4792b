//! Registry wire protocol.
//!
//! Stubs are generated from `proto/journey/v1/journey.proto` and checked in,
//! so building does not need `protoc`.

pub mod journey {
    pub mod v1 {
        include!("generated/journey.v1.rs");
    }
}

pub use journey::v1::{Dependency, DependencyAssets, Journey};
