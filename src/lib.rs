//! Workspace anchor. All functionality lives in the crates under `crates/`.
