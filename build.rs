// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Linker setup for the firmware binary. Host test builds get no extra link arguments.

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    if std::env::var_os("CARGO_FEATURE_FIRMWARE").is_none() {
        return;
    }

    println!(
        "cargo:rustc-link-arg-bins=-L{}",
        std::env::var("CARGO_MANIFEST_DIR").unwrap_or(".".to_string())
    );
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
