//! Build script for embedding the frontend into the server binary.
//!
//! Release builds run Trunk so rust-embed can pick up dist/ at compile
//! time. Debug builds skip this; rust-embed reads dist/ from the
//! filesystem at runtime (or you run the Trunk dev server directly).

fn main() {
    #[cfg(not(debug_assertions))]
    {
        use std::process::Command;

        println!("cargo:rerun-if-changed=src/frontend");
        println!("cargo:rerun-if-changed=Trunk.toml");

        println!("cargo:warning=Building frontend with Trunk...");

        let status = Command::new("trunk")
            .args(["build", "--release", "--dist", "dist"])
            .env("CARGO_TARGET_DIR", "target/trunk")
            .status()
            .expect("Failed to execute trunk command. Is trunk installed?");

        if !status.success() {
            panic!(
                "Trunk build failed with exit code: {:?}. \
                 Ensure trunk is installed and the frontend builds successfully.",
                status.code()
            );
        }

        println!("cargo:warning=Frontend build completed successfully");
    }

    #[cfg(debug_assertions)]
    {
        println!(
            "cargo:warning=Debug build: Skipping frontend build (rust-embed will read from dist/ at runtime)"
        );
    }
}
