//! ---
//! mv_section: "01-core-functionality"
//! mv_subsection: "build"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Emit build metadata consumed by the version module."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Source tarballs carry no git metadata; vergen falls back to placeholder values.
    EmitBuilder::builder().all_build().all_cargo().all_git().emit()?;

    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
