fn main() {
    // Bindings come from `uniffi::setup_scaffolding!()` in src/uniffi_bindings.rs,
    // there is no UDL file to compile.
    println!("cargo:rerun-if-changed=src/uniffi_bindings.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
