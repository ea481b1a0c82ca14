use std::env;
use std::fs;
use std::path::PathBuf;

/// Cargo's variable for each font feature, and the blob it pulls in.
const BLOBS: [(&str, &str); 3] = [
    ("CARGO_FEATURE_LATIN", "font_latin.bin"),
    ("CARGO_FEATURE_LATIN_SUPPLEMENT", "font_latin_supplement.bin"),
    ("CARGO_FEATURE_KANA", "font_kana.bin"),
];

fn main() {
    // Stage the blobs of enabled charsets where `include_bytes!` can find
    // them.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    println!("cargo:rerun-if-env-changed=GBAGFX_FONT_DIR");

    for &(feature, name) in &BLOBS {
        if env::var_os(feature).is_none() {
            continue;
        }
        let dir = env::var_os("GBAGFX_FONT_DIR").unwrap_or_else(|| {
            panic!("{} needs GBAGFX_FONT_DIR to point at the packed fonts", name)
        });
        let src = PathBuf::from(dir).join(name);
        fs::copy(&src, out.join(name))
            .unwrap_or_else(|e| panic!("copying {}: {}", src.display(), e));
        println!("cargo:rerun-if-changed={}", src.display());
    }
}
