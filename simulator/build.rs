//! Build script for guy-simulator.
//!
//! On Windows, links against the SDL2 copy in `vendor/sdl2/` and places
//! `SDL2.dll` next to the built binary.

use std::path::{Path, PathBuf};
use std::{env, fs};

/// `target/<profile>` for this build, found from `OUT_DIR`.
fn profile_dir(out_dir: &Path) -> Option<&Path> {
    out_dir
        .ancestors()
        .find(|p| p.file_name().is_some_and(|n| n == "release" || n == "debug"))
}

fn copy_dll(vendor_sdl2: &Path) {
    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    let out_dir = PathBuf::from(out_dir);
    let Some(target_dir) = profile_dir(&out_dir) else {
        return;
    };

    let dll_src = vendor_sdl2.join("SDL2.dll");
    let dll_dst = target_dir.join("SDL2.dll");
    if !dll_src.exists() || dll_dst.exists() {
        return;
    }
    match fs::copy(&dll_src, &dll_dst) {
        Ok(_) => println!("cargo:warning=Copied SDL2.dll to {}", dll_dst.display()),
        Err(e) => println!("cargo:warning=Failed to copy SDL2.dll: {e}"),
    }
}

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let manifest_dir = PathBuf::from(manifest_dir);
    let Some(workspace) = manifest_dir.parent() else {
        return;
    };
    let vendor_sdl2 = workspace.join("vendor").join("sdl2");
    println!("cargo:rerun-if-changed={}", vendor_sdl2.display());

    if vendor_sdl2.exists() {
        println!("cargo:rustc-link-search=native={}", vendor_sdl2.display());
        copy_dll(&vendor_sdl2);
    } else {
        println!("cargo:warning=SDL2 not found at {}", vendor_sdl2.display());
        println!("cargo:warning=Put SDL2.lib and SDL2.dll in vendor/sdl2/ to build on Windows");
    }
}
