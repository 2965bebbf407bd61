//! CMake-driven builder for native extension modules.
//!
//! Reads `extbuild.toml`, verifies the toolchain, and drives a
//! configure-then-build subprocess pair per extension, staging each compiled
//! module under `<out-dir>/<extension-name>/`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use extbuild::build::{BuildOptions, EnvInput, run_build};
use extbuild::core::mode::BuildMode;
use extbuild::core::platform::Platform;
use extbuild::error::BuildError;
use extbuild::exit_codes;
use extbuild::io::manifest::load_manifest;
use extbuild::io::process::SystemRunner;
use extbuild::io::toolchain::verify_toolchain;

#[derive(Parser)]
#[command(
    name = "extbuild",
    version,
    about = "CMake-driven builder for native extension modules"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Configure and build every extension in the manifest.
    Build {
        /// Build the Debug configuration instead of Release.
        #[arg(long)]
        debug: bool,
        /// Manifest path.
        #[arg(long, default_value = "extbuild.toml")]
        manifest: PathBuf,
        /// Directory compiled modules are staged under, one subdirectory
        /// per extension.
        #[arg(long, default_value = "build/lib")]
        out_dir: PathBuf,
        /// Scratch directory for CMake working trees.
        #[arg(long, default_value = "build/temp")]
        build_temp: PathBuf,
    },
    /// Verify the toolchain is installed (and new enough on Windows).
    Check {
        /// Manifest path.
        #[arg(long, default_value = "extbuild.toml")]
        manifest: PathBuf,
    },
}

fn main() {
    extbuild::logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Build {
            debug,
            manifest,
            out_dir,
            build_temp,
        } => cmd_build(debug, &manifest, out_dir, build_temp),
        Command::Check { manifest } => cmd_check(&manifest),
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BuildError>()
        .map_or(exit_codes::INVALID, BuildError::exit_code)
}

fn cmd_build(
    debug: bool,
    manifest_path: &Path,
    out_dir: PathBuf,
    build_temp: PathBuf,
) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let options = BuildOptions {
        mode: BuildMode::from_debug_flag(debug),
        platform: Platform::host(),
        out_dir,
        build_temp,
    };
    let env_input = EnvInput::from_process_env()?;
    run_build(&SystemRunner, &manifest, &options, &env_input)
}

fn cmd_check(manifest_path: &Path) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    verify_toolchain(&SystemRunner, &manifest.package.cmake, Platform::host())?;
    println!("toolchain ok: {}", manifest.package.cmake);
    Ok(())
}
