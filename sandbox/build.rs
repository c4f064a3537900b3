use fs_extra::dir::{copy, CopyOptions};
use std::env;
use std::path::{Path, PathBuf};

const ASSETS_FOLDER_NAME: &str = "assets";

// OUT_DIR is target/<profile>/build/<package>-<hash>/out
const OUT_DIRECTORY_UP_LEVEL: usize = 3;

fn main() {
    println!("cargo:rerun-if-changed={ASSETS_FOLDER_NAME}");

    let copy_source = Path::new(ASSETS_FOLDER_NAME);

    let out_directory = env::var("OUT_DIR")
        .expect("failed to retrieve output directory of the build procedure");

    let copy_target = PathBuf::from(&out_directory)
        .ancestors()
        .nth(OUT_DIRECTORY_UP_LEVEL)
        .unwrap_or_else(|| panic!("unexpected layout of the output directory {out_directory}"))
        .to_path_buf();

    let mut options = CopyOptions::new();
    options.overwrite = true;
    copy(copy_source, &copy_target, &options)
        .unwrap_or_else(|error| panic!("failed to copy folder {copy_source:?} into {copy_target:?}: {error}"));
}
