//! Fixed names shared across the crate.

pub const APP_NAME: &str = "gdk";

/// Project descriptor read from the project directory.
pub const CONFIG_FILE_NAME: &str = "gdk-config.json";

/// Recipe file names accepted in the project directory.
pub const RECIPE_FILE_NAMES: [&str; 3] = ["recipe.json", "recipe.yaml", "recipe.yml"];

/// Build root created under the project directory.
pub const BUILD_DIR_NAME: &str = "greengrass-build";
pub const RECIPES_DIR_NAME: &str = "recipes";
pub const ARTIFACTS_DIR_NAME: &str = "artifacts";

/// Output folder of the intrinsic zip build.
pub const ZIP_BUILD_DIR_NAME: &str = "zip-build";

/// Folder beside the executable holding bundled resource files.
pub const STATIC_DIR_NAME: &str = "static";

/// Scheme used when rewriting artifact URIs to their bucket location.
pub const BUCKET_SCHEME: &str = "s3";

/// URI scheme of artifacts that live in a container registry.
pub const CONTAINER_SCHEME: &str = "docker";

/// Version marker resolved at build time.
pub const NEXT_PATCH_VERSION: &str = "NEXT_PATCH";
pub const INITIAL_VERSION: &str = "1.0.0";
