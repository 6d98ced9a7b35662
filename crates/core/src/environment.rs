use std::path::{Path, PathBuf};

use tracing::debug;

/// Loads environment variables from a .env file before the config yaml is read.
///
/// The project directory's .env is preferred; when it is missing the usual dotenv
/// lookup from the working directory is used instead. A missing .env is not an
/// error since the variables may already be set in the process environment.
///
/// # Returns
/// * `Some(PathBuf)` - The .env file that was loaded
/// * `None` - No .env file was found
pub fn load_env_from_project_path(project_path: &Path) -> Option<PathBuf> {
    let project_env = project_path.join(".env");
    if dotenvy::from_path(&project_env).is_ok() {
        debug!("Loaded environment from {}", project_env.display());
        return Some(project_env);
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn test_loads_project_env_file() {
        let dir = env::temp_dir().join(format!("rbundler-env-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(".env"), "RBUNDLER_TEST_FROM_DOTENV=loaded\n").unwrap();

        let loaded = load_env_from_project_path(&dir);

        assert_eq!(loaded, Some(dir.join(".env")));
        assert_eq!(env::var("RBUNDLER_TEST_FROM_DOTENV").unwrap(), "loaded");
        fs::remove_dir_all(dir).ok();
    }
}
