use crate::cli::InitArgs;
use crate::config::{CONFIG_FILE_NAME, generate_config_template};
use crate::fs::{FileSystem, default_fs};
use crate::style;

pub fn cmd_init(args: InitArgs) -> i32 {
    cmd_init_with_fs(args, default_fs())
}

pub fn cmd_init_with_fs(args: InitArgs, fs: &dyn FileSystem) -> i32 {
    if !fs.is_dir(&args.path) {
        style::error(&format!("Not a directory: {}", style::path(&args.path)));
        return 1;
    }

    let config_path = args.path.join(CONFIG_FILE_NAME);
    if fs.exists(&config_path) {
        style::error(&format!(
            "{} already exists at {}",
            CONFIG_FILE_NAME,
            style::path(&config_path)
        ));
        return 1;
    }

    if let Err(e) = fs.write(&config_path, &generate_config_template()) {
        style::error(&format!("Failed to write config file: {}", e));
        return 1;
    }

    style::success(&format!(
        "Created {} at {}",
        CONFIG_FILE_NAME,
        style::path(&config_path)
    ));
    style::hint("every setting is optional; delete the ones you keep at their defaults");
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fs::mock::MockFs;
    use std::path::PathBuf;

    fn init_args(path: &str) -> InitArgs {
        InitArgs {
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_writes_parseable_template() {
        let fs = MockFs::new().with_dir("/project");
        assert_eq!(cmd_init_with_fs(init_args("/project"), &fs), 0);

        let written = fs.contents("/project/.modgraph.toml").unwrap();
        assert_eq!(Config::from_toml(&written).unwrap(), Config::default());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let fs = MockFs::with_files([("/project/.modgraph.toml", "[scan]\n")]).with_dir("/project");
        assert_eq!(cmd_init_with_fs(init_args("/project"), &fs), 1);
        assert_eq!(fs.contents("/project/.modgraph.toml").unwrap(), "[scan]\n");
    }

    #[test]
    fn test_missing_directory() {
        let fs = MockFs::new();
        assert_eq!(cmd_init_with_fs(init_args("/nowhere"), &fs), 1);
    }
}
