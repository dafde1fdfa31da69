//! Version command

use crate::cli::VersionArgs;
use crate::output;
use crate::version::VersionInfo;
use anyhow::Result;

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info.display());
        output::kv("Registry client", &info.image_crate);
        if let Some(target) = &info.target {
            output::kv("Target", target);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_display_contains_version() {
        let info = VersionInfo::current();
        assert!(!info.version.is_empty());
        assert!(info.display().starts_with("cifetch "));
        assert!(info.display().contains(&info.version));
        assert_eq!(format!("{}", info), info.display());
    }

    #[test]
    fn test_version_info_json_serialization() {
        let info = VersionInfo::current();
        let json: serde_json::Value = serde_json::to_value(&info).unwrap();
        assert_eq!(json["version"], info.version);
        assert_eq!(json["image_crate"], cifetch_image::VERSION);
    }
}
