//! ImageMagick-based image probing.

use super::types::Geometry;
use crate::command::{path_arg, ToolCommand};
use crate::settings::ProbeSettings;
use crate::tools::{get_tool_path, IDENTIFY};
use crate::{Error, Result};
use std::path::Path;

const FORMAT: &str = "%w %h %[exif:orientation]";

/// Read image geometry with `identify`, honouring EXIF orientation.
///
/// Only the first frame is inspected, so animated GIFs and multi-page TIFFs
/// report the size of their first image.
pub fn identify_geometry(path: &Path, settings: &ProbeSettings) -> Result<Geometry> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    // ImageMagick expands `*`, `?` and `[...]` in file names itself, so names
    // containing them are not supported.
    let mut first_frame = path_arg(path);
    first_frame.push("[0]");

    let program = get_tool_path(IDENTIFY, settings.identify_path.as_deref())?;
    let output = ToolCommand::new(program)
        .args(["-format", FORMAT])
        .arg(first_frame)
        .timeout(settings.timeout())
        .execute()?;

    parse_identify_output(&output.stdout)
}

/// Parse `"<width> <height> [orientation]"` as printed by [`FORMAT`].
pub fn parse_identify_output(stdout: &str) -> Result<Geometry> {
    let mut fields = stdout.split_whitespace();

    let mut dimension = |name: &str| -> Result<u32> {
        fields
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| Error::parse_error(IDENTIFY, format!("missing {name} in {stdout:?}")))
    };
    let width = dimension("width")?;
    let height = dimension("height")?;

    let orientation = fields.next().and_then(|v| v.parse::<u16>().ok());

    Ok(Geometry::new(width, height).oriented(orientation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_geometry() {
        assert_eq!(
            parse_identify_output("640 480 ").unwrap(),
            Geometry::new(640, 480)
        );
        assert_eq!(
            parse_identify_output("640 480").unwrap(),
            Geometry::new(640, 480)
        );
    }

    #[test]
    fn applies_exif_orientation() {
        assert_eq!(
            parse_identify_output("4032 3024 6").unwrap(),
            Geometry::new(3024, 4032)
        );
        assert_eq!(
            parse_identify_output("4032 3024 1").unwrap(),
            Geometry::new(4032, 3024)
        );
    }

    #[cfg(unix)]
    #[test]
    fn selects_first_frame_of_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("identify");
        std::fs::write(
            &script,
            concat!(
                "#!/bin/sh\n",
                "for last; do :; done\n",
                "[ -e \"${last%\\[0\\]}\" ] || { echo \"missing: $last\" >&2; exit 1; }\n",
                "printf '40 30 6'\n",
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let image = dir.path().join(OsStr::from_bytes(b"scan\xfe.tif"));
        std::fs::write(&image, b"").unwrap();

        let settings = ProbeSettings {
            identify_path: Some(script),
            ..ProbeSettings::default()
        };
        assert_eq!(
            identify_geometry(&image, &settings).unwrap(),
            Geometry::new(30, 40)
        );
    }

    #[test]
    fn rejects_blank_output() {
        assert!(matches!(
            parse_identify_output(""),
            Err(Error::ParseError { .. })
        ));
        assert!(matches!(
            parse_identify_output("640"),
            Err(Error::ParseError { .. })
        ));
        assert!(parse_identify_output("wide tall").is_err());
    }
}
