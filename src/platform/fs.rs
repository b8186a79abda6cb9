// SysBridge - platform/fs.rs
//
// Small sysfs-style file readers used by the sensor backends.
// Attribute files hold a single value followed by a newline.

use std::io;
use std::path::Path;

/// Read a sysfs attribute and trim surrounding whitespace.
fn read_attribute(path: &Path) -> io::Result<String> {
    let text = std::fs::read_to_string(path)?;
    Ok(text.trim().to_string())
}

/// Read a numeric sysfs attribute.
///
/// A value that does not parse as a float is reported as
/// `io::ErrorKind::InvalidData` so callers handle it like any read failure.
pub fn read_f64(path: &Path) -> io::Result<f64> {
    let text = read_attribute(path)?;
    text.parse::<f64>().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("'{}' holds '{text}', not a number: {e}", path.display()),
        )
    })
}

/// Read an optional numeric attribute: `Ok(None)` when the file is absent.
pub fn read_optional_f64(path: &Path) -> io::Result<Option<f64>> {
    match read_f64(path) {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
