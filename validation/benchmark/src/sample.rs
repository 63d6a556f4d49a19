//! Built-in sample document.

use std::path::Path;

/// 400x300 sample with a gradient, text, basic shapes and a curved path.
pub const SAMPLE_SVG: &str = r##"<svg width="400" height="300" xmlns="http://www.w3.org/2000/svg">
  <!-- Background with gradient -->
  <defs>
    <linearGradient id="grad1" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#f5f7fa;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#c3cfe2;stop-opacity:1" />
    </linearGradient>
  </defs>
  <rect width="400" height="300" fill="url(#grad1)" />

  <!-- Text elements with different styles -->
  <text x="50" y="50" font-family="Arial" font-size="24" font-weight="bold" fill="#333">
    SVG to WebP Converter
  </text>
  <text x="50" y="80" font-family="Arial" font-size="14" fill="#555">
    High-quality conversion using resvg
  </text>

  <!-- Some vector shapes -->
  <circle cx="100" cy="150" r="40" stroke="#3498db" stroke-width="3" fill="#3498db" fill-opacity="0.7" />
  <rect x="160" y="110" width="80" height="80" rx="10" ry="10" fill="#e74c3c" />
  <polygon points="300,110 340,190 260,190" fill="#2ecc71" />

  <!-- A path with curves -->
  <path d="M 50 220 C 100 180, 150 180, 200 220 S 300 260, 350 220" stroke="#9b59b6" stroke-width="4" fill="transparent" />

  <!-- Some decorative elements -->
  <circle cx="300" cy="70" r="15" fill="#f1c40f" />
  <circle cx="330" cy="70" r="8" fill="#e67e22" />
  <circle cx="350" cy="70" r="5" fill="#e74c3c" />
</svg>"##;

/// Write the sample document to `path` unless a file already exists there.
///
/// Returns `true` when the file was created.
pub fn ensure_sample(path: impl AsRef<Path>) -> std::io::Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, SAMPLE_SVG)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_missing_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.svg");

        assert!(ensure_sample(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE_SVG);
    }

    #[test]
    fn test_keeps_existing_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.svg");
        std::fs::write(&path, "<svg/>").unwrap();

        assert!(!ensure_sample(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
    }
}
