use std::path::Path;

use horloge_engine::text::{FontId, FontSystem};

/// Common install locations of a sans-serif UI font.
const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Loads the first readable, parseable font from [`CANDIDATES`].
///
/// `None` means the watch runs without text: the face and hands still draw.
pub fn load_system_font(fonts: &mut FontSystem) -> Option<FontId> {
    load_first(fonts, CANDIDATES.iter().map(|p| Path::new(*p)))
}

fn load_first<'p>(
    fonts: &mut FontSystem,
    paths: impl IntoIterator<Item = &'p Path>,
) -> Option<FontId> {
    for path in paths {
        let Ok(bytes) = std::fs::read(path) else { continue };
        match fonts.load_font(&bytes) {
            Ok(id) => {
                log::debug!("loaded font {}", path.display());
                return Some(id);
            }
            Err(e) => log::debug!("skipping {}: {e}", path.display()),
        }
    }
    log::warn!("no usable system font found; time and date labels are disabled");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_yield_none() {
        let mut fonts = FontSystem::new();
        let paths = [Path::new("/nonexistent/horloge/a.ttf"), Path::new("")];
        assert!(load_first(&mut fonts, paths).is_none());
        assert!(fonts.is_empty());
    }
}
